//! Decimal constants without floating point.

/// Builds a fixed-point constant from a decimal literal written as
/// `integer, fraction_digits`, so `-1.25` becomes `fixed_const!(Q4, -1, 25)`.
///
/// The fraction digits are base-10 and leading zeros count (`3, 001` is 3.001). The
/// fraction is rescaled to the target's fractional bits rounding halves up, and the
/// sign comes from the integer part, including `-0`.
///
/// ```
/// use qfixed::{fixed_const, Fixed};
///
/// type Q4 = Fixed<4>;
/// type Q8 = Fixed<8>;
///
/// assert_eq!(fixed_const!(Q4, -1, 25).raw(), -20);
/// assert_eq!(fixed_const!(Q8, 3, 001).raw(), 768);
/// assert_eq!(fixed_const!(Q8, -0, 5).raw(), -128);
/// ```
///
/// For frequent use, wrap it in a shorter macro for the type at hand:
///
/// ```
/// use qfixed::{fixed_const, Fixed};
///
/// type Q8 = Fixed<8>;
/// macro_rules! q8 {
///     ($($t:tt)*) => { fixed_const!(Q8, $($t)*) };
/// }
///
/// assert_eq!(q8!(2, 5), Q8::from_raw(640));
/// ```
#[macro_export]
macro_rules! fixed_const {
    ($ty:ty, - $int:literal, $frac:literal) => {
        -$crate::fixed_const!($ty, $int, $frac)
    };
    ($ty:ty, $int:literal, $frac:literal) => {
        <$ty>::from_parts::<{ <$ty>::FRAC_BITS }>(
            $int,
            $crate::literal::scaled_fraction(<$ty>::FRAC_BITS, stringify!($frac)) as _,
        )
    };
}

/// [`fixed_const!`] for `Fixed<q>` with the default `i32` storage.
///
/// ```
/// use qfixed::fixed_const_q;
///
/// assert_eq!(fixed_const_q!(8, -2, 3).raw(), -589);
/// ```
#[macro_export]
macro_rules! fixed_const_q {
    ($q:literal, $($rest:tt)*) => {
        $crate::fixed_const!($crate::Fixed<$q>, $($rest)*)
    };
}

/// Rescales the decimal fraction written as `digits` to `frac_bits` binary digits,
/// rounding halves up: `(2^frac_bits * value + 10^n / 2) / 10^n`.
///
/// The quotient is produced one bit at a time, so nothing overflows for any
/// `frac_bits` below 128.
#[doc(hidden)]
pub const fn scaled_fraction(frac_bits: u32, digits: &str) -> u128 {
    let bytes = digits.as_bytes();
    let mut value: u128 = 0;
    let mut unit: u128 = 1;
    let mut i = 0;
    while i < bytes.len() {
        let digit = bytes[i];
        i += 1;
        if digit == b'_' {
            continue;
        }
        assert!(digit.is_ascii_digit(), "fraction digits must be decimal");
        unit = match unit.checked_mul(10) {
            Some(unit) if unit <= u128::MAX / 2 => unit,
            _ => panic!("too many fraction digits"),
        };
        value = value * 10 + (digit - b'0') as u128;
    }

    let mut quotient: u128 = 0;
    let mut remainder = value;
    let mut bit = 0;
    while bit < frac_bits {
        remainder <<= 1;
        quotient <<= 1;
        if remainder >= unit {
            remainder -= unit;
            quotient |= 1;
        }
        bit += 1;
    }
    if remainder * 2 >= unit { quotient + 1 } else { quotient }
}
