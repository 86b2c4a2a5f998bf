//! Binary-to-decimal rendering of fractional bits, with no floating point involved.

use core::fmt;

use crate::fixed::Fixed;
use crate::storage::Storage;

/// Guard bits carried below the last requested decimal digit.
const GUARD_BITS: u32 = 4;

/// Most decimal digits computed exactly. The running sum stays below
/// `2^(GUARD_BITS + 1) * 10^MAX_DIGITS`, which must fit in a `u128`.
pub(crate) const MAX_DIGITS: u32 = 36;

/// Converts the low `q` bits of `fraction` into a `decimals`-digit base-10 integer.
///
/// Each set bit contributes `10^decimals / 2^k` (scaled by the guard bits), and the
/// sum is rounded at the end. A result of `10^decimals` means the fraction rounded up
/// to a whole unit. `decimals` is clamped to [`MAX_DIGITS`].
pub(crate) fn fraction_digits(mut fraction: u128, q: u32, decimals: u32) -> u128 {
    if q == 0 {
        return 0;
    }
    let decimals = decimals.min(MAX_DIGITS);
    let mut weight: u128 = (1 << (GUARD_BITS - 1)) * 10u128.pow(decimals);

    let mut result: u128 = 0;
    let mut mask: u128 = 1 << (q - 1);
    while fraction != 0 && mask != 0 {
        if fraction & mask != 0 {
            fraction -= mask;
            result += weight;
        }
        weight >>= 1;
        mask >>= 1;
    }
    (result + (1 << (GUARD_BITS - 1))) >> GUARD_BITS
}

/// Formats as `[-]integer.fraction`.
///
/// The formatter precision selects the number of decimal digits; without one,
/// `ceil(Q * log10(2))` digits are printed, enough to tell neighbouring values apart.
/// Digits past the 36th are always zero.
///
/// ```
/// use qfixed::Fixed;
///
/// let x = Fixed::<8>::from_raw(-320);
/// assert_eq!(x.to_string(), "-1.250");
/// assert_eq!(format!("{:.1}", x), "-1.3");
/// ```
impl<const Q: u32, T: Storage> fmt::Display for Fixed<Q, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let decimals = f.precision().map_or((Q * 3).div_ceil(10), |p| p as u32);
        let exact = decimals.min(MAX_DIGITS);
        let raw = self.raw();
        let magnitude = raw.magnitude();
        let mask = if Q == 0 { 0 } else { u128::MAX >> (128 - Q) };

        let mut integer = magnitude >> Q;
        let mut digits = fraction_digits(magnitude & mask, Q, exact);
        let unit = 10u128.pow(exact);
        if digits >= unit {
            integer += 1;
            digits -= unit;
        }

        let sign = if raw.is_negative() { "-" } else { "" };
        if decimals == 0 {
            return write!(f, "{sign}{integer}");
        }
        write!(f, "{sign}{integer}.{digits:0width$}", width = exact as usize)?;
        for _ in exact..decimals {
            f.write_str("0")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction_digits() {
        // 0.25
        assert_eq!(fraction_digits(64, 8, 3), 250);
        // 1/256 = 0.00390625
        assert_eq!(fraction_digits(1, 8, 3), 4);
        assert_eq!(fraction_digits(1, 8, 5), 391);
        // 0.5 with no digits rounds up to a whole unit
        assert_eq!(fraction_digits(128, 8, 0), 1);
        assert_eq!(fraction_digits(5, 0, 3), 0);
    }

    #[test]
    fn test_display_default_precision() {
        assert_eq!(Fixed::<8>::from_raw(832).to_string(), "3.250");
        assert_eq!(Fixed::<4>::from_raw(20).to_string(), "1.25");
        assert_eq!(Fixed::<16>::from_int(-7).to_string(), "-7.00000");
        assert_eq!(Fixed::<0>::from_raw(42).to_string(), "42");
    }

    #[test]
    fn test_display_carries_into_integer() {
        // 0.99609375 rounds to 1.00
        assert_eq!(format!("{:.2}", Fixed::<8>::from_raw(255)), "1.00");
        assert_eq!(format!("{:.0}", Fixed::<8>::from_raw(-384)), "-2");
    }

    #[test]
    fn test_display_extreme_values() {
        assert_eq!(format!("{:.1}", Fixed::<4, i8>::min_value()), "-8.0");
        assert_eq!(format!("{:.4}", Fixed::<4, u8>::max_value()), "15.9375");
    }

    #[test]
    fn test_display_beyond_exact_digits() {
        // default precision for Q127 is 39 digits
        let tiny = Fixed::<127, i128>::from_raw(1);
        assert_eq!(tiny.to_string(), format!("0.{}", "0".repeat(39)));
        let half = Fixed::<127, i128>::from_raw(1 << 126);
        assert_eq!(half.to_string(), format!("0.5{}", "0".repeat(38)));

        let lsb = Fixed::<8>::from_raw(1);
        assert_eq!(format!("{:.40}", lsb), format!("0.00390625{}", "0".repeat(32)));
        assert_eq!(format!("{:.40}", -Fixed::<8>::from_int(2)), format!("-2.{}", "0".repeat(40)));
    }

    #[test]
    fn test_fraction_digits_clamps() {
        assert_eq!(fraction_digits(1, 1, 50), 5 * 10u128.pow(MAX_DIGITS - 1));
    }
}
