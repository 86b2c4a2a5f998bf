//! `f64` interoperability, enabled by the `float` feature.
//!
//! Floats are converted to the raw representation first and the operation then runs on
//! integers. Rounding uses `floor(x + 0.5)`, the same half-toward-+inf rule as
//! [`Fixed::rounded_to`]; truncation uses an `as` cast and goes toward zero.

use core::cmp::Ordering;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

use crate::error::FixedPointError;
use crate::fixed::Fixed;
use crate::storage::Storage;

/// `floor(value + 0.5)` without relying on `std` or `libm`.
fn round_half_up(value: f64) -> f64 {
    let shifted = value + 0.5;
    let truncated = shifted as i128 as f64;
    if truncated > shifted { truncated - 1.0 } else { truncated }
}

impl<const Q: u32, T: Storage> Fixed<Q, T> {
    const SCALE: f64 = (1u128 << Q) as f64;

    fn truncated_raw(value: f64) -> T {
        T::from_f64(value * Self::SCALE)
    }

    fn rounded_raw(value: f64) -> T {
        T::from_f64(round_half_up(value * Self::SCALE))
    }

    /// Creates a value from an `f64`, rounding to the nearest representable value.
    ///
    /// Out-of-range values saturate at the storage limits.
    ///
    /// ```
    /// use qfixed::Fixed;
    ///
    /// let x = Fixed::<8>::from_f64(-2.3);
    /// assert_eq!(x.raw(), -589);
    /// ```
    pub fn from_f64(value: f64) -> Self {
        Self::rounded(value)
    }

    /// Creates a value from an `f64`, rounding halves toward positive infinity.
    pub fn rounded(value: f64) -> Self {
        Self::from_raw(Self::rounded_raw(value))
    }

    /// Creates a value from an `f64`, dropping the bits below `2^-Q` toward zero.
    pub fn truncated(value: f64) -> Self {
        Self::from_raw(Self::truncated_raw(value))
    }

    /// Checked counterpart of [`Fixed::rounded`]: fails instead of saturating.
    ///
    /// ```
    /// use qfixed::{Fixed, FixedPointError};
    ///
    /// let x = Fixed::<16, i32>::try_from_f64(3.14159)?;
    /// assert!((x.to_f64() - 3.14159).abs() < 1e-4);
    ///
    /// // Out of range
    /// assert!(Fixed::<4, i8>::try_from_f64(100.0).is_err());
    /// # Ok::<(), FixedPointError>(())
    /// ```
    pub fn try_from_f64(value: f64) -> Result<Self, FixedPointError> {
        let scaled = round_half_up(value * Self::SCALE);
        if !value.is_finite() || scaled < T::MIN.to_f64() || scaled > T::MAX.to_f64() {
            return Err(FixedPointError::OutOfRange { value, frac_bits: Q });
        }
        Ok(Self::from_raw(T::from_f64(scaled)))
    }

    pub fn to_f64(self) -> f64 {
        self.raw().to_f64() / Self::SCALE
    }

    pub fn set_truncated_f64(&mut self, value: f64) {
        *self = Self::truncated(value);
    }

    pub fn set_rounded_f64(&mut self, value: f64) {
        *self = Self::rounded(value);
    }
}

#[cfg(feature = "half_support")]
impl<const Q: u32, T: Storage> Fixed<Q, T> {
    /// Creates a value from a half-precision float, rounding like [`Fixed::rounded`].
    pub fn from_f16(value: half::f16) -> Self {
        Self::rounded(value.to_f64())
    }

    pub fn to_f16(self) -> half::f16 {
        half::f16::from_f64(self.to_f64())
    }
}

impl<const Q: u32, T: Storage> Add<f64> for Fixed<Q, T> {
    type Output = Self;

    fn add(self, rhs: f64) -> Self {
        Self::from_raw(self.raw().wrapping_add(Self::rounded_raw(rhs)))
    }
}

impl<const Q: u32, T: Storage> Sub<f64> for Fixed<Q, T> {
    type Output = Self;

    fn sub(self, rhs: f64) -> Self {
        Self::from_raw(self.raw().wrapping_sub(Self::rounded_raw(rhs)))
    }
}

/// Scales the raw value by a float. The precision stays at `Q`.
impl<const Q: u32, T: Storage> Mul<f64> for Fixed<Q, T> {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::from_raw(T::from_f64(round_half_up(self.raw().to_f64() * rhs)))
    }
}

impl<const Q: u32, T: Storage> Div<f64> for Fixed<Q, T> {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::from_raw(T::from_f64(round_half_up(self.raw().to_f64() / rhs)))
    }
}

impl<const Q: u32, T: Storage> AddAssign<f64> for Fixed<Q, T> {
    fn add_assign(&mut self, rhs: f64) {
        *self = *self + rhs;
    }
}

impl<const Q: u32, T: Storage> SubAssign<f64> for Fixed<Q, T> {
    fn sub_assign(&mut self, rhs: f64) {
        *self = *self - rhs;
    }
}

impl<const Q: u32, T: Storage> MulAssign<f64> for Fixed<Q, T> {
    fn mul_assign(&mut self, rhs: f64) {
        *self = *self * rhs;
    }
}

impl<const Q: u32, T: Storage> DivAssign<f64> for Fixed<Q, T> {
    fn div_assign(&mut self, rhs: f64) {
        *self = *self / rhs;
    }
}

/// The float is rounded to this type before comparing, so values closer than half an
/// LSB compare equal.
impl<const Q: u32, T: Storage> PartialEq<f64> for Fixed<Q, T> {
    fn eq(&self, other: &f64) -> bool {
        self.raw() == Self::rounded_raw(*other)
    }
}

impl<const Q: u32, T: Storage> PartialOrd<f64> for Fixed<Q, T> {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        Some(self.raw().cmp(&Self::rounded_raw(*other)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Q4 = Fixed<4>;
    type Q8 = Fixed<8>;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-588.8), -589.0);
        assert_eq!(round_half_up(-0.2), 0.0);
    }

    #[test]
    fn test_from_f64() {
        assert_eq!(Q8::from_f64(1.5).raw(), 384);
        assert_eq!(Q8::from_f64(-2.3).raw(), -589);
        assert_eq!(Q4::from_f64(1.1).raw(), 18);
        assert_eq!(Fixed::<12>::from_f64(3.3).raw(), 13517);
    }

    #[test]
    fn test_truncated_goes_toward_zero() {
        assert_eq!(Q8::truncated(3.001).raw(), 768);
        assert_eq!(Q8::truncated(-2.3).raw(), -588);
        assert_eq!(Q8::rounded(3.001).raw(), 768);
    }

    #[test]
    fn test_try_from_f64() {
        assert_eq!(Q8::try_from_f64(-2.3), Ok(Q8::from_raw(-589)));
        assert_eq!(Fixed::<4, i8>::try_from_f64(7.9).unwrap().raw(), 126);
        assert_eq!(
            Fixed::<4, i8>::try_from_f64(8.0),
            Err(FixedPointError::OutOfRange { value: 8.0, frac_bits: 4 })
        );
        assert!(Fixed::<4, u8>::try_from_f64(-0.5).is_err());
        assert!(Q8::try_from_f64(f64::NAN).is_err());
    }

    #[test]
    fn test_to_f64() {
        assert_eq!(Q8::from_raw(-320).to_f64(), -1.25);
        assert_eq!(Fixed::<36, i64>::from_int(3).to_f64(), 3.0);
    }

    #[test]
    fn test_setters() {
        let mut a = Q8::ZERO;
        a.set_truncated_f64(3.2);
        assert_eq!(a.raw(), 819);
        a.set_rounded_f64(3.3);
        assert_eq!(a.raw(), 845);
    }

    #[test]
    fn test_saturates_out_of_range() {
        assert_eq!(Fixed::<4, i8>::from_f64(100.0).raw(), i8::MAX);
        assert_eq!(Fixed::<4, u8>::from_f64(-3.0).raw(), 0);
    }

    #[test]
    fn test_float_arithmetic() {
        let a = Q8::from_int(2);
        assert_eq!((a + 0.5).raw(), 640);
        assert_eq!((a - 0.25).raw(), 448);
        assert_eq!((a * 1.5).raw(), 768);
        assert_eq!((a / 3.0).raw(), 171);

        let mut b = a;
        b += 1.0;
        b -= 0.5;
        b *= 2.0;
        b /= 4.0;
        assert_eq!(b.raw(), 320);
    }

    #[test]
    fn test_float_comparisons() {
        let a = Q8::from_f64(3.2);
        assert!(a == 3.2);
        assert!(a == 3.201);
        assert!(a < 3.3);
        assert!(a > 3.1);
    }

    #[cfg(feature = "half_support")]
    #[test]
    fn test_f16_roundtrip() {
        let x = Q8::from_f16(half::f16::from_f32(-1.25));
        assert_eq!(x.raw(), -320);
        assert_eq!(x.to_f16().to_f32(), -1.25);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_roundtrip_within_half_lsb(value in -8_000_000.0f64..8_000_000.0) {
                let fixed = Q8::rounded(value);
                prop_assert!((fixed.to_f64() - value).abs() <= 0.5 / 256.0 + 1e-9);
            }

            #[test]
            fn test_truncated_error_below_one_lsb(value in -1000.0f64..1000.0) {
                let fixed = Fixed::<16>::truncated(value);
                prop_assert!((fixed.to_f64() - value).abs() < 1.0 / 65536.0);
            }
        }
    }
}
