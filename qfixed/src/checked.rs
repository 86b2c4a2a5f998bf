//! Checked variants of the arithmetic operators.
//!
//! These produce exactly the same values as the wrapping operators whenever no error
//! is reported, so they can stand in for them in debug builds or tests.

use crate::error::FixedPointError;
use crate::fixed::Fixed;
use crate::rounding::{checked_divide, checked_round_by};
use crate::storage::Storage;

fn overflow(op: &'static str) -> FixedPointError {
    FixedPointError::Overflow { op }
}

impl<const Q: u32, T: Storage> Fixed<Q, T> {
    /// Widens `value` into this type, failing if the storage conversion or the shift
    /// loses bits.
    fn checked_widen<const P: u32, U: Storage>(value: Fixed<P, U>, op: &'static str) -> Result<T, FixedPointError> {
        const { assert!(P <= Q, "implicit conversion would drop precision; use truncated_to or rounded_to") };
        let converted: T = value.raw().cast();
        if converted.to_i128() != value.raw().to_i128() {
            return Err(overflow(op));
        }
        converted.checked_shl_exact(Q - P).ok_or(overflow(op))
    }

    /// ```
    /// use qfixed::{Fixed, FixedPointError};
    ///
    /// assert_eq!(Fixed::<4, i8>::checked_from_int(7)?.raw(), 112);
    /// assert!(Fixed::<4, i8>::checked_from_int(8).is_err());
    /// # Ok::<(), FixedPointError>(())
    /// ```
    pub fn checked_from_int(value: T) -> Result<Self, FixedPointError> {
        value.checked_shl_exact(Q).map(Self::from_raw).ok_or(overflow("from_int"))
    }

    pub fn checked_increased_to<const R: u32>(self) -> Result<Fixed<R, T>, FixedPointError> {
        const { assert!(R >= Q, "increased_to can only add precision") };
        self.raw().checked_shl_exact(R - Q).map(Fixed::from_raw).ok_or(overflow("increased_to"))
    }

    pub fn checked_add<const P: u32, U: Storage>(self, rhs: Fixed<P, U>) -> Result<Self, FixedPointError> {
        let rhs = Self::checked_widen(rhs, "add")?;
        self.raw().checked_add(rhs).map(Self::from_raw).ok_or(overflow("add"))
    }

    pub fn checked_sub<const P: u32, U: Storage>(self, rhs: Fixed<P, U>) -> Result<Self, FixedPointError> {
        let rhs = Self::checked_widen(rhs, "sub")?;
        self.raw().checked_sub(rhs).map(Self::from_raw).ok_or(overflow("sub"))
    }

    /// Checked same-type product, rounded like `a * b`.
    pub fn checked_mul(self, rhs: Self) -> Result<Self, FixedPointError> {
        self.raw()
            .checked_mul(rhs.raw())
            .and_then(|product| checked_round_by(product, Q))
            .map(Self::from_raw)
            .ok_or(overflow("mul"))
    }

    /// Checked same-type quotient, equal to `a / b`.
    ///
    /// The left operand is the value divided into the sum, so a zero `self` is the
    /// error case.
    ///
    /// ```
    /// use qfixed::{Fixed, FixedPointError};
    ///
    /// let zero = Fixed::<8>::ZERO;
    /// let one = Fixed::<8>::one();
    /// assert_eq!(zero.checked_div(one), Err(FixedPointError::DivisionByZero));
    /// ```
    pub fn checked_div(self, rhs: Self) -> Result<T, FixedPointError> {
        if self.is_zero() {
            return Err(FixedPointError::DivisionByZero);
        }
        checked_divide(self.raw(), rhs.raw()).ok_or(overflow("div"))
    }

    pub fn checked_neg(self) -> Result<Self, FixedPointError> {
        self.raw().checked_neg().map(Self::from_raw).ok_or(overflow("neg"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Q8 = Fixed<8>;

    #[test]
    fn test_checked_from_int() {
        assert_eq!(Q8::checked_from_int(-3).unwrap().raw(), -768);
        assert_eq!(
            Q8::checked_from_int(1 << 24),
            Err(FixedPointError::Overflow { op: "from_int" })
        );
    }

    #[test]
    fn test_checked_add_matches_wrapping() {
        let a = Q8::from_raw(1000);
        let b = Fixed::<4>::from_raw(-7);
        assert_eq!(a.checked_add(b).unwrap(), a + b);
        assert_eq!(a.checked_sub(b).unwrap(), a - b);
    }

    #[test]
    fn test_checked_add_overflow() {
        let a = Fixed::<4, i8>::from_raw(120);
        assert!(a.checked_add(Fixed::<4, i8>::from_raw(8)).is_err());
        // the widening shift itself overflows
        assert!(a.checked_add(Fixed::<0, i8>::from_raw(8)).is_err());
        // the storage conversion loses bits
        assert!(a.checked_sub(Fixed::<4, i32>::from_raw(1000)).is_err());
    }

    #[test]
    fn test_checked_mul() {
        let a = Q8::from_raw(384);
        let b = Q8::from_raw(640);
        assert_eq!(a.checked_mul(b).unwrap(), a * b);

        let big = Fixed::<4, i16>::from_int(100);
        assert_eq!(big.checked_mul(big), Err(FixedPointError::Overflow { op: "mul" }));
    }

    #[test]
    fn test_checked_div() {
        let a = Q8::from_raw(4);
        let b = Q8::from_raw(10);
        assert_eq!(a.checked_div(b), Ok(a / b));
        assert_eq!(Q8::ZERO.checked_div(b), Err(FixedPointError::DivisionByZero));
        // dividing into zero is fine with this rule
        assert_eq!(a.checked_div(Q8::ZERO), Ok(0));
    }

    #[test]
    fn test_checked_neg_and_increase() {
        assert_eq!(Q8::from_raw(5).checked_neg().unwrap().raw(), -5);
        assert!(Fixed::<4, i8>::min_value().checked_neg().is_err());

        assert_eq!(Fixed::<4, i16>::from_raw(3).checked_increased_to::<8>().unwrap().raw(), 48);
        assert!(Fixed::<4, i16>::from_int(100).checked_increased_to::<12>().is_err());
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_error_messages() {
        assert_eq!(
            FixedPointError::Overflow { op: "add" }.to_string(),
            "add overflowed the storage type"
        );
        assert_eq!(FixedPointError::DivisionByZero.to_string(), "division by a zero raw value");
    }
}
