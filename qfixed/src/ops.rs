//! Operator implementations.
//!
//! Mixed-precision operands are widened into the left operand's type. A right
//! operand with more fractional bits than the left one is rejected at compile time;
//! reduce it first with `truncated_to` or `rounded_to`.
//!
//! Products and quotients do not all follow the same rounding policy:
//!
//! | expression              | result type        | raw result                             |
//! |-------------------------|--------------------|----------------------------------------|
//! | `a * b` (same type)     | `Fixed<Q, T>`      | `round_by(a * b, Q)`                   |
//! | `a *= b` (`b: Fixed<P>`)| `Fixed<Q, T>`      | `round_by(a * b, P)`                   |
//! | `a.mul_wide(b)`         | `Fixed<Q + P, T>`  | `a * b`, no rounding                   |
//! | `a / b` (same type)     | `T`                | `divide(a, b)`                         |
//! | `a /= b` (`b: Fixed<P>`)| `Fixed<Q, T>`      | `divide(a << (Q - P), b)`              |
//! | `a.div_narrow(b)`       | `Fixed<Q - P, T>`  | `divide(a << (Q - P), b)`              |
//! | `a * n`, `a / n` (int)  | `Fixed<Q, T>`      | `a * n`, `divide(a, n)`                |
//!
//! where `divide(x, y) = (y + (x >> 1)) / x`, see [`crate::rounding::divide`].

use core::cmp::Ordering;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Not, Sub, SubAssign};

use crate::fixed::Fixed;
use crate::rounding::{divide, round_by};
use crate::storage::Storage;

impl<const Q: u32, T: Storage, const P: u32, U: Storage> Add<Fixed<P, U>> for Fixed<Q, T> {
    type Output = Self;

    fn add(self, rhs: Fixed<P, U>) -> Self {
        Self::from_raw(self.raw().wrapping_add(Self::from_fixed(rhs).raw()))
    }
}

impl<const Q: u32, T: Storage, const P: u32, U: Storage> Sub<Fixed<P, U>> for Fixed<Q, T> {
    type Output = Self;

    fn sub(self, rhs: Fixed<P, U>) -> Self {
        Self::from_raw(self.raw().wrapping_sub(Self::from_fixed(rhs).raw()))
    }
}

impl<const Q: u32, T: Storage, const P: u32, U: Storage> AddAssign<Fixed<P, U>> for Fixed<Q, T> {
    fn add_assign(&mut self, rhs: Fixed<P, U>) {
        *self = *self + rhs;
    }
}

impl<const Q: u32, T: Storage, const P: u32, U: Storage> SubAssign<Fixed<P, U>> for Fixed<Q, T> {
    fn sub_assign(&mut self, rhs: Fixed<P, U>) {
        *self = *self - rhs;
    }
}

/// Same-type product, rounded back to `Q` fractional bits.
///
/// The intermediate `2Q`-bit product lives in `T`, so both operands need enough
/// headroom for it. Use [`Fixed::mul_wide`] to keep every bit.
impl<const Q: u32, T: Storage> Mul for Fixed<Q, T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::from_raw(round_by(self.raw().wrapping_mul(rhs.raw()), Q))
    }
}

/// In-place product with any precision, rounded by the right operand's fractional bits.
///
/// The product is formed in the left operand's storage, so the right operand's
/// precision must fit in it:
///
/// ```compile_fail
/// use qfixed::Fixed;
///
/// let mut a = Fixed::<4, i8>::from_raw(16);
/// a *= Fixed::<20, i32>::from_raw(1 << 20);
/// ```
impl<const Q: u32, T: Storage, const P: u32, U: Storage> MulAssign<Fixed<P, U>> for Fixed<Q, T> {
    fn mul_assign(&mut self, rhs: Fixed<P, U>) {
        const { assert!(P < T::BITS, "multiplier precision does not fit in the storage type") };
        *self = Self::from_raw(round_by(self.raw().wrapping_mul(rhs.raw().cast()), P));
    }
}

/// Same-type quotient. The fractional bits cancel, so the result is a plain integer.
impl<const Q: u32, T: Storage> Div for Fixed<Q, T> {
    type Output = T;

    fn div(self, rhs: Self) -> T {
        divide(self.raw(), rhs.raw())
    }
}

impl<const Q: u32, T: Storage, const P: u32, U: Storage> DivAssign<Fixed<P, U>> for Fixed<Q, T> {
    fn div_assign(&mut self, rhs: Fixed<P, U>) {
        const { assert!(P <= Q, "divisor precision exceeds the dividend precision") };
        *self = Self::from_raw(divide(self.raw() << (Q - P), rhs.raw().cast()));
    }
}

impl<const Q: u32, T: Storage> Fixed<Q, T> {
    /// Full-width product: `R` must equal `Q + P` and no bits are rounded away.
    ///
    /// The product is computed in the left operand's storage and wraps if it does
    /// not fit.
    ///
    /// ```
    /// use qfixed::Fixed;
    ///
    /// let a = Fixed::<8>::from_raw(384); // 1.5
    /// let b = Fixed::<4>::from_raw(40); // 2.5
    /// let c: Fixed<12> = a.mul_wide(b);
    /// assert_eq!(c.raw(), 384 * 40);
    /// ```
    pub fn mul_wide<const R: u32, const P: u32, U: Storage>(self, rhs: Fixed<P, U>) -> Fixed<R, T> {
        const { assert!(R == Q + P, "mul_wide yields the sum of both precisions") };
        Fixed::from_raw(self.raw().wrapping_mul(rhs.raw().cast()))
    }

    /// Cross-type quotient with `R == Q - P` fractional bits, computed as
    /// `divide(self << (Q - P), rhs)`.
    pub fn div_narrow<const R: u32, const P: u32, U: Storage>(self, rhs: Fixed<P, U>) -> Fixed<R, T> {
        const { assert!(P <= Q && R + P == Q, "div_narrow yields the difference of both precisions") };
        Fixed::from_raw(divide(self.raw() << (Q - P), rhs.raw().cast()))
    }
}

impl<const Q: u32, T: Storage> Neg for Fixed<Q, T> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::from_raw(self.raw().wrapping_neg())
    }
}

/// `!x` is `true` when `x` is zero.
impl<const Q: u32, T: Storage> Not for Fixed<Q, T> {
    type Output = bool;

    fn not(self) -> bool {
        self.is_zero()
    }
}

/// Orders two storage integers of possibly different types by value.
fn compare_storage<T: Storage, U: Storage>(lhs: T, rhs: U) -> Ordering {
    match (lhs.is_negative(), rhs.is_negative()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => lhs.magnitude().cmp(&rhs.magnitude()),
        (true, true) => rhs.magnitude().cmp(&lhs.magnitude()),
    }
}

// Integer parts (floored) are compared first, then the fractional bits aligned to the
// finer precision. Neither step shifts a raw value, so nothing is lost to overflow.
fn compare<const Q: u32, T: Storage, const P: u32, U: Storage>(lhs: Fixed<Q, T>, rhs: Fixed<P, U>) -> Ordering {
    compare_storage(lhs.integer_part(), rhs.integer_part()).then_with(|| {
        let finer = Q.max(P);
        let lhs_fraction = (lhs.raw() & Fixed::<Q, T>::fraction_mask()).magnitude() << (finer - Q);
        let rhs_fraction = (rhs.raw() & Fixed::<P, U>::fraction_mask()).magnitude() << (finer - P);
        lhs_fraction.cmp(&rhs_fraction)
    })
}

impl<const Q: u32, T: Storage, const P: u32, U: Storage> PartialEq<Fixed<P, U>> for Fixed<Q, T> {
    fn eq(&self, other: &Fixed<P, U>) -> bool {
        compare(*self, *other) == Ordering::Equal
    }
}

impl<const Q: u32, T: Storage> Eq for Fixed<Q, T> {}

impl<const Q: u32, T: Storage, const P: u32, U: Storage> PartialOrd<Fixed<P, U>> for Fixed<Q, T> {
    fn partial_cmp(&self, other: &Fixed<P, U>) -> Option<Ordering> {
        Some(compare(*self, *other))
    }
}

impl<const Q: u32, T: Storage> Ord for Fixed<Q, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw().cmp(&other.raw())
    }
}

// Plain integers of the storage type. Add/sub scale the integer; mul/div use it as is,
// so no fractional bits are added and no extra headroom is spent.
macro_rules! scalar_ops {
    ($($t:ty),* $(,)?) => {
        $(
            impl<const Q: u32> Add<$t> for Fixed<Q, $t> {
                type Output = Self;

                fn add(self, rhs: $t) -> Self {
                    self + Self::from_int(rhs)
                }
            }

            impl<const Q: u32> Sub<$t> for Fixed<Q, $t> {
                type Output = Self;

                fn sub(self, rhs: $t) -> Self {
                    self - Self::from_int(rhs)
                }
            }

            impl<const Q: u32> Mul<$t> for Fixed<Q, $t> {
                type Output = Self;

                fn mul(self, rhs: $t) -> Self {
                    Self::from_raw(self.raw().wrapping_mul(rhs))
                }
            }

            impl<const Q: u32> Div<$t> for Fixed<Q, $t> {
                type Output = Self;

                fn div(self, rhs: $t) -> Self {
                    Self::from_raw(divide(self.raw(), rhs))
                }
            }

            impl<const Q: u32> AddAssign<$t> for Fixed<Q, $t> {
                fn add_assign(&mut self, rhs: $t) {
                    *self = *self + rhs;
                }
            }

            impl<const Q: u32> SubAssign<$t> for Fixed<Q, $t> {
                fn sub_assign(&mut self, rhs: $t) {
                    *self = *self - rhs;
                }
            }

            impl<const Q: u32> MulAssign<$t> for Fixed<Q, $t> {
                fn mul_assign(&mut self, rhs: $t) {
                    *self = *self * rhs;
                }
            }

            impl<const Q: u32> DivAssign<$t> for Fixed<Q, $t> {
                fn div_assign(&mut self, rhs: $t) {
                    *self = *self / rhs;
                }
            }

            impl<const Q: u32> Add<Fixed<Q, $t>> for $t {
                type Output = Fixed<Q, $t>;

                fn add(self, rhs: Fixed<Q, $t>) -> Fixed<Q, $t> {
                    rhs + self
                }
            }

            impl<const Q: u32> Sub<Fixed<Q, $t>> for $t {
                type Output = Fixed<Q, $t>;

                fn sub(self, rhs: Fixed<Q, $t>) -> Fixed<Q, $t> {
                    Fixed::<Q, $t>::from_int(self) - rhs
                }
            }

            impl<const Q: u32> Mul<Fixed<Q, $t>> for $t {
                type Output = Fixed<Q, $t>;

                fn mul(self, rhs: Fixed<Q, $t>) -> Fixed<Q, $t> {
                    rhs * self
                }
            }

            impl<const Q: u32> PartialEq<$t> for Fixed<Q, $t> {
                fn eq(&self, other: &$t) -> bool {
                    compare(*self, Fixed::<0, $t>::from_raw(*other)) == Ordering::Equal
                }
            }

            impl<const Q: u32> PartialOrd<$t> for Fixed<Q, $t> {
                fn partial_cmp(&self, other: &$t) -> Option<Ordering> {
                    Some(compare(*self, Fixed::<0, $t>::from_raw(*other)))
                }
            }

            impl<const Q: u32> PartialEq<Fixed<Q, $t>> for $t {
                fn eq(&self, other: &Fixed<Q, $t>) -> bool {
                    other == self
                }
            }

            impl<const Q: u32> PartialOrd<Fixed<Q, $t>> for $t {
                fn partial_cmp(&self, other: &Fixed<Q, $t>) -> Option<Ordering> {
                    Some(compare(Fixed::<0, $t>::from_raw(*self), *other))
                }
            }
        )*
    };
}

scalar_ops!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
