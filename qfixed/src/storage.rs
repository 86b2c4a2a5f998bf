//! Integer types usable as the raw representation of a [`Fixed`](crate::Fixed) value.

use core::fmt::Debug;
use core::hash::Hash;
use core::ops::{BitAnd, Not, Shl, Shr};

use bytemuck::Pod;

mod sealed {
    pub trait Sealed {}
}

/// A primitive integer that can hold the combined integer and fractional bits of a
/// fixed-point value.
///
/// Arithmetic through this trait wraps on overflow, matching what the hardware does
/// for native integers in a release build. Right shifts on signed types are
/// arithmetic, so they floor toward negative infinity.
pub trait Storage:
    Copy
    + Default
    + Eq
    + Ord
    + Hash
    + Debug
    + Pod
    + Send
    + Sync
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
    + BitAnd<Output = Self>
    + Not<Output = Self>
    + sealed::Sealed
{
    /// Width of the type in bits.
    const BITS: u32;
    const ZERO: Self;
    const ONE: Self;
    const MIN: Self;
    const MAX: Self;

    fn wrapping_add(self, rhs: Self) -> Self;
    fn wrapping_sub(self, rhs: Self) -> Self;
    fn wrapping_mul(self, rhs: Self) -> Self;
    fn wrapping_div(self, rhs: Self) -> Self;
    fn wrapping_neg(self) -> Self;

    fn checked_add(self, rhs: Self) -> Option<Self>;
    fn checked_sub(self, rhs: Self) -> Option<Self>;
    fn checked_mul(self, rhs: Self) -> Option<Self>;
    fn checked_div(self, rhs: Self) -> Option<Self>;
    fn checked_neg(self) -> Option<Self>;

    fn is_negative(self) -> bool;

    /// Magnitude of the value, widened so that `MIN` of a signed type is representable.
    fn magnitude(self) -> u128;

    /// Sign-extends (or zero-extends) into an `i128`.
    fn to_i128(self) -> i128;

    /// Truncates an `i128` to this width, the way an `as` cast does.
    fn wrap_from_i128(value: i128) -> Self;

    #[cfg(feature = "float")]
    fn to_f64(self) -> f64;

    /// Saturating `as` cast from a float. `NaN` maps to zero.
    #[cfg(feature = "float")]
    fn from_f64(value: f64) -> Self;

    /// Converts between storage types with `as` semantics.
    #[inline]
    fn cast<U: Storage>(self) -> U {
        U::wrap_from_i128(self.to_i128())
    }

    /// Left shift that fails instead of discarding significant bits.
    #[inline]
    fn checked_shl_exact(self, bits: u32) -> Option<Self> {
        if bits >= Self::BITS {
            return if self == Self::ZERO { Some(self) } else { None };
        }
        let shifted = self << bits;
        ((shifted >> bits) == self).then_some(shifted)
    }

    /// Absolute value, wrapping for `MIN` of a signed type.
    #[inline]
    fn wrapping_abs(self) -> Self {
        if self.is_negative() { self.wrapping_neg() } else { self }
    }
}

macro_rules! storage_impl {
    ($($t:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $t {}

            impl Storage for $t {
                const BITS: u32 = <$t>::BITS;
                const ZERO: Self = 0;
                const ONE: Self = 1;
                const MIN: Self = <$t>::MIN;
                const MAX: Self = <$t>::MAX;

                #[inline]
                fn wrapping_add(self, rhs: Self) -> Self { <$t>::wrapping_add(self, rhs) }
                #[inline]
                fn wrapping_sub(self, rhs: Self) -> Self { <$t>::wrapping_sub(self, rhs) }
                #[inline]
                fn wrapping_mul(self, rhs: Self) -> Self { <$t>::wrapping_mul(self, rhs) }
                #[inline]
                fn wrapping_div(self, rhs: Self) -> Self { <$t>::wrapping_div(self, rhs) }
                #[inline]
                fn wrapping_neg(self) -> Self { <$t>::wrapping_neg(self) }

                #[inline]
                fn checked_add(self, rhs: Self) -> Option<Self> { <$t>::checked_add(self, rhs) }
                #[inline]
                fn checked_sub(self, rhs: Self) -> Option<Self> { <$t>::checked_sub(self, rhs) }
                #[inline]
                fn checked_mul(self, rhs: Self) -> Option<Self> { <$t>::checked_mul(self, rhs) }
                #[inline]
                fn checked_div(self, rhs: Self) -> Option<Self> { <$t>::checked_div(self, rhs) }
                #[inline]
                fn checked_neg(self) -> Option<Self> { <$t>::checked_neg(self) }

                #[inline]
                #[allow(unused_comparisons)]
                fn is_negative(self) -> bool { self < 0 }

                #[inline]
                fn magnitude(self) -> u128 {
                    if self.is_negative() {
                        (self as i128).unsigned_abs()
                    } else {
                        self as u128
                    }
                }

                #[inline]
                fn to_i128(self) -> i128 { self as i128 }
                #[inline]
                fn wrap_from_i128(value: i128) -> Self { value as $t }

                #[cfg(feature = "float")]
                #[inline]
                fn to_f64(self) -> f64 { self as f64 }
                #[cfg(feature = "float")]
                #[inline]
                fn from_f64(value: f64) -> Self { value as $t }
            }
        )*
    };
}

storage_impl! {
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
}
