use bytemuck::{Pod, Zeroable};

use crate::decimal;
use crate::rounding::round_by;
use crate::storage::Storage;

/// A fixed-point number with `Q` fractional bits held in the integer type `T`.
///
/// The stored integer is the real value scaled by `2^Q`. Precision is part of the
/// type: a `Fixed<8>` and a `Fixed<12>` cannot be mixed unless the lower precision
/// operand can be widened exactly. Going the other way always needs a named
/// conversion ([`truncated_to`](Self::truncated_to) or
/// [`rounded_to`](Self::rounded_to)), and forgetting it is a compile error.
///
/// Arithmetic wraps on overflow. Keeping values in range is the caller's job.
///
/// # Type Parameters
///
/// - `Q`: Number of fractional bits (must be smaller than the width of `T`)
/// - `T`: Storage integer, `i32` by default
///
/// At least one bit always remains above the binary point, so `1` is representable and
/// [`one`](Self::one) and [`from_int`](Self::from_int) never lose their value to the
/// shift. Pure-fraction formats such as `[0, 1)` in a `u8` are therefore not
/// available; use the next wider storage (`Fixed<8, u16>`) instead:
///
/// ```compile_fail
/// use qfixed::Fixed;
///
/// let _ = Fixed::<8, u8>::from_raw(128);
/// ```
///
/// # Examples
///
/// ```
/// use qfixed::Fixed;
///
/// let a = Fixed::<8>::from_int(3);
/// let b = Fixed::<4>::from_raw(24); // 1.5
///
/// let sum = a + b; // b is widened to 8 fractional bits
/// assert_eq!(sum.raw(), 4 * 256 + 128);
///
/// let narrowed: Fixed<4> = sum.rounded_to::<4>();
/// assert_eq!(narrowed.raw(), 72);
/// ```
///
/// Narrowing without naming it does not compile:
///
/// ```compile_fail
/// use qfixed::Fixed;
///
/// let a = Fixed::<8>::from_int(3);
/// let c = Fixed::<12>::from_int(1);
/// let _ = a + c;
/// ```
#[derive(Debug, Clone, Copy, Default, Hash)]
#[repr(transparent)]
pub struct Fixed<const Q: u32, T: Storage = i32> {
    raw: T,
}

// Safety: Fixed is a transparent wrapper around a Pod integer
unsafe impl<const Q: u32, T: Storage> Zeroable for Fixed<Q, T> {}

unsafe impl<const Q: u32, T: Storage> Pod for Fixed<Q, T> {}

impl<const Q: u32, T: Storage> Fixed<Q, T> {
    /// Number of fractional bits of this type.
    pub const FRAC_BITS: u32 = Q;

    pub const ZERO: Self = Self { raw: T::ZERO };

    const PRECISION_FITS: () = assert!(Q < T::BITS, "fractional bits must be narrower than the storage type");

    /// Creates a value from a raw integer that already carries `Q` fractional bits.
    ///
    /// ```
    /// use qfixed::Fixed;
    ///
    /// // With 4 fractional bits, raw value 20 represents 1.25
    /// let x = Fixed::<4>::from_raw(20);
    /// assert_eq!(x.integer_part(), 1);
    /// assert_eq!(x.fractional_part(), 4);
    /// ```
    pub const fn from_raw(raw: T) -> Self {
        let () = Self::PRECISION_FITS;
        Self { raw }
    }

    /// Creates a value from a plain integer with no fractional bits.
    pub fn from_int(value: T) -> Self {
        Self::from_raw(value << Q)
    }

    /// Creates a value from a raw integer carrying `B` fractional bits, `B <= Q`.
    ///
    /// ```
    /// use qfixed::Fixed;
    ///
    /// let x = Fixed::<8>::from_scaled::<4>(20); // 1.25 at 4 bits
    /// assert_eq!(x.raw(), 320);
    /// ```
    pub fn from_scaled<const B: u32>(raw: T) -> Self {
        const { assert!(B <= Q, "source precision exceeds the target precision") };
        Self::from_raw(raw << (Q - B))
    }

    /// Creates a value from an integer part and the magnitude of a fractional part
    /// carrying `B` fractional bits. The sign comes from `integer_part`.
    ///
    /// ```
    /// use qfixed::Fixed;
    ///
    /// let x = Fixed::<4>::from_parts::<4>(-1, 4);
    /// assert_eq!(x.raw(), -20); // -1.25
    /// ```
    pub fn from_parts<const B: u32>(integer_part: T, abs_fractional_part: T) -> Self {
        const { assert!(B <= Q, "source precision exceeds the target precision") };
        let whole = integer_part << Q;
        let fraction = abs_fractional_part << (Q - B);
        if integer_part.is_negative() {
            Self::from_raw(whole.wrapping_sub(fraction))
        } else {
            Self::from_raw(whole.wrapping_add(fraction))
        }
    }

    /// Widens a value of lower or equal precision into this type.
    ///
    /// The storage is converted with `as` semantics before shifting.
    pub fn from_fixed<const P: u32, U: Storage>(value: Fixed<P, U>) -> Self {
        const { assert!(P <= Q, "implicit conversion would drop precision; use truncated_to or rounded_to") };
        Self::from_raw(value.raw.cast::<T>() << (Q - P))
    }

    /// Returns the raw integer, including the fractional bits.
    pub fn raw(self) -> T {
        self.raw
    }

    pub fn one() -> Self {
        Self::from_raw(T::ONE << Q)
    }

    /// Returns the maximum representable value.
    pub fn max_value() -> Self {
        Self::from_raw(T::MAX)
    }

    /// Returns the minimum representable value.
    pub fn min_value() -> Self {
        Self::from_raw(T::MIN)
    }

    pub fn is_zero(self) -> bool {
        self.raw == T::ZERO
    }

    pub(crate) fn fraction_mask() -> T {
        (T::ONE << Q).wrapping_sub(T::ONE)
    }
}

// Precision adjustment
impl<const Q: u32, T: Storage> Fixed<Q, T> {
    /// Drops fractional bits down to `R`, truncating toward negative infinity.
    ///
    /// ```
    /// use qfixed::Fixed;
    ///
    /// let x = Fixed::<8>::from_raw(-24); // -0.09375
    /// assert_eq!(x.truncated_to::<4>().raw(), -2);
    /// ```
    pub fn truncated_to<const R: u32>(self) -> Fixed<R, T> {
        const { assert!(R <= Q, "truncated_to can only reduce precision") };
        Fixed::from_raw(self.raw >> (Q - R))
    }

    /// Drops fractional bits down to `R`, rounding halves toward positive infinity.
    ///
    /// ```
    /// use qfixed::Fixed;
    ///
    /// assert_eq!(Fixed::<8>::from_raw(24).rounded_to::<4>().raw(), 2);
    /// assert_eq!(Fixed::<8>::from_raw(-24).rounded_to::<4>().raw(), -1);
    /// ```
    pub fn rounded_to<const R: u32>(self) -> Fixed<R, T> {
        const { assert!(R <= Q, "rounded_to can only reduce precision") };
        Fixed::from_raw(round_by(self.raw, Q - R))
    }

    /// Adds fractional bits up to `R`. Exact, but may overflow the storage.
    pub fn increased_to<const R: u32>(self) -> Fixed<R, T> {
        const { assert!(R >= Q, "increased_to can only add precision") };
        Fixed::from_raw(self.raw << (R - Q))
    }

    /// [`truncated_to`](Self::truncated_to) into another storage type, inferred from
    /// the destination.
    ///
    /// ```
    /// use qfixed::Fixed;
    ///
    /// let wide = Fixed::<16, i64>::from_raw(-(3 << 16) - 1);
    /// let narrow: Fixed<8, i16> = wide.truncate_into();
    /// assert_eq!(narrow.raw(), -769);
    /// ```
    pub fn truncate_into<const R: u32, U: Storage>(self) -> Fixed<R, U> {
        const { assert!(R <= Q, "truncate_into can only reduce precision") };
        Fixed::from_raw((self.raw >> (Q - R)).cast())
    }

    /// [`rounded_to`](Self::rounded_to) into another storage type.
    pub fn round_into<const R: u32, U: Storage>(self) -> Fixed<R, U> {
        const { assert!(R <= Q, "round_into can only reduce precision") };
        Fixed::from_raw(round_by(self.raw, Q - R).cast())
    }

    /// [`increased_to`](Self::increased_to) into another storage type. The storage
    /// is converted before shifting, so widening into a larger type keeps the high bits.
    pub fn widen_into<const R: u32, U: Storage>(self) -> Fixed<R, U> {
        Fixed::from_fixed(self)
    }

    /// Adds the fractional bits of `other` to this value, keeping `other`'s storage.
    ///
    /// Dividing the result by `other` yields a quotient at this value's own
    /// precision instead of losing `other`'s bits.
    ///
    /// ```
    /// use qfixed::Fixed;
    ///
    /// let a = Fixed::<8>::from_int(3);
    /// let b = Fixed::<12>::from_int(2);
    /// let wide: Fixed<20> = a.increased_by(b);
    /// assert_eq!(wide.raw(), 3 << 20);
    /// ```
    pub fn increased_by<const P: u32, const R: u32, U: Storage>(self, _other: Fixed<P, U>) -> Fixed<R, U> {
        const { assert!(R == Q + P, "increased_by yields the sum of both precisions") };
        Fixed::from_raw(self.raw.cast::<U>() << P)
    }

    /// Assigns a value of lower or equal precision.
    pub fn set<const P: u32, U: Storage>(&mut self, value: Fixed<P, U>) {
        *self = Self::from_fixed(value);
    }

    /// Assigns a value of higher or equal precision, truncating the extra bits.
    pub fn set_truncated<const P: u32, U: Storage>(&mut self, value: Fixed<P, U>) {
        *self = value.truncate_into();
    }

    /// Assigns a value of higher or equal precision, rounding the extra bits.
    pub fn set_rounded<const P: u32, U: Storage>(&mut self, value: Fixed<P, U>) {
        *self = value.round_into();
    }
}

// Decomposition
impl<const Q: u32, T: Storage> Fixed<Q, T> {
    /// The integer bits. Floors for negative values, so `-1.25` gives `-2`.
    pub fn integer_part(self) -> T {
        self.raw >> Q
    }

    /// The fractional bits with the sign of the value, so `-1.25` at 4 bits gives `-4`.
    pub fn fractional_part(self) -> T {
        if self.raw.is_negative() {
            (self.raw.wrapping_neg() & Self::fraction_mask()).wrapping_neg()
        } else {
            self.raw & Self::fraction_mask()
        }
    }

    pub fn absolute_fractional_part(self) -> T {
        self.raw.wrapping_abs() & Self::fraction_mask()
    }

    /// Magnitude of the raw value.
    pub fn absolute(self) -> T {
        self.raw.wrapping_abs()
    }

    /// The fractional part as a base-10 integer with `decimals` digits (at most 36 are
    /// computed), for printing without floating point: `format!("{}.{:03}", x.integer_part(), x.decimal_fraction_places(3))`.
    ///
    /// ```
    /// use qfixed::Fixed;
    ///
    /// let x = Fixed::<8>::from_raw(832); // 3.25
    /// assert_eq!(x.decimal_fraction_places(3), 250);
    /// ```
    pub fn decimal_fraction_places(self, decimals: u32) -> T {
        let fraction = self.absolute_fractional_part().magnitude();
        T::wrap_from_i128(decimal::fraction_digits(fraction, Q, decimals) as i128)
    }
}

// Zero-copy views
impl<const Q: u32, T: Storage> Fixed<Q, T> {
    /// Reinterprets a slice of values as their raw integers.
    pub fn as_raw_slice(values: &[Self]) -> &[T] {
        bytemuck::cast_slice(values)
    }

    /// Reinterprets a slice of raw integers as values with `Q` fractional bits.
    pub fn from_raw_slice(raw: &[T]) -> &[Self] {
        bytemuck::cast_slice(raw)
    }

    /// Returns the bytes of a slice of values in native endianness.
    pub fn as_bytes(values: &[Self]) -> &[u8] {
        bytemuck::cast_slice(values)
    }
}

impl<const Q: u32, T: Storage> From<T> for Fixed<Q, T> {
    fn from(value: T) -> Self {
        Self::from_int(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Q4 = Fixed<4>;
    type Q8 = Fixed<8>;
    type Q12 = Fixed<12>;

    #[test]
    fn test_from_int() {
        assert_eq!(Q8::from_int(3).raw(), 768);
        assert_eq!(Q8::from_int(-2).raw(), -512);
        assert_eq!(Q8::from(1).raw(), 256);
    }

    #[test]
    fn test_from_scaled() {
        assert_eq!(Q8::from_scaled::<8>(123).raw(), 123);
        assert_eq!(Q8::from_scaled::<0>(123).raw(), 123 << 8);
        assert_eq!(Q8::from_scaled::<4>(-3).raw(), -48);
    }

    #[test]
    fn test_from_parts() {
        assert_eq!(Q4::from_parts::<4>(-1, 4).raw(), -20);
        assert_eq!(Q4::from_parts::<4>(1, 4).raw(), 20);
        assert_eq!(Q8::from_parts::<4>(2, 8).raw(), 512 + 128);
        assert_eq!(Q8::from_parts::<4>(0, 8).raw(), 128);
    }

    #[test]
    fn test_from_fixed_widens() {
        let a4 = Q4::from_raw(-19);
        assert_eq!(Q8::from_fixed(a4).raw(), -19 * 16);
        assert_eq!(Fixed::<36, i64>::from_fixed(Q8::from_raw(-300)).raw(), -300i64 << 28);
    }

    #[test]
    fn test_constants() {
        assert_eq!(Q8::ZERO.raw(), 0);
        assert_eq!(Q8::one().raw(), 256);
        assert_eq!(Q8::FRAC_BITS, 8);
        assert_eq!(Fixed::<4, u8>::max_value().raw(), 255);
        assert_eq!(Fixed::<4, i8>::min_value().raw(), -128);
        assert!(Q8::default().is_zero());
    }

    #[test]
    fn test_narrowing() {
        let x = Q12::from_raw(0x1238); // low nibble exactly half
        assert_eq!(x.truncated_to::<8>().raw(), 0x123);
        assert_eq!(x.rounded_to::<8>().raw(), 0x124);
        assert_eq!(x.rounded_to::<12>(), x);

        let n = Q12::from_raw(-0x1238);
        assert_eq!(n.truncated_to::<8>().raw(), -0x124);
        assert_eq!(n.rounded_to::<8>().raw(), -0x123);
    }

    #[test]
    fn test_increased_to() {
        assert_eq!(Q4::from_raw(-5).increased_to::<12>().raw(), -5 << 8);
    }

    #[test]
    fn test_storage_changing_conversions() {
        let wide = Fixed::<18, i64>::from_raw((5 << 18) + (1 << 9));
        let rounded: Q8 = wide.round_into();
        assert_eq!(rounded.raw(), (5 << 8) + 1);
        let truncated: Q8 = wide.truncate_into();
        assert_eq!(truncated.raw(), 5 << 8);

        let widened: Fixed<36, i64> = Q8::from_raw(-1).widen_into();
        assert_eq!(widened.raw(), -1i64 << 28);
    }

    #[test]
    fn test_increased_by() {
        let a = Q8::from_raw(100);
        let b = Fixed::<4, i64>::from_int(1);
        let wide: Fixed<12, i64> = a.increased_by(b);
        assert_eq!(wide.raw(), 1600i64);
    }

    #[test]
    fn test_setters() {
        let mut a = Q8::ZERO;
        a.set(Q4::from_raw(3));
        assert_eq!(a.raw(), 48);
        a.set_truncated(Q12::from_raw(0x1238));
        assert_eq!(a.raw(), 0x123);
        a.set_rounded(Q12::from_raw(0x1238));
        assert_eq!(a.raw(), 0x124);
    }

    #[test]
    fn test_decomposition_positive() {
        let x = Q4::from_raw(20); // 1.25
        assert_eq!(x.integer_part(), 1);
        assert_eq!(x.fractional_part(), 4);
        assert_eq!(x.absolute_fractional_part(), 4);
        assert_eq!(x.absolute(), 20);
    }

    #[test]
    fn test_decomposition_negative() {
        let x = Q4::from_raw(-20); // -1.25
        assert_eq!(x.integer_part(), -2);
        assert_eq!(x.fractional_part(), -4);
        assert_eq!(x.absolute_fractional_part(), 4);
        assert_eq!(x.absolute(), 20);
    }

    #[test]
    fn test_decimal_fraction_places() {
        assert_eq!(Q8::from_raw(832).decimal_fraction_places(3), 250);
        assert_eq!(Q8::from_raw(1).decimal_fraction_places(3), 4);
        assert_eq!(Q8::from_raw(-832).decimal_fraction_places(2), 25);
        assert_eq!(Fixed::<0>::from_raw(7).decimal_fraction_places(3), 0);
    }

    #[test]
    fn test_unsigned_storage() {
        let x = Fixed::<8, u32>::from_raw(0x1_80);
        assert_eq!(x.integer_part(), 1);
        assert_eq!(x.fractional_part(), 0x80);
        assert_eq!(x.absolute(), 0x180);
    }

    #[test]
    fn test_slice_views() {
        let values = [Q8::from_int(1), Q8::from_raw(-1)];
        assert_eq!(Q8::as_raw_slice(&values), &[256, -1]);
        assert_eq!(Q8::as_bytes(&values).len(), 8);

        let raw = [512i32, 64];
        let view = Q8::from_raw_slice(&raw);
        assert_eq!(view[0], Q8::from_int(2));
        assert_eq!(view[1].raw(), 64);
    }
}
