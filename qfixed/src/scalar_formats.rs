//! Common Q-format type aliases.
//!
//! The naming convention is `QF` for `F` fractional bits in the default `i32`
//! storage, `UQF` for `u32` storage and `BigQF` for `i64` storage.

/// Q4 in 32 bits.
///
/// Range: [-134217728.0, 134217727.9375]
/// Precision: 0.0625
pub type Q4 = crate::Fixed<4>;

/// Q8 in 32 bits.
///
/// Range: [-8388608.0, 8388607.99609375]
/// Precision: ~0.00390625
pub type Q8 = crate::Fixed<8>;

/// Q12 in 32 bits.
///
/// Range: [-524288.0, 524287.999755859]
/// Precision: ~0.000244141
pub type Q12 = crate::Fixed<12>;

/// Q16 in 32 bits (16.16).
///
/// Range: [-32768.0, 32767.999984741]
/// Precision: ~0.000015259
pub type Q16 = crate::Fixed<16>;

/// Q18 in 32 bits.
///
/// Range: [-8192.0, 8191.999996185]
/// Precision: ~0.000003815
pub type Q18 = crate::Fixed<18>;

/// Unsigned Q8 in 32 bits.
///
/// Range: [0.0, 16777215.99609375]
pub type UQ8 = crate::Fixed<8, u32>;

/// Unsigned Q16 in 32 bits.
///
/// Range: [0.0, 65535.999984741]
pub type UQ16 = crate::Fixed<16, u32>;

/// Q18 in 64 bits, enough headroom for a full Q18 × Q18 product.
pub type BigQ18 = crate::Fixed<18, i64>;

/// Q36 in 64 bits.
///
/// Range: [-134217728.0, 134217727.99999999]
pub type BigQ36 = crate::Fixed<36, i64>;
