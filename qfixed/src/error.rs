use thiserror::Error;

/// Errors reported by the checked fixed-point operations.
///
/// Implements `core::error::Error` with or without the `std` feature.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum FixedPointError {
    #[error("{op} overflowed the storage type")]
    Overflow { op: &'static str },

    #[error("division by a zero raw value")]
    DivisionByZero,

    #[error("Value {value} out of range for a fixed-point type with {frac_bits} fractional bits")]
    OutOfRange { value: f64, frac_bits: u32 },
}
