//! # qfixed
//!
//! Fixed-point arithmetic with the precision tracked in the type, for targets
//! without (or avoiding) a floating-point unit.
//!
//! ## Features
//!
//! - `Fixed<Q, T>`: `Q` fractional bits stored in the integer `T` (`i32` by default)
//! - Widening conversions happen implicitly, narrowing ones must be named
//!   (`truncated_to`, `rounded_to`); mixing them up is a compile error
//! - Arithmetic costs the same as the underlying integer arithmetic and wraps on
//!   overflow; `checked_*` variants report errors instead
//! - Decimal constants without floating point via [`fixed_const!`]
//! - `f64` interoperability behind the `float` feature (default), `half::f16`
//!   behind `half_support`
//! - `no_std` when the `std` feature is disabled
//!
//! ## Examples
//!
//! ```
//! use qfixed::{fixed_const, Q4, Q8, Q12};
//!
//! let gain = fixed_const!(Q8, 1, 5);
//! let offset = Q4::from_raw(-3); // -0.1875
//!
//! // offset is widened to 8 fractional bits
//! let mut x = Q8::from_int(10) + offset;
//! x *= gain;
//! assert_eq!(x.to_string(), "14.719");
//!
//! // a Q12 operand must be reduced before it can be added to a Q8
//! let fine = Q12::from_f64(0.3);
//! x += fine.rounded_to::<8>();
//! assert_eq!(x.integer_part(), 15);
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]

mod checked;
mod decimal;
pub mod error;
pub mod fixed;
#[cfg(feature = "float")]
pub mod float;
#[doc(hidden)]
pub mod literal;
pub mod ops;
pub mod rounding;
pub mod scalar_formats;
pub mod storage;

pub use error::FixedPointError;
pub use fixed::Fixed;
pub use scalar_formats::*;
pub use storage::Storage;
