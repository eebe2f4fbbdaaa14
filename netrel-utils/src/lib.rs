//! Utility library for the NETREL project

pub mod decimal;
pub mod other;

pub use decimal::{Decimal, DecimalError, MAX_PARSE_EXPONENT};
