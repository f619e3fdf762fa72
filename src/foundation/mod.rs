//! Shared primitives: the microsecond clock, the error taxonomy, hashing.

pub mod clock;
pub mod error;
pub(crate) mod math;
