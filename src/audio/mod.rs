//! Additive audio mix planning over the master clock.

pub mod mix;
