//! Raw document parsing and normalization into typed track records.

pub mod normalize;
pub mod raw;
