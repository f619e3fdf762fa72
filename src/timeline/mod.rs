//! The timeline aggregate and the scheduler that validates and assembles it.

pub mod model;
pub mod schedule;
