//! Render plan emission: timeline plus policy in, encoder instructions out.

pub mod plan;
