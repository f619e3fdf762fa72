//! Declarative animation names mapped onto pure transform functions.

pub mod ease;
pub mod policy;
