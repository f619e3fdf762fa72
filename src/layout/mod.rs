//! Text overlay layout: fixed caption/title styling and caption segmentation.

pub mod segment;
pub mod text;
