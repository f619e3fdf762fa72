//! Encoder boundary: render plans leave the process here.

pub mod ffmpeg;
