//! Event stream output: wire encoders and console formatting

pub mod console;
pub mod encoder;
pub mod writer;
