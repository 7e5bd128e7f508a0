//! Worker implementations for the two halves of the pipeline.

pub mod base;
pub mod read;
pub mod write;
