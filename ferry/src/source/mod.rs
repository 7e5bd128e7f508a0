//! Record sources feeding the pipeline.
//!
//! This module provides the core [`Source`] trait and implementations producing the
//! integer records the pipeline processes. A source is owned by the read worker and
//! is the only place input I/O and record parsing happen.

mod base;
pub mod file;
pub mod memory;

pub use base::Source;
