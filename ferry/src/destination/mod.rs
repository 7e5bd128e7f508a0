//! Record destinations for the pipeline output.
//!
//! This module provides the core [`Destination`] trait and implementations for
//! persisting the records the pipeline emits. A destination is owned by the write
//! worker and is the only place output I/O happens.

mod base;
pub mod file;
pub mod memory;

pub use base::Destination;
