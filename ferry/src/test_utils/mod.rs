//! Testing utilities for exercising complete pipeline runs.
//!
//! These helpers cover the recurring needs of the integration suite: building
//! pipelines with fresh random ids, creating uniquely named scratch files for the
//! file-backed endpoints, and injecting endpoint failures and panics to drive the
//! error paths. They are compiled only for tests and behind the `test-utils`
//! feature.

pub mod destination;
pub mod file;
pub mod pipeline;
pub mod source;
