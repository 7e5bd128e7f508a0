//! Concurrency primitives coordinating the pipeline workers.
//!
//! The pipeline runs exactly two workers, and the only coordination between them is
//! the single-slot [`handoff`] channel. There is deliberately no shutdown signal and
//! no timeout: a run goes to completion or fails, and channel closure is how each
//! worker learns that its peer terminated abnormally.

pub mod handoff;
