use std::future::Future;

use crate::error::FerryResult;

/// Trait for ordered producers of integer records feeding the pipeline.
///
/// [`Source`] implementations define where records come from. The pipeline moves the
/// source into the read worker, which is the only component that ever touches it, so
/// the trait takes `&mut self` and implementations need no internal synchronization.
///
/// Records must be produced in their original order, and a source must keep
/// returning `Ok(None)` once it has reported end of input.
pub trait Source {
    /// Returns the name of the source.
    fn name() -> &'static str;

    /// Reads the next record.
    ///
    /// Returns `Ok(Some(value))` for the next record, `Ok(None)` once the input is
    /// exhausted, and an error for I/O failures or content that does not parse as
    /// exactly one integer. Errors are fatal to the run; the read worker does not
    /// retry or resynchronize after a failed read.
    fn read_record(&mut self) -> impl Future<Output = FerryResult<Option<i64>>> + Send;
}
