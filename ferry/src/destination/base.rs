use std::future::Future;

use crate::error::FerryResult;

/// Trait for ordered consumers of integer records leaving the pipeline.
///
/// [`Destination`] implementations define where records go. The pipeline moves the
/// destination into the write worker, which is the only component that ever touches
/// it, so the trait takes `&mut self` and implementations need no internal
/// synchronization. Records must be persisted in the order they are written.
///
/// The trait also provides an optional [`Destination::close`] method with a default
/// no-op implementation. Override this method if the destination buffers data or
/// holds a resource that must be released once the stream ends.
pub trait Destination {
    /// Returns the name of the destination.
    fn name() -> &'static str;

    /// Appends one record to the output.
    ///
    /// File-like destinations render the record as a base-10 integer followed by a
    /// newline. A failed write is fatal to the run; the write worker does not retry.
    fn write_record(&mut self, value: i64) -> impl Future<Output = FerryResult<()>> + Send;

    /// Flushes buffered records and releases the output resource.
    ///
    /// Called by the write worker exactly once, after the source reported end of
    /// stream and every record has been written. It is not called when the run
    /// fails, since partial output is not to be trusted. The default implementation
    /// is a no-op.
    fn close(&mut self) -> impl Future<Output = FerryResult<()>> + Send {
        async { Ok(()) }
    }
}
