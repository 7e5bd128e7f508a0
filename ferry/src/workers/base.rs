use std::future::Future;

use crate::error::FerryResult;

/// Trait for the background workers of the pipeline.
///
/// [`Worker`] defines the interface for starting the two workers that move records
/// through the pipeline. Workers return handles that can be used to wait for
/// completion.
///
/// The generic parameter `H` represents the handle type returned when the worker
/// starts.
pub trait Worker<H>
where
    H: WorkerHandle,
{
    /// Error type returned when worker startup fails.
    type Error;

    /// Starts the worker and returns a handle for monitoring its execution.
    ///
    /// This method begins background processing and returns immediately with a
    /// handle; it does not wait for the worker to finish.
    fn start(self) -> impl Future<Output = Result<H, Self::Error>> + Send;
}

/// Handle for awaiting a running worker.
///
/// [`WorkerHandle`] enables waiting for worker completion. Waiting surfaces the
/// worker's own error when it failed, and converts a worker panic into a typed
/// error instead of unwinding into the coordinator.
pub trait WorkerHandle {
    /// Waits for the worker to complete and returns the final result.
    ///
    /// The handle is consumed by this operation.
    fn wait(self) -> impl Future<Output = FerryResult<()>> + Send;
}
