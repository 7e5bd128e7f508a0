use tokio::task::JoinHandle;
use tracing::{Instrument, info, trace};

use crate::bail;
use crate::concurrency::handoff::{Handoff, HandoffTx};
use crate::error::{ErrorKind, FerryError, FerryResult};
use crate::ferry_error;
use crate::pipeline::PipelineId;
use crate::source::Source;
use crate::workers::base::{Worker, WorkerHandle};

/// Handle for awaiting the read worker.
#[derive(Debug)]
pub struct ReadWorkerHandle {
    handle: Option<JoinHandle<FerryResult<()>>>,
}

impl WorkerHandle for ReadWorkerHandle {
    /// Waits for the read worker to complete execution.
    ///
    /// This method blocks until the read worker finishes, either because the source
    /// is exhausted or because a read failed. A panic inside the worker task is
    /// converted into an [`ErrorKind::ReadWorkerPanic`] error.
    async fn wait(mut self) -> FerryResult<()> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };

        handle.await.map_err(|err| {
            ferry_error!(ErrorKind::ReadWorkerPanic, "Read worker panicked", source: err)
        })??;

        Ok(())
    }
}

/// Worker that reads records from the source and hands them to the write worker.
///
/// [`ReadWorker`] exclusively owns the source: no other component touches the
/// input. Each record is sent into the single-slot handoff channel, so the worker
/// naturally blocks until the write worker has consumed the previous record. When
/// the source is exhausted the worker publishes [`Handoff::EndOfStream`] and exits
/// without waiting for the write worker to finish.
#[derive(Debug)]
pub struct ReadWorker<S> {
    pipeline_id: PipelineId,
    source: S,
    handoff_tx: HandoffTx,
}

impl<S> ReadWorker<S> {
    /// Creates a new read worker reading from `source` and sending into
    /// `handoff_tx`.
    pub fn new(pipeline_id: PipelineId, source: S, handoff_tx: HandoffTx) -> Self {
        Self {
            pipeline_id,
            source,
            handoff_tx,
        }
    }
}

impl<S> ReadWorker<S>
where
    S: Source + Send + 'static,
{
    /// Reads records until the source is exhausted, handing each one off in order.
    ///
    /// A failed read propagates immediately; the sender is dropped without an
    /// end-of-stream marker, which the write worker observes as abnormal
    /// termination.
    async fn run(mut self) -> FerryResult<()> {
        let mut records_read: u64 = 0;

        while let Some(value) = self.source.read_record().await? {
            records_read += 1;
            trace!(value, "record read from source");

            if self.handoff_tx.send(Handoff::Record(value)).await.is_err() {
                bail!(
                    ErrorKind::HandoffClosed,
                    "Write worker stopped before consuming a record",
                    detail = format!("record {value} was read but never written")
                );
            }
        }

        // A refused end-of-stream marker means the write worker already failed on
        // its own; that failure is reported through its handle.
        let _ = self.handoff_tx.send(Handoff::EndOfStream).await;

        info!(records_read, "read worker completed successfully");

        Ok(())
    }
}

impl<S> Worker<ReadWorkerHandle> for ReadWorker<S>
where
    S: Source + Send + 'static,
{
    type Error = FerryError;

    /// Spawns the read worker and returns a handle for monitoring.
    async fn start(self) -> Result<ReadWorkerHandle, Self::Error> {
        info!(source = S::name(), "starting read worker");

        let read_worker_span = tracing::info_span!("read_worker", pipeline_id = self.pipeline_id);
        let handle = tokio::spawn(self.run().instrument(read_worker_span.or_current()));

        Ok(ReadWorkerHandle {
            handle: Some(handle),
        })
    }
}
