use tokio::task::JoinHandle;
use tracing::{Instrument, info, trace};

use crate::bail;
use crate::concurrency::handoff::{Handoff, HandoffRx};
use crate::destination::Destination;
use crate::error::{ErrorKind, FerryError, FerryResult};
use crate::ferry_error;
use crate::pipeline::PipelineId;
use crate::transform::emit_count;
use crate::workers::base::{Worker, WorkerHandle};

/// Handle for awaiting the write worker.
#[derive(Debug)]
pub struct WriteWorkerHandle {
    handle: Option<JoinHandle<FerryResult<()>>>,
}

impl WorkerHandle for WriteWorkerHandle {
    /// Waits for the write worker to complete execution.
    ///
    /// This method blocks until the write worker finishes, either because it
    /// observed end of stream and closed the destination or because a write failed.
    /// A panic inside the worker task is converted into an
    /// [`ErrorKind::WriteWorkerPanic`] error.
    async fn wait(mut self) -> FerryResult<()> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };

        handle.await.map_err(|err| {
            ferry_error!(ErrorKind::WriteWorkerPanic, "Write worker panicked", source: err)
        })??;

        Ok(())
    }
}

/// Worker that receives records from the read worker and writes them out.
///
/// [`WriteWorker`] exclusively owns the destination: no other component touches the
/// output. Each received record is written once or twice according to its parity,
/// and taking the value out of the single-slot channel is what releases the read
/// worker to produce the next record. After a clean end of stream the worker closes
/// the destination, so a successful wait implies the output is fully written and
/// flushed.
#[derive(Debug)]
pub struct WriteWorker<D> {
    pipeline_id: PipelineId,
    destination: D,
    handoff_rx: HandoffRx,
}

impl<D> WriteWorker<D> {
    /// Creates a new write worker writing to `destination` and receiving from
    /// `handoff_rx`.
    pub fn new(pipeline_id: PipelineId, destination: D, handoff_rx: HandoffRx) -> Self {
        Self {
            pipeline_id,
            destination,
            handoff_rx,
        }
    }
}

impl<D> WriteWorker<D>
where
    D: Destination + Send + 'static,
{
    /// Writes received records until end of stream, then closes the destination.
    ///
    /// The destination is not closed when the run fails: output of a failed run
    /// carries no guarantees, and the buffered tail of a file destination is
    /// dropped rather than flushed.
    async fn run(mut self) -> FerryResult<()> {
        let mut records_written: u64 = 0;

        loop {
            match self.handoff_rx.recv().await {
                Some(Handoff::Record(value)) => {
                    for _ in 0..emit_count(value) {
                        self.destination.write_record(value).await?;
                        records_written += 1;
                    }
                    trace!(value, "record written to destination");
                }
                Some(Handoff::EndOfStream) => break,
                None => {
                    bail!(
                        ErrorKind::HandoffClosed,
                        "Read worker stopped before signaling end of stream"
                    );
                }
            }
        }

        self.destination.close().await?;

        info!(records_written, "write worker completed successfully");

        Ok(())
    }
}

impl<D> Worker<WriteWorkerHandle> for WriteWorker<D>
where
    D: Destination + Send + 'static,
{
    type Error = FerryError;

    /// Spawns the write worker and returns a handle for monitoring.
    async fn start(self) -> Result<WriteWorkerHandle, Self::Error> {
        info!(destination = D::name(), "starting write worker");

        let write_worker_span =
            tracing::info_span!("write_worker", pipeline_id = self.pipeline_id);
        let handle = tokio::spawn(self.run().instrument(write_worker_span.or_current()));

        Ok(WriteWorkerHandle {
            handle: Some(handle),
        })
    }
}
