use tracing::info;

use crate::bail;
use crate::concurrency::handoff::create_handoff_channel;
use crate::destination::Destination;
use crate::error::{ErrorKind, FerryResult};
use crate::source::Source;
use crate::workers::base::{Worker, WorkerHandle};
use crate::workers::read::{ReadWorker, ReadWorkerHandle};
use crate::workers::write::{WriteWorker, WriteWorkerHandle};

#[derive(Debug)]
enum PipelineState {
    NotStarted,
    Started {
        read_worker: ReadWorkerHandle,
        write_worker: WriteWorkerHandle,
    },
}

pub type PipelineId = u64;

/// Coordinator for one source-to-destination run.
///
/// A [`Pipeline`] owns a source and a destination, connects them with the
/// single-slot handoff channel, and drives the two workers to completion. The
/// source is moved into the read worker and the destination into the write worker
/// when the pipeline starts; afterwards each endpoint is touched by exactly one
/// worker.
#[derive(Debug)]
pub struct Pipeline<S, D> {
    id: PipelineId,
    source: Option<S>,
    destination: Option<D>,
    state: PipelineState,
}

impl<S, D> Pipeline<S, D>
where
    S: Source + Send + 'static,
    D: Destination + Send + 'static,
{
    pub fn new(id: PipelineId, source: S, destination: D) -> Self {
        Self {
            id,
            source: Some(source),
            destination: Some(destination),
            state: PipelineState::NotStarted,
        }
    }

    pub fn id(&self) -> PipelineId {
        self.id
    }

    /// Creates the handoff channel and spawns both workers.
    ///
    /// Returns immediately after spawning; completion is observed via [`Pipeline::wait`].
    pub async fn start(&mut self) -> FerryResult<()> {
        info!("starting pipeline with id {}", self.id);

        let (Some(source), Some(destination)) = (self.source.take(), self.destination.take())
        else {
            bail!(
                ErrorKind::InvalidState,
                "Pipeline already started",
                detail = "a pipeline can start its workers only once"
            );
        };

        let (handoff_tx, handoff_rx) = create_handoff_channel();

        let read_worker = ReadWorker::new(self.id, source, handoff_tx).start().await?;
        let write_worker = WriteWorker::new(self.id, destination, handoff_rx)
            .start()
            .await?;

        self.state = PipelineState::Started {
            read_worker,
            write_worker,
        };

        Ok(())
    }

    /// Waits for both workers to complete.
    ///
    /// Worker errors are collected, so a run where both workers failed reports both
    /// failures. Returns `Ok` only when both workers completed cleanly, which
    /// implies the destination has been fully written and closed.
    pub async fn wait(self) -> FerryResult<()> {
        let PipelineState::Started {
            read_worker,
            write_worker,
        } = self.state
        else {
            info!("pipeline was not started, nothing to wait for");

            return Ok(());
        };

        info!("waiting for pipeline workers to complete");

        let mut errors = vec![];

        // The read worker exits first on the clean path, right after publishing end
        // of stream, so it is waited on first.
        if let Err(err) = read_worker.wait().await {
            errors.push(err);
        }

        if let Err(err) = write_worker.wait().await {
            errors.push(err);
        }

        if !errors.is_empty() {
            return Err(errors.into());
        }

        info!("pipeline {} completed successfully", self.id);

        Ok(())
    }

    /// Starts the pipeline and waits for it to complete.
    ///
    /// This is the one-call surface for batch invocations: it returns `Ok` only
    /// once every record has been processed and the destination closed.
    pub async fn run(mut self) -> FerryResult<()> {
        self.start().await?;
        self.wait().await
    }
}
