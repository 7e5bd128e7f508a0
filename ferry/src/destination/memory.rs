use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::trace;

use crate::destination::Destination;
use crate::error::FerryResult;

#[derive(Debug)]
struct Inner {
    records: Vec<i64>,
    closed: bool,
}

/// In-memory destination for testing and development purposes.
///
/// [`MemoryDestination`] stores all written records in memory. Cloning it yields a
/// handle to the same storage, so tests can keep a clone, let the pipeline consume
/// the destination, and inspect the captured records afterward.
///
/// # Examples
///
/// ```rust
/// use ferry::destination::memory::MemoryDestination;
/// use ferry::pipeline::Pipeline;
/// use ferry::source::memory::MemorySource;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let source = MemorySource::new([1, 2, 3, 4]);
/// let destination = MemoryDestination::new();
///
/// // Keep a clone to inspect what was written after the run.
/// let pipeline = Pipeline::new(1, source, destination.clone());
/// pipeline.run().await?;
///
/// assert_eq!(destination.records().await, vec![1, 2, 2, 3, 4, 4]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MemoryDestination {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryDestination {
    /// Creates a new empty memory destination.
    pub fn new() -> Self {
        let inner = Inner {
            records: Vec::new(),
            closed: false,
        };

        Self {
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    /// Returns a copy of all records written to this destination, in write order.
    pub async fn records(&self) -> Vec<i64> {
        let inner = self.inner.lock().await;
        inner.records.clone()
    }

    /// Returns whether the destination was closed after a clean end of stream.
    pub async fn closed(&self) -> bool {
        let inner = self.inner.lock().await;
        inner.closed
    }

    /// Clears all stored records and the closed marker.
    ///
    /// Useful for resetting the destination state between tests.
    pub async fn clear(&self) {
        let mut inner = self.inner.lock().await;
        inner.records.clear();
        inner.closed = false;
    }
}

impl Default for MemoryDestination {
    fn default() -> Self {
        Self::new()
    }
}

impl Destination for MemoryDestination {
    fn name() -> &'static str {
        "memory"
    }

    async fn write_record(&mut self, value: i64) -> FerryResult<()> {
        let mut inner = self.inner.lock().await;

        trace!(value, "storing record in memory");
        inner.records.push(value);

        Ok(())
    }

    async fn close(&mut self) -> FerryResult<()> {
        let mut inner = self.inner.lock().await;
        inner.closed = true;

        Ok(())
    }
}
