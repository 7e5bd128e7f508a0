use crate::error::FerryResult;
use crate::source::Source;

/// Source that panics after yielding a fixed number of records.
///
/// Used to drive the panic-mapping path of the read worker handle: the task
/// unwinds mid-run, and waiting on the pipeline must surface
/// [`ErrorKind::ReadWorkerPanic`](crate::error::ErrorKind::ReadWorkerPanic)
/// instead of propagating the panic.
#[derive(Debug)]
pub struct PanickingSource {
    remaining_reads: usize,
}

impl PanickingSource {
    /// Creates a source that yields `reads` records and panics on the next read.
    pub fn panicking_after(reads: usize) -> Self {
        Self {
            remaining_reads: reads,
        }
    }
}

impl Source for PanickingSource {
    fn name() -> &'static str {
        "panicking"
    }

    async fn read_record(&mut self) -> FerryResult<Option<i64>> {
        if self.remaining_reads == 0 {
            panic!("injected source panic");
        }
        self.remaining_reads -= 1;

        Ok(Some(self.remaining_reads as i64))
    }
}
