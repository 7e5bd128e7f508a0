use crate::bail;
use crate::destination::Destination;
use crate::error::{ErrorKind, FerryResult};

/// Destination that injects a write failure after a fixed number of accepted
/// records.
///
/// Used to drive the pipeline's failure paths: the write worker propagates the
/// injected [`ErrorKind::DestinationIoError`], and the read worker subsequently
/// observes the closed handoff channel.
#[derive(Debug)]
pub struct FailingDestination {
    remaining_writes: usize,
}

impl FailingDestination {
    /// Creates a destination that accepts `writes` records and fails on the next
    /// one.
    pub fn failing_after(writes: usize) -> Self {
        Self {
            remaining_writes: writes,
        }
    }
}

impl Destination for FailingDestination {
    fn name() -> &'static str {
        "failing"
    }

    async fn write_record(&mut self, value: i64) -> FerryResult<()> {
        if self.remaining_writes == 0 {
            bail!(
                ErrorKind::DestinationIoError,
                "Injected write failure",
                detail = format!("record {value} rejected")
            );
        }
        self.remaining_writes -= 1;

        Ok(())
    }
}

/// Destination that panics after accepting a fixed number of records.
///
/// Used to drive the panic-mapping path of the write worker handle: the task
/// unwinds mid-run, and waiting on the pipeline must surface
/// [`ErrorKind::WriteWorkerPanic`](crate::error::ErrorKind::WriteWorkerPanic)
/// instead of propagating the panic.
#[derive(Debug)]
pub struct PanickingDestination {
    remaining_writes: usize,
}

impl PanickingDestination {
    /// Creates a destination that accepts `writes` records and panics on the next
    /// one.
    pub fn panicking_after(writes: usize) -> Self {
        Self {
            remaining_writes: writes,
        }
    }
}

impl Destination for PanickingDestination {
    fn name() -> &'static str {
        "panicking"
    }

    async fn write_record(&mut self, value: i64) -> FerryResult<()> {
        if self.remaining_writes == 0 {
            panic!("injected destination panic on record {value}");
        }
        self.remaining_writes -= 1;

        Ok(())
    }
}
