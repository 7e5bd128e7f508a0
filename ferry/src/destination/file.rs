use std::path::PathBuf;

use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::destination::Destination;
use crate::error::{ErrorKind, FerryResult};
use crate::ferry_error;

/// File-backed [`Destination`] writing one base-10 signed integer per line.
///
/// Writes go through a buffered writer, so records only reach the file system once
/// the buffer fills or [`Destination::close`] flushes it. The buffer is deliberately
/// not flushed when a run fails: output of a failed run carries no guarantees.
#[derive(Debug)]
pub struct FileDestination {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl FileDestination {
    /// Creates (or truncates) the file at `path` for writing.
    ///
    /// Fails with [`ErrorKind::DestinationOpenFailed`] when the file cannot be
    /// created.
    pub async fn create(path: impl Into<PathBuf>) -> FerryResult<Self> {
        let path = path.into();

        let file = File::create(&path).await.map_err(|err| {
            ferry_error!(
                ErrorKind::DestinationOpenFailed,
                "Failed to create the output file for writing",
                detail = path.display().to_string(),
                source: err
            )
        })?;

        Ok(Self {
            writer: BufWriter::new(file),
            path,
        })
    }
}

impl Destination for FileDestination {
    fn name() -> &'static str {
        "file"
    }

    async fn write_record(&mut self, value: i64) -> FerryResult<()> {
        let line = format!("{value}\n");

        self.writer.write_all(line.as_bytes()).await.map_err(|err| {
            ferry_error!(
                ErrorKind::DestinationIoError,
                "Failed to write a record to the output file",
                detail = format!("{}: record {}", self.path.display(), value),
                source: err
            )
        })
    }

    async fn close(&mut self) -> FerryResult<()> {
        self.writer.flush().await.map_err(|err| {
            ferry_error!(
                ErrorKind::DestinationIoError,
                "Failed to flush the output file",
                detail = self.path.display().to_string(),
                source: err
            )
        })
    }
}
