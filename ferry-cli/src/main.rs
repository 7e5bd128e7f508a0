//! Ferry service binary.
//!
//! Initializes and runs the ferry pipeline that reads integers from an input file
//! and writes them to an output file, duplicating even values. Includes telemetry
//! and error reporting.

use clap::Parser;
use ferry_telemetry::tracing::init_tracing;
use std::path::PathBuf;
use tracing::error;

use crate::core::start_ferry;
use crate::error::{CliError, CliResult};

mod core;
mod error;

/// Command line arguments for the ferry binary.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct FerryArgs {
    /// Path of the input file, with one base-10 signed integer per line.
    #[arg(long)]
    pub input: PathBuf,

    /// Path of the output file. An existing file is truncated.
    #[arg(long)]
    pub output: PathBuf,
}

/// Entry point for the ferry binary.
///
/// Parses the command line, initializes tracing, starts the async runtime, and
/// launches the pipeline. Handles all errors and ensures a proper service
/// initialization sequence.
fn main() -> CliResult<()> {
    // Parse arguments first so usage errors surface before any other setup.
    let args = FerryArgs::parse();

    // Initialize tracing for the whole process.
    let _log_flusher = init_tracing(env!("CARGO_BIN_NAME")).map_err(CliError::config)?;

    // We start the runtime.
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async_main(args))?;

    Ok(())
}

/// Main async entry point that starts the ferry pipeline.
///
/// Launches the pipeline with the provided arguments and reports any failure
/// before propagating it.
async fn async_main(args: FerryArgs) -> CliResult<()> {
    // We start the pipeline and catch any errors.
    if let Err(err) = start_ferry(args).await {
        // One line for the log stream, the full report for the terminal.
        error!("{err}");
        eprintln!("{}", err.render_report());

        return Err(err);
    }

    Ok(())
}
