use ferry::bail;
use ferry::destination::file::FileDestination;
use ferry::error::{ErrorKind, FerryResult};
use ferry::pipeline::{Pipeline, PipelineId};
use ferry::source::file::FileSource;
use rand::random;
use tracing::{debug, info};

use crate::FerryArgs;
use crate::error::CliResult;

/// Starts the ferry pipeline for the provided arguments.
///
/// Opens the input and output files up front, so open failures surface before any
/// worker starts, then runs the pipeline to completion. The output file is closed
/// by the pipeline itself once the input is exhausted.
pub async fn start_ferry(args: FerryArgs) -> CliResult<()> {
    info!("starting ferry service");

    log_args(&args);
    validate_args(&args)?;

    let source = FileSource::open(&args.input).await?;
    let destination = FileDestination::create(&args.output).await?;

    let pipeline_id: PipelineId = random();
    let pipeline = Pipeline::new(pipeline_id, source, destination);

    info!(pipeline_id = pipeline.id(), "pipeline created");

    pipeline.run().await?;

    info!("ferry service completed");

    Ok(())
}

/// Rejects argument values that cannot name a file.
///
/// The command line parser already refuses empty `--input`/`--output` values, so
/// this guards arguments built programmatically, keeping the failure a typed
/// configuration error instead of a misleading open error.
fn validate_args(args: &FerryArgs) -> FerryResult<()> {
    if args.input.as_os_str().is_empty() {
        bail!(ErrorKind::ConfigError, "The input path must not be empty");
    }

    if args.output.as_os_str().is_empty() {
        bail!(ErrorKind::ConfigError, "The output path must not be empty");
    }

    Ok(())
}

fn log_args(args: &FerryArgs) {
    debug!(
        input = %args.input.display(),
        output = %args.output.display(),
        "ferry arguments"
    );
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn args(input: &str, output: &str) -> FerryArgs {
        FerryArgs {
            input: PathBuf::from(input),
            output: PathBuf::from(output),
        }
    }

    #[test]
    fn empty_paths_are_rejected_as_configuration_errors() {
        let err = validate_args(&args("", "out.txt")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigError);

        let err = validate_args(&args("in.txt", "")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigError);
    }

    #[test]
    fn non_empty_paths_pass_validation() {
        assert!(validate_args(&args("in.txt", "out.txt")).is_ok());
    }
}
