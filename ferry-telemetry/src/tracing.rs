use std::sync::Once;

use thiserror::Error;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Log filter applied when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "info";

/// Errors that can occur while installing the global tracing subscriber.
#[derive(Debug, Error)]
pub enum TracingInitError {
    #[error("failed to install the global tracing subscriber: {0}")]
    SetSubscriber(#[from] tracing_subscriber::util::TryInitError),
}

/// Guard keeping the non-blocking log writer alive.
///
/// Dropping the guard flushes any buffered log lines, so binaries must hold it for
/// the lifetime of the process.
#[must_use]
pub struct LogFlusher {
    _guard: WorkerGuard,
}

/// Initializes tracing for a binary, logging to stdout through a non-blocking
/// writer.
///
/// The filter is taken from `RUST_LOG` and falls back to `info`. The returned
/// [`LogFlusher`] must be kept alive until the process exits, otherwise the tail of
/// the log output may be lost.
pub fn init_tracing(service_name: &str) -> Result<LogFlusher, TracingInitError> {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(writer))
        .try_init()?;

    info!(service_name, "tracing initialized");

    Ok(LogFlusher { _guard: guard })
}

/// Initializes tracing for tests.
///
/// The global subscriber can only be installed once per process, and the test
/// harness calls this from every test, so installation is guarded and later calls
/// are no-ops. Uses the test writer so log output stays captured per test.
pub fn init_test_tracing() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_test_writer())
            .init();
    });
}
