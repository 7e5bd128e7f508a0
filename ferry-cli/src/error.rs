use ferry::error::FerryError;
use std::backtrace::Backtrace;
use std::error::Error;
use std::fmt;

/// Returns whether terminal output should include backtraces.
fn should_render_backtrace() -> bool {
    matches!(
        std::env::var("RUST_BACKTRACE").as_deref(),
        Ok("1") | Ok("full")
    )
}

/// Result type for ferry binary operations.
pub type CliResult<T> = Result<T, CliError>;

/// Captured backtrace wrapper to avoid thiserror's unstable feature detection.
pub struct CapturedBacktrace(Backtrace);

impl CapturedBacktrace {
    /// Captures a new backtrace for an error variant.
    fn capture() -> Self {
        Self(Backtrace::capture())
    }
}

impl fmt::Debug for CapturedBacktrace {
    /// Renders the wrapped backtrace for debugging output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for the ferry binary.
///
/// Wraps [`FerryError`] for pipeline errors and provides variants for
/// infrastructure errors.
#[derive(Debug)]
pub enum CliError {
    /// Pipeline-related error.
    Ferry(FerryError),
    /// Configuration error.
    Config(Box<dyn Error + Send + Sync>, CapturedBacktrace),
    /// I/O error.
    Io(std::io::Error, CapturedBacktrace),
}

impl CliError {
    /// Returns a short category label for this error.
    pub fn category(&self) -> &'static str {
        match self {
            CliError::Ferry(_) => "pipeline error",
            CliError::Config(_, _) => "configuration error",
            CliError::Io(_, _) => "i/o error",
        }
    }

    /// Returns the backtrace for this error.
    pub fn backtrace(&self) -> Option<&Backtrace> {
        match self {
            CliError::Ferry(err) => err.backtrace(),
            CliError::Config(_, cb) => Some(&cb.0),
            CliError::Io(_, cb) => Some(&cb.0),
        }
    }

    /// Creates a configuration error from any boxed source.
    pub fn config<E: Error + Send + Sync + 'static>(err: E) -> Self {
        CliError::Config(Box::new(err), CapturedBacktrace::capture())
    }

    /// Returns a user-oriented report for terminal output.
    ///
    /// Aggregated pipeline errors render one cause chain per inner error, keyed to
    /// the numbered entries in the error display.
    pub fn render_report(&self) -> String {
        let mut out = String::new();
        out.push_str("ferry failed\n");
        out.push_str(&format!("category: {}\n", self.category()));
        out.push_str(&format!("error: {}\n", self));

        if let CliError::Ferry(err) = self
            && let Some(inner_errors) = err.errors()
        {
            for (index, inner) in inner_errors.iter().enumerate() {
                let mut source = Error::source(inner);
                let mut idx = 1usize;
                while let Some(cause) = source {
                    out.push_str(&format!("cause {}.{idx}: {cause}\n", index + 1));
                    source = cause.source();
                    idx += 1;
                }
            }
        } else {
            let mut source = Error::source(self);
            let mut idx = 1usize;
            while let Some(cause) = source {
                out.push_str(&format!("cause {idx}: {cause}\n"));
                source = cause.source();
                idx += 1;
            }
        }

        if should_render_backtrace()
            && let Some(backtrace) = self.backtrace()
        {
            out.push_str("backtrace:\n");
            out.push_str(&backtrace.to_string());
            if !out.ends_with('\n') {
                out.push('\n');
            }
        }

        out
    }
}

impl fmt::Display for CliError {
    /// Renders a user-focused one-line description for terminal and log output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Ferry(err) => write!(f, "{err}"),
            CliError::Config(source, _) => write!(f, "configuration error: {source}"),
            CliError::Io(source, _) => write!(f, "i/o error: {source}"),
        }
    }
}

impl Error for CliError {
    /// Returns the direct cause for this error variant.
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CliError::Ferry(err) => err.source(),
            CliError::Config(source, _) => Some(source.as_ref()),
            CliError::Io(source, _) => Some(source),
        }
    }
}

impl From<std::io::Error> for CliError {
    /// Converts an I/O error into an I/O error variant.
    fn from(err: std::io::Error) -> Self {
        CliError::Io(err, CapturedBacktrace::capture())
    }
}

impl From<FerryError> for CliError {
    /// Converts a pipeline error into a ferry error variant.
    fn from(err: FerryError) -> Self {
        CliError::Ferry(err)
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use ferry::error::ErrorKind;
    use ferry::ferry_error;

    use super::*;

    #[test]
    fn single_error_report_walks_the_cause_chain() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "no such file");
        let err = CliError::from(ferry_error!(
            ErrorKind::SourceOpenFailed,
            "failed to open source file",
            source: io_err
        ));

        let report = err.render_report();
        assert!(
            report.contains("category: pipeline error"),
            "report: {report}"
        );
        assert!(report.contains("cause 1: no such file"), "report: {report}");
    }

    #[test]
    fn aggregate_report_renders_each_inner_cause() {
        let parse_err = "abc".parse::<i64>().unwrap_err();
        let err = CliError::from(FerryError::from(vec![
            ferry_error!(
                ErrorKind::MalformedRecord,
                "record is not an integer",
                source: parse_err
            ),
            ferry_error!(ErrorKind::HandoffClosed, "handoff channel closed"),
        ]));

        let report = err.render_report();
        assert!(
            report.contains("category: pipeline error"),
            "report: {report}"
        );
        assert!(
            report.contains("cause 1.1: invalid digit found in string"),
            "report: {report}"
        );
        // The second inner error carries no source, so no chain is rendered for it.
        assert!(!report.contains("cause 2.1"), "report: {report}");
    }
}
