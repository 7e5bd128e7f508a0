use std::num::ParseIntError;
use std::path::PathBuf;

use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};

use crate::error::{ErrorKind, FerryResult};
use crate::ferry_error;
use crate::source::Source;

/// File-backed [`Source`] reading one base-10 signed integer per line.
///
/// Lines are read through a buffered reader. Surrounding ASCII whitespace on a line
/// is tolerated and whitespace-only lines carry no record, matching the
/// whitespace-skipping behavior of the original stream format. Any other content
/// that does not parse as exactly one 64-bit integer fails the read with
/// [`ErrorKind::MalformedRecord`], and the diagnostic carries the file path, the
/// line number, and the offending content.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    lines: Lines<BufReader<File>>,
    line_number: u64,
}

impl FileSource {
    /// Opens the file at `path` for reading.
    ///
    /// Fails with [`ErrorKind::SourceOpenFailed`] when the file cannot be opened.
    pub async fn open(path: impl Into<PathBuf>) -> FerryResult<Self> {
        let path = path.into();

        let file = File::open(&path).await.map_err(|err| {
            ferry_error!(
                ErrorKind::SourceOpenFailed,
                "Failed to open the input file for reading",
                detail = path.display().to_string(),
                source: err
            )
        })?;

        Ok(Self {
            lines: BufReader::new(file).lines(),
            path,
            line_number: 0,
        })
    }
}

impl Source for FileSource {
    fn name() -> &'static str {
        "file"
    }

    async fn read_record(&mut self) -> FerryResult<Option<i64>> {
        loop {
            let line = self.lines.next_line().await.map_err(|err| {
                ferry_error!(
                    ErrorKind::SourceIoError,
                    "Failed to read a line from the input file",
                    detail = format!("{}:{}", self.path.display(), self.line_number + 1),
                    source: err
                )
            })?;

            let Some(line) = line else {
                return Ok(None);
            };
            self.line_number += 1;

            let Some(record) = parse_line(&line) else {
                continue;
            };

            return match record {
                Ok(value) => Ok(Some(value)),
                Err(err) => Err(ferry_error!(
                    ErrorKind::MalformedRecord,
                    "Input line is not a single base-10 integer",
                    detail = format!(
                        "{}:{}: {:?}",
                        self.path.display(),
                        self.line_number,
                        line.trim()
                    ),
                    source: err
                )),
            };
        }
    }
}

/// Parses one input line as a record.
///
/// Returns [`None`] for whitespace-only lines, which carry no record.
fn parse_line(line: &str) -> Option<Result<i64, ParseIntError>> {
    let record = line.trim();
    if record.is_empty() {
        return None;
    }

    Some(record.parse::<i64>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_and_signed_integers_parse() {
        assert_eq!(parse_line("42"), Some(Ok(42)));
        assert_eq!(parse_line("-17"), Some(Ok(-17)));
        assert_eq!(parse_line("+5"), Some(Ok(5)));
        assert_eq!(parse_line("0"), Some(Ok(0)));
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        assert_eq!(parse_line("  7  "), Some(Ok(7)));
        assert_eq!(parse_line("\t-1\t"), Some(Ok(-1)));
    }

    #[test]
    fn whitespace_only_lines_carry_no_record() {
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("   "), None);
        assert_eq!(parse_line("\t"), None);
    }

    #[test]
    fn non_numeric_content_is_rejected() {
        assert!(matches!(parse_line("abc"), Some(Err(_))));
        assert!(matches!(parse_line("12abc"), Some(Err(_))));
        assert!(matches!(parse_line("1.5"), Some(Err(_))));
        assert!(matches!(parse_line("0x10"), Some(Err(_))));
    }

    #[test]
    fn multiple_integers_on_one_line_are_rejected() {
        assert!(matches!(parse_line("12 34"), Some(Err(_))));
    }

    #[test]
    fn values_outside_the_64_bit_range_are_rejected() {
        assert_eq!(
            parse_line("9223372036854775807"),
            Some(Ok(i64::MAX))
        );
        assert!(matches!(
            parse_line("9223372036854775808"),
            Some(Err(_))
        ));
        assert_eq!(
            parse_line("-9223372036854775808"),
            Some(Ok(i64::MIN))
        );
        assert!(matches!(
            parse_line("-9223372036854775809"),
            Some(Err(_))
        ));
    }
}
