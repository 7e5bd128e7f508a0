use std::path::PathBuf;

use uuid::Uuid;

use crate::error::FerryResult;

/// Returns a unique path in the system temp directory.
///
/// The uuid suffix keeps concurrently running tests from colliding on file names.
pub fn temp_file_path(prefix: &str) -> PathBuf {
    std::env::temp_dir().join(format!("{prefix}_{}.txt", Uuid::new_v4().simple()))
}

/// Writes `contents` to a uniquely named file in the temp directory and returns its
/// path.
pub async fn write_input_file(prefix: &str, contents: &str) -> FerryResult<PathBuf> {
    let path = temp_file_path(prefix);
    tokio::fs::write(&path, contents).await?;

    Ok(path)
}

/// Reads back the file at `path` as a string.
pub async fn read_output_file(path: &std::path::Path) -> FerryResult<String> {
    let contents = tokio::fs::read_to_string(path).await?;

    Ok(contents)
}
