//! General utility module housing formatting and file helpers.
use pretty_bytes::converter::convert;

use std::path::Path;
use std::time::Duration;

use crate::types::UtilResult;

/// Converts a byte count to a `String` representation.
pub fn convert_bytes(bytes: u64) -> String {
    convert(bytes as f64).replacen(' ', "", 1)
}

/// Converts an elapsed `Duration` to a `String`, to millisecond precision.
pub fn convert_elapsed(elapsed: Duration) -> String {
    let trimmed = Duration::from_millis(elapsed.as_millis() as u64);
    humantime::format_duration(trimmed).to_string()
}

/// Retrieves the base name of a file path as a `String`.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// Reads a local file which is about to be uploaded.
///
/// The existence check is made up front so that a bad path is reported
/// before any connection to AWS is attempted.
pub async fn read_upload(path: &Path) -> UtilResult<Vec<u8>> {
    if !path.is_file() {
        return Err(format!("file {} does not exist", path.display()).into());
    }
    Ok(tokio::fs::read(path).await?)
}
