//! File upload response type.

use serde::Serialize;

/// Summary of an uploaded file.
///
/// ```json
/// {
///   "filename": "report.csv",
///   "size": 1024
/// }
/// ```
///
/// `filename` is `null` when the multipart part carries no file name.
#[derive(Debug, PartialEq, Serialize)]
pub struct UploadResponse {
    pub filename: Option<String>,
    pub size: u64,
}
