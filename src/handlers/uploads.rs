//! File upload handler.

use axum::{
    Json,
    extract::{Multipart, multipart::MultipartRejection},
};

use crate::{error::AppError, models::upload::UploadResponse};

/// Name of the multipart part carrying the file.
const FILE_FIELD: &str = "file";

/// Receive a file and report its name and size.
///
/// # Endpoint
///
/// `POST /uploadfile/` with a `multipart/form-data` body containing a `file`
/// part. Other parts are ignored; the first `file` part wins.
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "filename": "report.csv",
///   "size": 1024
/// }
/// ```
///
/// The file is streamed and counted, never kept in memory as a whole.
///
/// # Errors
///
/// - **422**: not a multipart body, or no `file` part
/// - **413**: body exceeds the configured limit
pub async fn upload_file(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let mut multipart = multipart?;

    while let Some(mut field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().map(str::to_owned);
        let mut size: u64 = 0;
        while let Some(chunk) = field.chunk().await? {
            size += chunk.len() as u64;
        }

        tracing::info!(filename = ?filename, size, "file uploaded");
        return Ok(Json(UploadResponse { filename, size }));
    }

    Err(AppError::Validation(format!(
        "missing multipart field `{FILE_FIELD}`"
    )))
}
