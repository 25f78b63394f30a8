//! Attachment upload — thin multipart-to-disk store.
//!
//! Accepts a single `file` field, writes it under a timestamped name that
//! keeps the original extension, and returns the public path plus the
//! original name so the chat UI can render a download link. No metadata is
//! kept server-side; the stored file IS the record.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::info;

use crate::services::attachment::UPLOADS_PREFIX;
use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("no file uploaded")]
    MissingFile,
    #[error("malformed multipart request: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),
    #[error("failed to store upload: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::MissingFile | Self::Multipart(_) => StatusCode::BAD_REQUEST,
            Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub file_path: String,
    pub original_name: String,
}

/// `POST /upload` — store one multipart `file` field to the upload directory.
///
/// # Errors
///
/// 400 when the `file` field is absent or the body is malformed; 500 when the
/// write fails.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, UploadError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let original_name = field.file_name().unwrap_or("file").to_owned();
        let bytes = field.bytes().await?;

        let stored_name = stored_file_name(&original_name, now_ms());
        tokio::fs::write(state.upload_dir.join(&stored_name), &bytes).await?;

        let file_path = format!("{UPLOADS_PREFIX}{stored_name}");
        info!(file_path, original_name, size = bytes.len(), "attachment stored");
        return Ok(Json(UploadResponse { file_path, original_name }));
    }
    Err(UploadError::MissingFile)
}

/// Timestamped storage name keeping the original extension, so concurrent
/// uploads of files named alike never collide on disk.
fn stored_file_name(original_name: &str, timestamp_ms: i64) -> String {
    match Path::new(original_name).extension().and_then(|ext| ext.to_str()) {
        Some(ext) => format!("{timestamp_ms}.{ext}"),
        None => timestamp_ms.to_string(),
    }
}

fn now_ms() -> i64 {
    let Ok(dur) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(0)
}

#[cfg(test)]
#[path = "upload_test.rs"]
mod tests;
