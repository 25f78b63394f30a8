//! Attachment lifecycle — cleanup of uploaded artifacts.
//!
//! ERROR HANDLING
//! ==============
//! Deletion is best-effort and fully decoupled from the relay: the
//! `deleteMessage` broadcast proceeds whether or not the artifact could be
//! removed. Failures are logged server-side and never surfaced to any peer.

use std::path::{Component, Path, PathBuf};

use tracing::{info, warn};

use crate::state::AppState;

/// Public URL prefix under which uploads are served and referenced.
pub const UPLOADS_PREFIX: &str = "/uploads/";

#[derive(Debug, thiserror::Error)]
pub enum AttachmentError {
    #[error("file path is not an upload reference: {0}")]
    NotAnUpload(String),
    #[error("failed to remove attachment: {0}")]
    Io(#[from] std::io::Error),
}

/// Resolve a client-supplied `filePath` to a file inside the upload
/// directory. Only bare `/uploads/<name>` references are accepted; anything
/// with traversal components is rejected.
fn resolve(upload_dir: &Path, file_path: &str) -> Result<PathBuf, AttachmentError> {
    let Some(name) = file_path.strip_prefix(UPLOADS_PREFIX) else {
        return Err(AttachmentError::NotAnUpload(file_path.to_owned()));
    };
    let name_path = Path::new(name);
    let mut components = name_path.components();
    let is_bare_name = matches!(components.next(), Some(Component::Normal(_))) && components.next().is_none();
    if name.is_empty() || !is_bare_name {
        return Err(AttachmentError::NotAnUpload(file_path.to_owned()));
    }
    Ok(upload_dir.join(name))
}

/// Remove the artifact referenced by a deleted message.
///
/// # Errors
///
/// Returns an error if the reference does not point inside the upload
/// directory or the filesystem removal fails.
pub async fn remove(upload_dir: &Path, file_path: &str) -> Result<(), AttachmentError> {
    let target = resolve(upload_dir, file_path)?;
    tokio::fs::remove_file(&target).await?;
    info!(file_path, "attachment removed");
    Ok(())
}

/// Spawn a fire-and-forget cleanup task. The relay never waits on it.
pub fn remove_fire_and_forget(state: &AppState, file_path: &str) {
    let upload_dir = state.upload_dir.clone();
    let file_path = file_path.to_owned();
    tokio::spawn(async move {
        if let Err(e) = remove(&upload_dir, &file_path).await {
            warn!(error = %e, file_path, "attachment cleanup failed");
        }
    });
}

#[cfg(test)]
#[path = "attachment_test.rs"]
mod tests;
