//! Transient storage for uploaded order files.
//!
//! Every request parks its files under unique names in the uploads dir, so
//! concurrent submissions never collide. The files exist only long enough to
//! be attached to the outbound summary message.

use std::path::Path;

use actix_multipart::form::tempfile::TempFile;
use futures::future::join_all;
use tokio::fs;
use uuid::Uuid;

use crate::domain::entities::upload::StoredUpload;
use crate::errors::OrderError;

/// Moves one multipart temp file into the uploads dir under a uuid name.
/// MIME type is sniffed from content (tolerant: unknown types are kept and
/// attached without one).
pub async fn store_upload(uploads_dir: &str, file: &TempFile) -> Result<StoredUpload, OrderError> {
    fs::create_dir_all(uploads_dir).await?;

    let file_name = file
        .file_name
        .clone()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| "upload".to_string());

    let dest = Path::new(uploads_dir).join(Uuid::new_v4().to_string());
    fs::copy(file.file.path(), &dest).await?;

    let mime_type = infer::get_from_path(&dest)
        .ok()
        .flatten()
        .map(|kind| kind.mime_type().to_string());

    Ok(StoredUpload {
        path: dest,
        file_name,
        mime_type,
    })
}

/// Stores the payment slip plus every reference image. If any single store
/// fails, the ones already written are removed before the error surfaces.
pub async fn store_all(
    uploads_dir: &str,
    files: &[&TempFile],
) -> Result<Vec<StoredUpload>, OrderError> {
    let mut stored = Vec::with_capacity(files.len());

    for file in files {
        match store_upload(uploads_dir, file).await {
            Ok(upload) => stored.push(upload),
            Err(e) => {
                remove_stored_uploads(&stored).await;
                return Err(e);
            }
        }
    }

    Ok(stored)
}

/// Best-effort batch deletion. Failures are logged and never surfaced; the
/// response for the request has already been decided by the time this runs.
pub async fn remove_stored_uploads(uploads: &[StoredUpload]) {
    let results = join_all(uploads.iter().map(|u| fs::remove_file(&u.path))).await;

    for (upload, result) in uploads.iter().zip(results) {
        if let Err(e) = result {
            tracing::warn!(
                "failed to remove temp upload {}: {}",
                upload.path.display(),
                e
            );
        }
    }
}
