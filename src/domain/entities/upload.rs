use std::path::PathBuf;

/// One uploaded file parked in transient storage, waiting to be attached to
/// the outbound summary message. Deleted unconditionally once the send
/// attempt completes.
#[derive(Debug, Clone)]
pub struct StoredUpload {
    /// Unique on-disk location under the uploads dir.
    pub path: PathBuf,
    /// Original client-side file name, used for the attachment.
    pub file_name: String,
    pub mime_type: Option<String>,
}
