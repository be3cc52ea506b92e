/// Errors from object storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The HTTP request could not be sent or its body not read.
    #[error("Storage request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The storage API answered with a non-success status.
    #[error("Storage API returned {status}: {body}")]
    Api { status: u16, body: String },

    /// Failure from a non-HTTP backend.
    #[error("Storage backend error: {0}")]
    Backend(String),
}
