use giapha_cloud::StorageError;
use giapha_core::error::CoreError;
use giapha_db::StoreError;

/// Errors returned by workflows.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A domain rule rejected the request.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The data store failed.
    #[error(transparent)]
    Store(StoreError),

    /// The object store failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type PipelineResult<T> = Result<T, PipelineError>;

impl From<StoreError> for PipelineError {
    /// Refusals and unique violations are domain errors; everything else
    /// stays a store failure.
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Rejected(e) => PipelineError::Core(e),
            StoreError::Conflict(constraint) => PipelineError::Core(CoreError::Conflict(
                format!("Dữ liệu đã tồn tại ({constraint})"),
            )),
            other => PipelineError::Store(other),
        }
    }
}
