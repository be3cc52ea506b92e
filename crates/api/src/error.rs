use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use giapha_cloud::StorageError;
use giapha_core::error::CoreError;
use giapha_db::StoreError;
use giapha_pipeline::PipelineError;
use serde_json::json;

/// Message returned for every 5xx; details only go to the log.
const INTERNAL_MESSAGE: &str = "Đã có lỗi xảy ra, vui lòng thử lại sau";

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`] to produce `{ "error", "code" }` bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `giapha_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Store error: {0}")]
    Store(StoreError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Core(e) => AppError::Core(e),
            PipelineError::Store(e) => AppError::Store(e),
            PipelineError::Storage(e) => AppError::Storage(e),
        }
    }
}

impl From<StoreError> for AppError {
    /// Refusals and unique violations are domain errors; the rest are 500s.
    fn from(err: StoreError) -> Self {
        PipelineError::from(err).into()
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::BadRequest(format!("Dữ liệu tải lên không hợp lệ: {}", err.body_text()))
    }
}

impl From<MultipartRejection> for AppError {
    fn from(err: MultipartRejection) -> Self {
        tracing::debug!(error = %err.body_text(), "Rejected multipart request");
        AppError::BadRequest("Yêu cầu tải lên phải ở dạng multipart/form-data".into())
    }
}

impl From<JsonRejection> for AppError {
    fn from(err: JsonRejection) -> Self {
        tracing::debug!(error = %err.body_text(), "Rejected JSON body");
        let message = match err {
            JsonRejection::MissingJsonContentType(_) => {
                "Nội dung yêu cầu phải là application/json"
            }
            JsonRejection::JsonSyntaxError(_) => "Nội dung JSON sai cú pháp",
            JsonRejection::JsonDataError(_) => "Dữ liệu gửi lên thiếu trường hoặc sai kiểu",
            _ => "Không đọc được nội dung yêu cầu",
        };
        AppError::BadRequest(message.into())
    }
}

impl From<PathRejection> for AppError {
    fn from(err: PathRejection) -> Self {
        tracing::debug!(error = %err.body_text(), "Rejected path parameter");
        AppError::BadRequest("Đường dẫn không hợp lệ".into())
    }
}

impl From<QueryRejection> for AppError {
    fn from(err: QueryRejection) -> Self {
        tracing::debug!(error = %err.body_text(), "Rejected query string");
        AppError::BadRequest("Tham số truy vấn không hợp lệ".into())
    }
}

fn internal(error: &dyn std::fmt::Display) -> (StatusCode, &'static str, String) {
    tracing::error!(error = %error, "Request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("Không tìm thấy {entity} '{id}'"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                // Quota exhaustion and lost races are reported as bad requests.
                CoreError::Conflict(msg) => (StatusCode::BAD_REQUEST, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => internal(msg),
            },
            AppError::Store(err) => internal(err),
            AppError::Storage(err) => internal(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => internal(msg),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
