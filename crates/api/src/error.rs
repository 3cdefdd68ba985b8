use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rollcall_core::error::CoreError;
use rollcall_db::DbError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`DbError`] for persistence
/// failures, and adds HTTP-specific variants. Every variant renders as
/// `{ "error", "code" }`; server faults add a `details` string.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] DbError),

    /// Malformed input the handler never got to see (bad JSON, bad path).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No route matched the method and path.
    #[error("Not found")]
    RouteNotFound,

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn unauthorized() -> Self {
        AppError::Core(CoreError::Unauthorized("Unauthorized".into()))
    }

    pub fn admin_required() -> Self {
        AppError::Core(CoreError::Forbidden("Admin access required".into()))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { .. } => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND", core.to_string())
                }
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => return server_error(msg),
            },

            AppError::Database(DbError::UniqueViolation { constraint }) => (
                StatusCode::CONFLICT,
                "CONFLICT",
                conflict_message(constraint),
            ),
            AppError::Database(err) => return server_error(&err.to_string()),

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::RouteNotFound => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", "Not found".to_string())
            }
            AppError::InternalError(msg) => return server_error(msg),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// 500 with the `{error: "Server error", code, details}` body.
pub(crate) fn server_error(details: &str) -> Response {
    tracing::error!(error = %details, "Request failed");
    let body = json!({
        "error": "Server error",
        "code": "INTERNAL_ERROR",
        "details": details,
    });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
}

fn conflict_message(constraint: &str) -> String {
    match constraint {
        "uq_users_email" => "Email already registered".to_string(),
        other => format!("Duplicate value violates unique constraint: {other}"),
    }
}
