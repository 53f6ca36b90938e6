use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mealplan_core::error::CoreError;
use serde_json::json;

use crate::store::StoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for storage
/// failures, and adds HTTP-specific variants. Implements [`IntoResponse`] to
/// produce the `{error, code, message}` envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `mealplan_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure in the history store or catalogue.
    #[error(transparent)]
    Store(StoreError),

    /// A malformed request body or query string.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl AppError {
    /// HTTP status and stable machine-readable kind for this error.
    pub fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Core(core) => match core {
                CoreError::UserInvalid(_) => (StatusCode::BAD_REQUEST, "invalid_user"),
                CoreError::RecipeNotFound(_) => (StatusCode::BAD_REQUEST, "recipe_not_found"),
                CoreError::PreferencesNotSet => (StatusCode::BAD_REQUEST, "preferences_not_set"),
                CoreError::InvalidAlgorithm(_) => (StatusCode::BAD_REQUEST, "invalid_algorithm"),
                CoreError::InvalidRating(_) => (StatusCode::BAD_REQUEST, "invalid_rating"),
                CoreError::InvalidLimit(_) => (StatusCode::BAD_REQUEST, "invalid_limit"),
                CoreError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "authentication_failed"),
            },
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            AppError::Store(_) | AppError::InternalError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind) = self.status_and_kind();

        let message = match &self {
            AppError::Core(core) => core.to_string(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::Store(err) => {
                tracing::error!(error = %err, "Store error");
                INTERNAL_MESSAGE.to_string()
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                INTERNAL_MESSAGE.to_string()
            }
        };

        let body = json!({
            "error": kind,
            "code": status.as_u16(),
            "message": message,
        });

        (status, axum::Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::RecipeNotFound(id) => AppError::Core(CoreError::RecipeNotFound(id)),
            other => AppError::Store(other),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
