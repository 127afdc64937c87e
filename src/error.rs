use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type shared by all handlers.
///
/// Validation refusals are part of the normal API contract: they come back
/// as `200 OK` with `{"ok": false, "error": "..."}` so the browser client
/// can surface them inline. Only missing/expired credentials and missing
/// permissions use real HTTP error statuses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No session cookie, or the session is expired/revoked.
    #[error("unauthorized")]
    Unauthorized,

    /// Authenticated, but the caller lacks the admin role.
    #[error("forbidden")]
    Forbidden,

    /// Business-rule refusal reported in-band to the client.
    #[error("{0}")]
    Validation(String),

    /// Anything unexpected. Details are logged, not exposed.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "unauthorized" })),
            )
                .into_response(),
            Self::Forbidden => {
                (StatusCode::FORBIDDEN, Json(json!({ "error": "forbidden" }))).into_response()
            }
            Self::Validation(msg) => Json(json!({ "ok": false, "error": msg })).into_response(),
            Self::Internal(e) => {
                tracing::error!(error = %e, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal server error" })),
                )
                    .into_response()
            }
        }
    }
}
