//! Error types and response mapping for the web crate.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tollbooth_token::VerifyError;

/// Errors that can occur in the web layer.
#[derive(Debug, Error)]
pub enum WebError {
    /// Failed to start the server.
    #[error("failed to start server: {0}")]
    StartupFailed(String),

    /// Token issuance failed.
    #[error("token error: {0}")]
    Token(#[from] tollbooth_token::TokenError),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

/// Map a verification failure to the documented JSON response.
///
/// Every failure yields `{ok:false, error}`; an unreadable header is the
/// only 400, all trust and time failures are 401. Messages mirror the
/// fixed diagnostic strings clients match on.
pub fn verify_failure_response(err: &VerifyError) -> Response {
    let (status, message) = match err {
        VerifyError::MissingToken => {
            (StatusCode::UNAUTHORIZED, "Missing JWT (Cookie)".to_string())
        }
        VerifyError::MalformedToken(detail) => (
            StatusCode::BAD_REQUEST,
            format!("Cannot read header: {detail}"),
        ),
        VerifyError::Expired => (StatusCode::UNAUTHORIZED, "Token expired".to_string()),
        VerifyError::IssuerMismatch => (StatusCode::UNAUTHORIZED, "iss mismatch".to_string()),
        VerifyError::AudienceMismatch => (StatusCode::UNAUTHORIZED, "aud mismatch".to_string()),
        other => (
            StatusCode::UNAUTHORIZED,
            format!("Invalid Token: {other}"),
        ),
    };

    (status, Json(json!({ "ok": false, "error": message }))).into_response()
}
