//! Studio error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use nds_genai::GenAiError;
use serde::Serialize;
use thiserror::Error;

pub type StudioResult<T> = Result<T, StudioError>;

/// Errors returned to HTTP callers.
#[derive(Debug, Error)]
pub enum StudioError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Generative service error: {0}")]
    GenAi(#[from] GenAiError),
}

impl StudioError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            StudioError::NotFound(_) => StatusCode::NOT_FOUND,
            StudioError::BadRequest(_) | StudioError::Validation(_) => StatusCode::BAD_REQUEST,
            StudioError::Conflict(_) => StatusCode::CONFLICT,
            StudioError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            StudioError::GenAi(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

impl IntoResponse for StudioError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Don't expose internal error details in production
        let detail = match &self {
            StudioError::Internal(_) | StudioError::GenAi(_) => {
                if std::env::var("ENVIRONMENT").unwrap_or_default() == "production" {
                    "An internal error occurred".to_string()
                } else {
                    self.to_string()
                }
            }
            _ => self.to_string(),
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}

/// Why a render attempt ended without a video.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Please select a paid API key to use Veo.")]
    CredentialNotSelected,

    #[error("Invalid video URI: {0}")]
    InvalidUri(String),

    #[error(transparent)]
    GenAi(#[from] GenAiError),
}

impl RenderError {
    /// The "entity not found" heuristic for a key rejected mid-flight.
    pub fn is_credential_rejected(&self) -> bool {
        matches!(self, RenderError::GenAi(e) if e.is_credential_rejected())
    }

    /// Metric label for this failure.
    pub fn kind(&self) -> &'static str {
        match self {
            RenderError::CredentialNotSelected => "credential_not_selected",
            RenderError::InvalidUri(_) => "invalid_uri",
            RenderError::GenAi(e) if e.is_credential_rejected() => "credential_rejected",
            RenderError::GenAi(e) if e.is_missing_credential() => "credential_missing",
            RenderError::GenAi(GenAiError::EmptyResult) => "empty_result",
            RenderError::GenAi(_) => "service_error",
        }
    }
}
