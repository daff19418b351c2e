//! Generative-AI client error types.

use thiserror::Error;

pub type GenAiResult<T> = Result<T, GenAiError>;

/// Message fragment the service uses when a selected key is not usable.
pub const ENTITY_NOT_FOUND: &str = "Requested entity was not found";

#[derive(Debug, Error)]
pub enum GenAiError {
    #[error("API Key not found")]
    MissingApiKey,

    #[error("{0}")]
    CredentialRejected(String),

    #[error("No video URI returned.")]
    EmptyResult,

    #[error("Service returned {status}: {message}")]
    Service { status: u16, message: String },

    #[error("Operation failed: {0}")]
    OperationFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GenAiError {
    /// Classify an error message reported by the service.
    pub(crate) fn from_service(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        if status == 404 || message.contains(ENTITY_NOT_FOUND) {
            Self::CredentialRejected(message)
        } else {
            Self::Service { status, message }
        }
    }

    /// Classify an error carried by a finished long-running operation.
    pub(crate) fn from_operation(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.contains(ENTITY_NOT_FOUND) {
            Self::CredentialRejected(message)
        } else {
            Self::OperationFailed(message)
        }
    }

    /// Whether the credential was rejected mid-flight and should be reselected.
    pub fn is_credential_rejected(&self) -> bool {
        match self {
            GenAiError::CredentialRejected(_) => true,
            other => other.to_string().contains(ENTITY_NOT_FOUND),
        }
    }

    /// Whether no credential was available at all.
    pub fn is_missing_credential(&self) -> bool {
        matches!(self, GenAiError::MissingApiKey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status_is_credential_rejection() {
        assert!(GenAiError::from_service(404, "gone").is_credential_rejected());
        assert!(GenAiError::from_service(400, "Requested entity was not found.")
            .is_credential_rejected());
        assert!(!GenAiError::from_service(500, "boom").is_credential_rejected());
    }

    #[test]
    fn test_operation_error_classification() {
        assert!(GenAiError::from_operation("Requested entity was not found.")
            .is_credential_rejected());
        assert!(matches!(
            GenAiError::from_operation("quota"),
            GenAiError::OperationFailed(_)
        ));
    }
}
