//! API client error types.

use crate::errors::CohortError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid API base URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },

    #[error("Could not reach {url}: {message}")]
    Transport { url: String, message: String },

    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Request rejected: {message}")]
    Rejected { message: String },

    #[error("Unexpected response from server: {message}")]
    Decode { message: String },
}

impl ApiError {
    /// HTTP status code, when the server answered with one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl CohortError for ApiError {
    fn error_code(&self) -> &'static str {
        match self {
            ApiError::InvalidBaseUrl { .. } => "API_INVALID_BASE_URL",
            ApiError::Transport { .. } => "API_TRANSPORT_ERROR",
            ApiError::Status { .. } => "API_STATUS_ERROR",
            ApiError::Rejected { .. } => "API_REJECTED",
            ApiError::Decode { .. } => "API_DECODE_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            ApiError::InvalidBaseUrl { .. } | ApiError::Rejected { .. } => true,
            ApiError::Status { status, .. } => (400..500).contains(status),
            ApiError::Transport { .. } | ApiError::Decode { .. } => false,
        }
    }
}
