// SPDX-License-Identifier: MIT

//! Client error types shared across the SDK.

/// Error type returned by every fallible SDK operation.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ClientError {
    /// True for errors that mean the current credentials are unusable and
    /// the session should be (or already has been) torn down.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            ClientError::Unauthorized
                | ClientError::InvalidToken
                | ClientError::Api { status: 401, .. }
        )
    }

    /// Build an API error from a response status and raw body, picking the
    /// server's `{"error": "..."}` message out when present.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
            .unwrap_or_else(|| body.trim().to_string());
        ClientError::Api { status, message }
    }
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ClientError::Validation(errors.to_string())
    }
}

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, ClientError>;
