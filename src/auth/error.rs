use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::FirebaseError;

/// Error body returned by the Identity Toolkit REST API, e.g.
/// `{"error": {"code": 400, "message": "INVALID_CUSTOM_TOKEN", ...}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct AuthApiError {
    error: AuthApiErrorInfo,
}

#[derive(Debug, Deserialize)]
struct AuthApiErrorInfo {
    message: String,
}

impl AuthApiError {
    /// Maps a failed response into a [`FirebaseError`]. Bodies that are not
    /// in the Identity Toolkit error format are passed through verbatim.
    pub(crate) fn from_response(status: StatusCode, body: &str) -> FirebaseError {
        let message = match serde_json::from_str::<AuthApiError>(body) {
            Ok(api_error) => api_error.error.message,
            Err(_) if body.is_empty() => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
            Err(_) => body.to_string(),
        };

        FirebaseError::SignInRejected {
            status: status.as_u16(),
            message,
        }
    }
}
