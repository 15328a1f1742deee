//! Conversions from backend responses into `SyncError`

use super::types::SyncError;
use reqwest::StatusCode;

impl SyncError {
    /// Map a non-success HTTP status and its body into an error
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = if body.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string()
        } else {
            body.trim().to_string()
        };

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Self::Unauthorized(format!("{}: {}", status.as_u16(), message))
            }
            _ => Self::Api {
                status: status.as_u16(),
                message,
            },
        }
    }
}
