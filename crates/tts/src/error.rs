use axum::response::{IntoResponse, Response};
use http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TtsError>;

/// Errors that can occur while handling a synthesis request
#[derive(Debug, Error)]
pub enum TtsError {
    /// Malformed or out-of-range caller input
    #[error("{0}")]
    Validation(String),

    /// Upstream responded with a non-2xx status
    ///
    /// The status and body are relayed to the caller unchanged so upstream
    /// diagnostics (invalid voice, rate limiting) stay visible.
    #[error("upstream returned {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// Transport-level failure reaching the upstream
    #[error("API request failed: {0}")]
    Connection(String),

    /// Invalid gateway configuration, caught at startup
    #[error("invalid TTS configuration: {0}")]
    Config(String),
}

impl IntoResponse for TtsError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            Self::UpstreamStatus { status, body } => {
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                (status, body).into_response()
            }
            Self::Connection(_) | Self::Config(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
            }
        }
    }
}
