use reqwest::StatusCode;
use thiserror::Error;

/// Failure taxonomy for the client.
///
/// A `data:` payload that fails JSON parsing inside a stream is not an error
/// here: the decoder falls back to a text event instead of failing the
/// stream.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was received: network failure, timeout, or abort.
    #[error("network error: {message}")]
    Transport { message: String },

    /// Non-2xx status on the streaming endpoint; the error body is captured.
    #[error("stream request failed: {status} - {body}")]
    HttpStatus { status: StatusCode, body: String },

    /// HTTP exchange completed but the application envelope carried a
    /// non-200 code.
    #[error("{message}")]
    Envelope { code: i64, message: String },
}

impl ApiError {
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "request timed out".to_string()
        } else {
            err.to_string()
        };
        Self::Transport { message }
    }
}
