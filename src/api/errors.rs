use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Unexpected status code: {0}")]
    Status(u16),

    #[error("Invalid response body: {0}")]
    Decode(String),

    /// The backend answered with a well-formed envelope whose `success`
    /// flag was false. Carries the envelope's `message` verbatim.
    #[error("{0}")]
    Rejected(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if err.is_connect() || err.is_request() || err.is_redirect() {
            ApiError::Transport(err.to_string())
        } else {
            ApiError::Unexpected(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}
