use thiserror::Error;

pub type Result<T> = std::result::Result<T, GithubError>;

#[derive(Debug, Error)]
pub enum GithubError {
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for GithubError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GithubError::Parse(err.to_string())
        } else {
            GithubError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for GithubError {
    fn from(err: serde_json::Error) -> Self {
        GithubError::Parse(err.to_string())
    }
}
