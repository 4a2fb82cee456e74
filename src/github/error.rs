//! The one failure class of the repository fetch, with enough detail to
//! diagnose a misconfigured account or a throttled client.

use reqwest::StatusCode;
use reqwest::header::HeaderMap;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP 404, usually a misspelled username
    #[error("HTTP 404: user not found")]
    NotFound,
    /// HTTP 429, or 403 with an exhausted rate limit
    #[error(
        "GitHub API rate limit exceeded. Try again later or set GITHUB_TOKEN environment variable."
    )]
    RateLimited,
    /// HTTP 401
    #[error("HTTP 401: authentication failed. Check your GITHUB_TOKEN.")]
    Unauthorized,
    /// Any other non-success status
    #[error("HTTP error! status: {0}")]
    Status(u16),
    /// Connection, DNS or TLS failure before a response arrived
    #[error("Network error: {0}")]
    Transport(String),
    /// The body was not a JSON array of repositories
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl FetchError {
    /// Classifies a non-success response.
    pub fn from_status(status: StatusCode, headers: &HeaderMap) -> Self {
        match status {
            StatusCode::NOT_FOUND => FetchError::NotFound,
            StatusCode::UNAUTHORIZED => FetchError::Unauthorized,
            StatusCode::TOO_MANY_REQUESTS => FetchError::RateLimited,
            StatusCode::FORBIDDEN if rate_limit_exhausted(headers) => FetchError::RateLimited,
            s => FetchError::Status(s.as_u16()),
        }
    }

    /// Classifies a reqwest error raised while sending or decoding.
    pub fn from_reqwest(error: reqwest::Error) -> Self {
        if error.is_decode() {
            FetchError::Decode(error.to_string())
        } else if let Some(status) = error.status() {
            FetchError::from_status(status, &HeaderMap::new())
        } else {
            FetchError::Transport(error.to_string())
        }
    }
}

fn rate_limit_exhausted(headers: &HeaderMap) -> bool {
    headers
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim() == "0")
}
