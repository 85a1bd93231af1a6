// Error types for gitfolio.
// Covers fetch failures, cache misses, and configuration/setup errors.

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitfolioError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("rate limit exceeded, resets at {reset_at}")]
    RateLimited { reset_at: DateTime<Utc> },

    #[error("JSON parsing error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no cached response available")]
    CacheMiss,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GitfolioError {
    /// Every fetch-layer error is retryable; setup errors are not.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GitfolioError::Network(_)
                | GitfolioError::Http { .. }
                | GitfolioError::RateLimited { .. }
                | GitfolioError::Parse(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, GitfolioError>;
