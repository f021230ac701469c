pub mod api_football;

use crate::domain::error::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    /// Transport failure, or a non-2xx reply once retries are spent
    #[error("Network error: {0}")]
    Network(String),
    /// Body did not match the fixtures/statistics envelope
    #[error("Parse error: {0}")]
    Parse(String),
    /// No API key configured, or the API rejected the request in its `errors` field
    #[error("Config error: {0}")]
    Config(String),
}

impl From<FeedError> for DomainError {
    fn from(e: FeedError) -> Self {
        DomainError::Feed(e.to_string())
    }
}
