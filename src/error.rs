// Error type shared by the analysis pipeline and its capabilities.

use thiserror::Error;

/// Every failure the pipeline can produce. `Display` is the message sent to
/// clients.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Network failure, bad URL or non-success HTTP status.
    #[error("{0}")]
    Fetch(String),
    /// The page was fetched but no article text could be extracted.
    #[error("{0}")]
    Extract(String),
    /// A sentiment, tokenization or summarization capability failed.
    #[error("{0}")]
    Capability(String),
}

impl From<reqwest::Error> for AnalysisError {
    fn from(err: reqwest::Error) -> Self {
        AnalysisError::Fetch(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AnalysisError {
    fn from(err: tokio::task::JoinError) -> Self {
        AnalysisError::Capability(format!("analysis task failed: {}", err))
    }
}
