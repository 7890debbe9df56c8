use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EstimateError {
    /// OpenRouter answered with an `error` object. Kept for server-side logs
    /// only; callers get a generic message.
    #[error("upstream reported an error: {0}")]
    Upstream(Value),

    #[error("model reply is not a number: {0:?}")]
    InvalidResult(String),

    #[error("request to upstream failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected upstream response: {0}")]
    MalformedResponse(String),
}

impl EstimateError {
    /// Whether the failure text may be shown to the caller.
    pub fn exposes_details(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::MalformedResponse(_))
    }
}
