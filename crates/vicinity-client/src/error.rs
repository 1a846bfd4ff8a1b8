use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by {url} (retry after {retry_after_secs}s)")]
    RateLimited { url: String, retry_after_secs: u64 },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid API base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl ClientError {
    /// `true` for failures of the remote transport or a non-success status,
    /// as opposed to a response that arrived but did not have the expected
    /// shape.
    #[must_use]
    pub fn is_remote_failure(&self) -> bool {
        matches!(
            self,
            ClientError::Http(_)
                | ClientError::RateLimited { .. }
                | ClientError::NotFound { .. }
                | ClientError::UnexpectedStatus { .. }
        )
    }
}
