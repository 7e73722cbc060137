//! Error types for fetching the message feed.

use thiserror::Error;

/// Feed error type.
///
/// Fetch failures (`Network`, `Server`, `ResponseFormat`) are caught at the
/// refresh boundary and only ever reach the log. `InvalidUrl` and `HttpClient`
/// come up while building a source.
#[derive(Error, Debug)]
pub enum FeedError {
    /// The request could not be sent, timed out, or its body could not be read.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("server error ({status}): {body}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Response body, if it could be read.
        body: String,
    },

    /// The backend answered 2xx but the body is not an array of messages.
    #[error("unexpected response format: {0}")]
    ResponseFormat(#[from] serde_json::Error),

    /// Invalid backend URL.
    #[error("invalid backend URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

impl FeedError {
    /// Short, stable name of the error class, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Server { .. } => "server",
            Self::ResponseFormat(_) => "response_format",
            Self::InvalidUrl(_) => "invalid_url",
            Self::HttpClient(_) => "http_client",
        }
    }
}

/// Result type alias for feed operations.
pub type Result<T> = std::result::Result<T, FeedError>;
