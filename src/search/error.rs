use thiserror::Error;

/// Errors surfaced to the caller of a search
#[derive(Debug, Error)]
pub enum SearchError {
    /// Coordinates missing or malformed; never retried
    #[error("{0}")]
    InvalidArgument(String),

    /// No provider credential configured
    #[error("Server configuration error. API key not found.")]
    Configuration,

    /// A single provider call failed where no fallback exists
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Failure of one provider call. Inside the strategy loop these are
/// recorded and the next strategy is tried.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network or TLS failure from the underlying HTTP client
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The call did not finish within the strategy timeout
    #[error("request timed out after {0:.1}s")]
    Timeout(f64),

    /// The provider answered with a non-success status
    #[error("provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not the expected JSON
    #[error("JSON deserialization error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The request could not be built
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}
