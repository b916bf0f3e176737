pub mod http;

pub use http::HttpFetcher;

/// Network access to the aggregator. The only place a lookup touches the network.
#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    /// GET `url` and return the body of a successful response
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Request timed out: {url}")]
    Timeout { url: String },

    #[error("HTTP {status} for {url}")]
    Http { status: u16, url: String },

    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),
}

impl FetchError {
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
