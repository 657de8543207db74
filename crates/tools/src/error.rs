use thiserror::Error;

/// Failure talking to either external HTTP API.
///
/// "No data found" is never represented here; empty search results and
/// unmatched price ids are normal values returned by the tools.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("{service} API key is not configured")]
    MissingApiKey { service: &'static str },
    #[error("transport failure calling {url}: {source}")]
    Transport { url: String, source: reqwest::Error },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: reqwest::StatusCode },
    #[error("could not decode response from {url}: {source}")]
    Decode { url: String, source: serde_json::Error },
    #[error("unexpected payload from {url}: {message}")]
    Payload { url: String, message: String },
}
