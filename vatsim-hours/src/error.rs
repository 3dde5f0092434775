//! Error types shared by the library modules

use reqwest::StatusCode;

/// Errors surfaced by the pipeline. None of them are recovered locally.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Any endpoint answered with a non-success HTTP status
    #[error("Got status {status} from {url}")]
    UpstreamStatus { url: String, status: StatusCode },

    /// Airport code is not part of the registry
    #[error("Unsupported airport \"{0}\"")]
    UnsupportedAirport(String),

    /// Response body was missing expected fields or could not be decoded
    #[error("Malformed response from {url}: {reason}")]
    MalformedResponse { url: String, reason: String },

    /// Request never produced a response (DNS, connect, timeout)
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// URL of the endpoint involved, if any.
    pub fn url(&self) -> Option<&str> {
        match self {
            Error::UpstreamStatus { url, .. }
            | Error::MalformedResponse { url, .. }
            | Error::Request { url, .. } => Some(url),
            Error::UnsupportedAirport(_) => None,
        }
    }
}
