//! Error types for `vitae-compile`.

use thiserror::Error;

/// A failure anywhere in the request/response cycle that is not a structured
/// rejection from the compile service.
#[derive(Debug, Error)]
pub enum Error {
  #[error("failed to build HTTP client: {0}")]
  Client(#[source] reqwest::Error),

  #[error("POST {url} failed: {source}")]
  Transport {
    url:    String,
    #[source]
    source: reqwest::Error,
  },

  #[error("malformed compile response (HTTP {status}): {source}")]
  Malformed {
    status: u16,
    #[source]
    source: serde_json::Error,
  },

  #[error("compile response carries an undecodable document: {0}")]
  Base64(#[from] base64::DecodeError),

  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
