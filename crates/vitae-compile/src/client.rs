//! Async HTTP client for the external compile service.

use reqwest::Client;
use tracing::debug;

use crate::{
  Error, Result,
  payload::CompileRequest,
  response::CompileResponse,
};

/// Used when no base URL is configured: the local service the dev proxy
/// forwards `/api` to.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Connection settings for the compile service.
#[derive(Debug, Clone)]
pub struct ClientConfig {
  pub base_url: String,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self {
      base_url: DEFAULT_BASE_URL.to_string(),
    }
  }
}

/// HTTP client for `POST {base_url}/compile-resume`.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based. No request
/// timeout is set; a compile runs until the service answers or the
/// connection fails.
#[derive(Debug, Clone)]
pub struct CompileClient {
  client: Client,
  config: ClientConfig,
}

impl CompileClient {
  pub fn new(config: ClientConfig) -> Result<Self> {
    let client = Client::builder().build().map_err(Error::Client)?;
    Ok(Self { client, config })
  }

  pub fn base_url(&self) -> &str { &self.config.base_url }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  /// `POST /compile-resume`
  ///
  /// The body is interpreted as a compile response whatever the HTTP status:
  /// the service reports rejected input as `400` with a JSON failure body.
  pub async fn compile(&self, request: &CompileRequest) -> Result<CompileResponse> {
    let url = self.url("/compile-resume");
    debug!(%url, sections = request.sections.len(), "sending compile request");

    let resp = self
      .client
      .post(&url)
      .json(request)
      .send()
      .await
      .map_err(|source| Error::Transport {
        url:    url.clone(),
        source,
      })?;

    let status = resp.status();
    let body = resp
      .bytes()
      .await
      .map_err(|source| Error::Transport { url, source })?;
    debug!(status = status.as_u16(), bytes = body.len(), "compile response");

    serde_json::from_slice(&body).map_err(|source| Error::Malformed {
      status: status.as_u16(),
      source,
    })
  }
}
