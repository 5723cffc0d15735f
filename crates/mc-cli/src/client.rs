//! Async HTTP client wrapping the Mission Control JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, Method, Response};
use serde::{Serialize, de::DeserializeOwned};

/// Connection settings for the Mission Control API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Async HTTP client for the Mission Control JSON REST API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/api{}", self.config.base_url.trim_end_matches('/'), path)
  }

  /// `GET /api<path>?<query>`
  pub async fn get<T: DeserializeOwned>(
    &self,
    path: &str,
    query: &[(&str, String)],
  ) -> Result<T> {
    tracing::debug!(path, ?query, "GET");
    let resp = self
      .client
      .get(self.url(path))
      .query(query)
      .send()
      .await
      .with_context(|| format!("GET {path} failed"))?;
    decode(Method::GET, path, resp).await
  }

  /// Send `body` as JSON with `method` and decode the JSON reply.
  pub async fn send<B: Serialize + ?Sized, T: DeserializeOwned>(
    &self,
    method: Method,
    path: &str,
    body: &B,
  ) -> Result<T> {
    tracing::debug!(%method, path, "request");
    let resp = self
      .client
      .request(method.clone(), self.url(path))
      .json(body)
      .send()
      .await
      .with_context(|| format!("{method} {path} failed"))?;
    decode(method, path, resp).await
  }

  /// `POST` with an empty JSON object, for the action endpoints.
  pub async fn action<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
    self.send(Method::POST, path, &serde_json::json!({})).await
  }

  /// `DELETE /api<path>`
  pub async fn delete(&self, path: &str) -> Result<()> {
    tracing::debug!(path, "DELETE");
    let resp = self
      .client
      .delete(self.url(path))
      .send()
      .await
      .with_context(|| format!("DELETE {path} failed"))?;
    check(Method::DELETE, path, resp).await.map(drop)
  }
}

/// Fail with the server's `{"error": ...}` message on a non-2xx reply.
async fn check(method: Method, path: &str, resp: Response) -> Result<Response> {
  let status = resp.status();
  if status.is_success() {
    return Ok(resp);
  }
  let message = resp
    .json::<serde_json::Value>()
    .await
    .ok()
    .and_then(|v| v["error"].as_str().map(str::to_owned))
    .unwrap_or_default();
  Err(anyhow!("{method} {path} → {status}: {message}"))
}

async fn decode<T: DeserializeOwned>(method: Method, path: &str, resp: Response) -> Result<T> {
  check(method, path, resp)
    .await?
    .json()
    .await
    .with_context(|| format!("deserialising {path}"))
}
