//! Search backend transport.
//!
//! The engine talks to its search backend through the [`SearchBackend`]
//! trait; [`HttpBackend`] is the production implementation, POSTing the
//! request body to `{base}/{index-expression}/_search`. Tests substitute
//! in-memory backends. Authentication, proxying and TLS configuration are
//! the embedding application's concern.

use std::future::Future;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

pub use error::TransportError;
use error::Result;

/// Executes a constructed search request against a backend.
pub trait SearchBackend: Send + Sync {
    fn execute(
        &self,
        index_expr: &str,
        body: &Value,
    ) -> impl Future<Output = Result<SearchResponse>> + Send;
}

/// Response envelope returned by the search backend.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub hits: HitsEnvelope,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HitsEnvelope {
    #[serde(default)]
    pub total: TotalHits,
    #[serde(default)]
    pub hits: Vec<RawHit>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct TotalHits {
    #[serde(default)]
    pub value: u64,
}

/// One raw record as returned by the backend: its origin index, the
/// backend-assigned document id, and the opaque source document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawHit {
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_source", default)]
    pub source: Map<String, Value>,
}

/// HTTP transport over a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a backend for the given base URL (e.g. `http://localhost:9200`
    /// or a reverse-proxy path).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a backend reusing an existing client (connection pooling,
    /// custom middleware).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl SearchBackend for HttpBackend {
    async fn execute(&self, index_expr: &str, body: &Value) -> Result<SearchResponse> {
        let url = format!("{}/{}/_search", self.base_url, index_expr);
        debug!(%url, "Issuing search request");

        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status));
        }

        Ok(response.json().await?)
    }
}

mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum TransportError {
        #[error("HTTP error: {0}")]
        Http(#[from] reqwest::Error),
        #[error("Backend returned non-success status: {0}")]
        Status(reqwest::StatusCode),
    }
    pub type Result<T> = std::result::Result<T, TransportError>;
}
