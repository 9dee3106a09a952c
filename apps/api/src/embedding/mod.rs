//! Embedding client: turns a text blob into a vector via an OpenAI-compatible
//! `/v1/embeddings` endpoint.
//!
//! The pipeline only sees the `Embedder` trait, so tests swap in deterministic
//! fakes instead of a live model server.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod similarity;

/// Upper bound on a single embedding round trip.
pub const EMBEDDING_TIMEOUT: Duration = Duration::from_secs(60);

/// A fixed-length vector produced by the embedding service.
/// Dimensionality is whatever the model returns; only non-emptiness is checked.
pub type Embedding = Vec<f32>;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("embedding service timed out")]
    Timeout,

    #[error("embedding service unavailable: {message}")]
    ServiceUnavailable { status: Option<u16>, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed embedding response: {0}")]
    MalformedResponse(String),

    #[error("embedding service returned an empty vector")]
    EmptyEmbedding,
}

impl EmbeddingError {
    fn from_transport(e: reqwest::Error) -> Self {
        if e.is_connect() {
            EmbeddingError::ServiceUnavailable {
                status: None,
                message: e.to_string(),
            }
        } else if e.is_timeout() {
            EmbeddingError::Timeout
        } else {
            EmbeddingError::Http(e)
        }
    }
}

/// Anything that can embed a single text blob.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError>;
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: [&'a str; 1],
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingDatum>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingDatum {
    embedding: Vec<f32>,
}

/// HTTP embedding client. One request per `embed` call, no caching.
#[derive(Clone)]
pub struct EmbeddingClient {
    client: Client,
    url: String,
    model: String,
}

impl EmbeddingClient {
    pub fn new(url: String, model: String) -> Result<Self, EmbeddingError> {
        Self::with_timeout(url, model, EMBEDDING_TIMEOUT)
    }

    pub fn with_timeout(
        url: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, EmbeddingError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url, model })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Embedder for EmbeddingClient {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        let request_body = EmbeddingRequest {
            model: &self.model,
            input: [text],
        };

        debug!(chars = text.len(), model = %self.model, "requesting embedding");

        let response = self
            .client
            .post(&self.url)
            .json(&request_body)
            .send()
            .await
            .map_err(EmbeddingError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::ServiceUnavailable {
                status: Some(status.as_u16()),
                message: body,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(EmbeddingError::from_transport)?;
        let parsed: EmbeddingResponse = serde_json::from_slice(&body)
            .map_err(|e| EmbeddingError::MalformedResponse(e.to_string()))?;

        let embedding = parsed
            .data
            .into_iter()
            .next()
            .ok_or_else(|| EmbeddingError::MalformedResponse("`data` is empty".to_string()))?
            .embedding;

        if embedding.is_empty() {
            return Err(EmbeddingError::EmptyEmbedding);
        }

        debug!(dims = embedding.len(), "embedding received");
        Ok(embedding)
    }
}
