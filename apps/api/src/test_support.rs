// Shared fakes for unit tests: a local stub HTTP server and trivial
// implementations of the embedding and chat capabilities.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;

use crate::embedding::{Embedder, Embedding, EmbeddingError};
use crate::llm_client::{ChatCompleter, CompletionRequest, LlmError};

/// Serves `app` on an ephemeral localhost port and returns its base URL.
pub async fn spawn_stub(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// A localhost URL whose port was bound and released, so connects are refused.
pub async fn refused_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Returns the same vector for every input.
#[derive(Default)]
pub struct StaticEmbedder {
    calls: AtomicUsize,
}

impl StaticEmbedder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Embedder for StaticEmbedder {
    async fn embed(&self, _text: &str) -> Result<Embedding, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![0.5, 0.25, 1.0])
    }
}

pub struct StaticCompleter {
    reply: Option<String>,
}

impl StaticCompleter {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(text.to_string()),
        })
    }

    pub fn timing_out() -> Arc<Self> {
        Arc::new(Self { reply: None })
    }
}

#[async_trait]
impl ChatCompleter for StaticCompleter {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String, LlmError> {
        self.reply.clone().ok_or(LlmError::Timeout)
    }
}
