//! Embedding provider trait

use async_trait::async_trait;

use crate::error::Result;

/// Trait for turning text into fixed-dimension vectors
///
/// One `embed_batch` invocation corresponds to one wire call; batching policy
/// lives in [`crate::embeddings::BatchEmbedder`], not here.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate embeddings for a batch of texts, one vector per input in
    /// input order
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Embedding dimensions (e.g. 768 for nomic-embed-text)
    fn dimensions(&self) -> usize;

    /// Check if the provider is healthy and available
    async fn health_check(&self) -> Result<bool>;

    /// Provider name for logging
    fn name(&self) -> &str;
}
