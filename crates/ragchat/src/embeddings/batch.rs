//! Order-preserving, all-or-nothing batching over an embedding provider

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::providers::EmbeddingProvider;

/// Batching embedding client
///
/// Partitions input into batches of at most `batch_size`, issues one provider
/// call per batch, and concatenates the results in input order. Any batch
/// failure fails the whole call; results from earlier batches are discarded.
pub struct BatchEmbedder {
    provider: Arc<dyn EmbeddingProvider>,
    batch_size: usize,
}

impl BatchEmbedder {
    /// Create a new batching client
    pub fn new(provider: Arc<dyn EmbeddingProvider>, batch_size: usize) -> Self {
        Self {
            provider,
            batch_size: batch_size.max(1),
        }
    }

    /// Embedding dimensions of the underlying provider
    pub fn dimensions(&self) -> usize {
        self.provider.dimensions()
    }

    /// Embed all texts, one vector per input in input order
    pub async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let dimensions = self.provider.dimensions();
        let mut embeddings = Vec::with_capacity(texts.len());

        for batch in texts.chunks(self.batch_size) {
            let vectors = self.provider.embed_batch(batch).await?;

            if vectors.len() != batch.len() {
                return Err(Error::embedding(format!(
                    "provider '{}' returned {} vectors for {} inputs",
                    self.provider.name(),
                    vectors.len(),
                    batch.len()
                )));
            }
            for vector in &vectors {
                if vector.len() != dimensions {
                    return Err(Error::embedding(format!(
                        "provider '{}' returned a {}-dimensional vector, expected {}",
                        self.provider.name(),
                        vector.len(),
                        dimensions
                    )));
                }
            }

            embeddings.extend(vectors);
        }

        Ok(embeddings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Deterministic provider: vector encodes the input's byte sum
    struct CountingEmbedder {
        dimensions: usize,
        calls: AtomicUsize,
        fail_on_call: Option<usize>,
        wrong_dimension_on_call: Option<usize>,
    }

    impl CountingEmbedder {
        fn new(dimensions: usize) -> Self {
            Self {
                dimensions,
                calls: AtomicUsize::new(0),
                fail_on_call: None,
                wrong_dimension_on_call: None,
            }
        }

        fn embed_one(&self, text: &str, dimensions: usize) -> Vec<f32> {
            let sum: u32 = text.bytes().map(u32::from).sum();
            (0..dimensions).map(|i| (sum + i as u32) as f32).collect()
        }
    }

    #[async_trait]
    impl EmbeddingProvider for CountingEmbedder {
        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_on_call == Some(call) {
                return Err(Error::embedding("provider unavailable"));
            }
            let dimensions = if self.wrong_dimension_on_call == Some(call) {
                self.dimensions + 1
            } else {
                self.dimensions
            };
            Ok(texts.iter().map(|t| self.embed_one(t, dimensions)).collect())
        }

        fn dimensions(&self) -> usize {
            self.dimensions
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    fn texts(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("text {}", i)).collect()
    }

    #[tokio::test]
    async fn test_order_preserved_across_batch_sizes() {
        let inputs = texts(10);

        let reference = {
            let provider = Arc::new(CountingEmbedder::new(4));
            let mut out = Vec::new();
            for text in &inputs {
                out.push(provider.embed_one(text, 4));
            }
            out
        };

        for batch_size in [1, 3, 10, 32] {
            let provider = Arc::new(CountingEmbedder::new(4));
            let embedder = BatchEmbedder::new(provider, batch_size);
            let result = embedder.embed(&inputs).await.expect("embeds");
            assert_eq!(result, reference, "batch_size {}", batch_size);
        }
    }

    #[tokio::test]
    async fn test_one_request_per_batch() {
        let provider = Arc::new(CountingEmbedder::new(4));
        let embedder = BatchEmbedder::new(Arc::clone(&provider) as Arc<dyn EmbeddingProvider>, 3);

        embedder.embed(&texts(10)).await.expect("embeds");
        // 10 inputs in batches of 3 -> 4 calls
        assert_eq!(provider.calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_failed_batch_discards_everything() {
        let mut provider = CountingEmbedder::new(4);
        provider.fail_on_call = Some(1);
        let embedder = BatchEmbedder::new(Arc::new(provider), 3);

        let err = embedder.embed(&texts(10)).await.expect_err("second batch fails");
        assert!(matches!(err, Error::Embedding(_)));
    }

    #[tokio::test]
    async fn test_dimension_mismatch_is_fatal() {
        let mut provider = CountingEmbedder::new(4);
        provider.wrong_dimension_on_call = Some(0);
        let embedder = BatchEmbedder::new(Arc::new(provider), 32);

        let err = embedder.embed(&texts(2)).await.expect_err("bad dimension");
        assert!(matches!(err, Error::Embedding(_)));
    }

    #[tokio::test]
    async fn test_empty_input_makes_no_calls() {
        let provider = Arc::new(CountingEmbedder::new(4));
        let embedder = BatchEmbedder::new(Arc::clone(&provider) as Arc<dyn EmbeddingProvider>, 32);

        let result = embedder.embed(&[]).await.expect("empty ok");
        assert!(result.is_empty());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }
}
