//! Application state for the RAG server

use parking_lot::RwLock;
use std::sync::Arc;

use crate::config::RagConfig;
use crate::engine::RagEngine;
use crate::ingestion::DocumentExtractor;
use crate::providers::{EmbeddingProvider, GenerationProvider, OllamaGenerator, OpenAiEmbedder};
use crate::session::Session;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: RagConfig,
    /// The orchestrating engine over the active session
    engine: RagEngine,
    /// Embedding provider (kept for health probing)
    embedding_provider: Arc<dyn EmbeddingProvider>,
    /// Generation provider (kept for health probing)
    generation_provider: Arc<dyn GenerationProvider>,
    /// Ready state
    ready: RwLock<bool>,
}

impl AppState {
    /// Create new application state with the default provider backends
    pub fn new(config: RagConfig) -> Self {
        tracing::info!("Initializing RAG application state...");

        let embedding_provider: Arc<dyn EmbeddingProvider> =
            Arc::new(OpenAiEmbedder::new(&config.embeddings));
        tracing::info!(
            "Embedding provider initialized ({}x{} at {})",
            config.embeddings.model,
            config.embeddings.dimensions,
            config.embeddings.endpoint
        );

        let generation_provider: Arc<dyn GenerationProvider> =
            Arc::new(OllamaGenerator::new(&config.llm));
        tracing::info!("Generation provider initialized (model: {})", config.llm.model);

        let session = Arc::new(Session::new(&config));
        let engine = RagEngine::new(
            &config,
            Arc::new(DocumentExtractor),
            Arc::clone(&embedding_provider),
            Arc::clone(&generation_provider),
            session,
        );

        Self {
            inner: Arc::new(AppStateInner {
                config,
                engine,
                embedding_provider,
                generation_provider,
                ready: RwLock::new(true),
            }),
        }
    }

    /// Get configuration
    pub fn config(&self) -> &RagConfig {
        &self.inner.config
    }

    /// Get the engine
    pub fn engine(&self) -> &RagEngine {
        &self.inner.engine
    }

    /// Get the embedding provider
    pub fn embedding_provider(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.inner.embedding_provider
    }

    /// Get the generation provider
    pub fn generation_provider(&self) -> &Arc<dyn GenerationProvider> {
        &self.inner.generation_provider
    }

    /// Check if the server is ready
    pub fn is_ready(&self) -> bool {
        *self.inner.ready.read()
    }

    /// Set ready state
    pub fn set_ready(&self, ready: bool) {
        *self.inner.ready.write() = ready;
    }
}
