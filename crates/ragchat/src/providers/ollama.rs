//! Ollama-backed generation provider

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::LlmConfig;
use crate::error::Result;
use crate::generation::OllamaClient;

use super::generation::GenerationProvider;

/// Generation provider over a local Ollama server
pub struct OllamaGenerator {
    client: Arc<OllamaClient>,
}

impl OllamaGenerator {
    /// Create a new Ollama generation provider
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            client: Arc::new(OllamaClient::new(config)),
        }
    }

    /// Create from an existing client
    pub fn from_client(client: Arc<OllamaClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl GenerationProvider for OllamaGenerator {
    async fn answer(&self, query: &str, context: &[String]) -> Result<String> {
        self.client.generate_answer(query, context).await
    }

    async fn health_check(&self) -> Result<bool> {
        self.client.health_check().await
    }

    fn name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        self.client.model()
    }
}
