//! Generation provider trait

use async_trait::async_trait;

use crate::error::Result;

/// Trait for generating a grounded answer from a query and retrieved context
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Generate an answer to `query` conditioned on the retrieved chunk texts
    ///
    /// An empty context is valid; the provider decides how to answer when no
    /// documents were retrieved.
    async fn answer(&self, query: &str, context: &[String]) -> Result<String>;

    /// Check if the provider is healthy and available
    async fn health_check(&self) -> Result<bool>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// The model being used
    fn model(&self) -> &str;
}
