//! Provider abstractions for embeddings and answer generation
//!
//! Trait-based seams so the external services behind the pipeline can be
//! swapped (or mocked) without touching the orchestration.

pub mod embedding;
pub mod generation;
pub mod ollama;
pub mod openai;

pub use embedding::EmbeddingProvider;
pub use generation::GenerationProvider;
pub use ollama::OllamaGenerator;
pub use openai::OpenAiEmbedder;
