//! Answer generation: prompt templates and the Ollama HTTP client

mod ollama;
mod prompt;

pub use ollama::OllamaClient;
pub use prompt::PromptBuilder;
