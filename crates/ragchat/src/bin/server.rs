//! RAG server binary
//!
//! Run with: cargo run -p ragchat --bin ragchat-server

use ragchat::{config::RagConfig, server::RagServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ragchat=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration: RAGCHAT_CONFIG, then ./ragchat.toml, then defaults
    let config = match std::env::var("RAGCHAT_CONFIG") {
        Ok(path) => RagConfig::from_file(&path)?,
        Err(_) if std::path::Path::new("ragchat.toml").exists() => {
            RagConfig::from_file("ragchat.toml")?
        }
        Err(_) => RagConfig::default(),
    };

    tracing::info!("Configuration loaded");
    tracing::info!("  - Embedding model: {}", config.embeddings.model);
    tracing::info!("  - Embedding dimensions: {}", config.embeddings.dimensions);
    tracing::info!("  - LLM model: {}", config.llm.model);
    tracing::info!("  - Chunk size: {}", config.chunking.chunk_size);
    tracing::info!("  - History TTL: {}s", config.chat.history_ttl_secs);

    let server = RagServer::new(config);

    // Probe the external providers so a dead backend is visible at startup
    match server.state().embedding_provider().health_check().await {
        Ok(true) => tracing::info!("Embedding server is reachable"),
        _ => tracing::warn!("Embedding server is not reachable; ingestion and queries will fail"),
    }
    match server.state().generation_provider().health_check().await {
        Ok(true) => tracing::info!("Ollama is running"),
        _ => {
            tracing::warn!("Ollama not available");
            tracing::warn!("Please start Ollama:");
            tracing::warn!("  1. Start: ollama serve");
            tracing::warn!("  2. Pull the model: ollama pull phi3");
        }
    }

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("  API Info: http://{}/api/info", server.address());
    println!("\nEndpoints:");
    println!("  POST   /api/ingest        - Upload documents");
    println!("  POST   /api/query         - Ask questions");
    println!("  GET    /api/files         - List files");
    println!("  GET    /api/history       - Conversation history");
    println!("  POST   /api/session/reset - New session");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
