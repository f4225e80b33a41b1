//! API routes for the RAG server

pub mod files;
pub mod ingest;
pub mod query;
pub mod session;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        // Ingestion - with larger body limit for file uploads
        .route(
            "/ingest",
            post(ingest::ingest_files).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        // Query
        .route("/query", post(query::query_rag))
        // File management
        .route("/files", get(files::list_files))
        .route("/files/:id", delete(files::delete_file))
        // Session
        .route("/history", get(session::get_history))
        .route("/session/reset", post(session::reset_session))
        // Info
        .route("/info", get(info))
}

/// API info endpoint
async fn info() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "ragchat",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Session-scoped RAG chat with document ingestion and vector retrieval",
        "endpoints": {
            "POST /api/ingest": "Upload and index documents",
            "POST /api/query": "Ask a question over the ingested documents",
            "GET /api/files": "List indexed files",
            "DELETE /api/files/:id": "Delete a file and its chunks",
            "GET /api/history": "Conversation history for the active session",
            "POST /api/session/reset": "Discard all documents and history"
        }
    }))
}
