//! Query endpoint

use axum::{extract::State, Json};
use std::time::Instant;

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::{QueryRequest, QueryResponse};

/// POST /api/query - Query the RAG pipeline
pub async fn query_rag(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>> {
    let start = Instant::now();

    tracing::info!("Query: \"{}\"", request.query);

    let outcome = state.engine().query(&request.query, request.top_k).await?;

    let processing_time_ms = start.elapsed().as_millis() as u64;
    tracing::info!(
        "Query completed in {}ms, {} chunks retrieved",
        processing_time_ms,
        outcome.chunks_retrieved
    );

    Ok(Json(QueryResponse {
        query: request.query,
        answer: outcome.answer,
        chunks_retrieved: outcome.chunks_retrieved,
        processing_time_ms,
    }))
}
