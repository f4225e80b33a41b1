//! Session history and reset endpoints

use axum::{extract::State, Json};

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::{HistoryResponse, SessionResetResponse};

/// GET /api/history - Non-expired conversation turns in creation order
pub async fn get_history(State(state): State<AppState>) -> Result<Json<HistoryResponse>> {
    let turns = state.engine().history();
    Ok(Json(HistoryResponse { turns }))
}

/// POST /api/session/reset - Start a fresh session
pub async fn reset_session(State(state): State<AppState>) -> Result<Json<SessionResetResponse>> {
    let summary = state.engine().new_session()?;

    tracing::info!(
        "Session reset ({} turns, {} chunks discarded)",
        summary.turns_discarded,
        summary.chunks_discarded
    );

    Ok(Json(summary))
}
