//! File listing and deletion endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::{DeleteFileResponse, FileListResponse};

/// GET /api/files - List all indexed files
pub async fn list_files(State(state): State<AppState>) -> Result<Json<FileListResponse>> {
    let files = state.engine().list_files();
    Ok(Json(FileListResponse { files }))
}

/// DELETE /api/files/:id - Delete a file and all of its chunks
///
/// Deleting an unknown file id reports 0 chunks removed; it is not an error.
pub async fn delete_file(
    State(state): State<AppState>,
    Path(file_id): Path<Uuid>,
) -> Result<Json<DeleteFileResponse>> {
    let chunks_deleted = state.engine().delete_file(&file_id);

    tracing::info!("Deleted file {} ({} chunks)", file_id, chunks_deleted);

    Ok(Json(DeleteFileResponse {
        file_id,
        chunks_deleted,
    }))
}
