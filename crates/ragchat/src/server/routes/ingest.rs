//! Document ingestion endpoint

use axum::{
    extract::{Multipart, State},
    Json,
};
use std::time::Instant;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{IngestError, IngestResponse};

/// POST /api/ingest - Upload and index files
pub async fn ingest_files(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<IngestResponse>> {
    let start = Instant::now();
    let mut files = Vec::new();
    let mut errors = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::internal(format!("Failed to read multipart field: {}", e)))?
    {
        let file_name = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("file_{}.bin", Uuid::new_v4()));

        // Fall back to a filename-based guess when the part carries no type
        let content_type = field
            .content_type()
            .map(|ct| ct.to_string())
            .unwrap_or_else(|| {
                mime_guess::from_path(&file_name)
                    .first_or_octet_stream()
                    .essence_str()
                    .to_string()
            });

        let data = match field.bytes().await {
            Ok(d) => d,
            Err(e) => {
                errors.push(IngestError {
                    file_name,
                    error: format!("Failed to read file: {}", e),
                });
                continue;
            }
        };

        tracing::info!("Processing file: {} ({} bytes)", file_name, data.len());

        match state.engine().ingest(&data, &file_name, &content_type).await {
            Ok(receipt) => {
                tracing::info!(
                    "Ingested '{}': {} chunks in {:.1}s",
                    receipt.file_name,
                    receipt.total_chunks,
                    start.elapsed().as_secs_f64()
                );
                files.push(receipt);
            }
            Err(e) => {
                tracing::error!("Failed to ingest {}: {}", file_name, e);
                errors.push(IngestError {
                    file_name,
                    error: e.to_string(),
                });
            }
        }
    }

    let processing_time_ms = start.elapsed().as_millis() as u64;

    Ok(Json(IngestResponse {
        success: !files.is_empty(),
        files,
        errors,
        processing_time_ms,
    }))
}
