//! HTTP response types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::chat::ConversationTurn;
use super::chunk::FileInfo;

/// Receipt for one successfully ingested file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestReceipt {
    /// Original filename
    pub file_name: String,
    /// Identifier assigned to this upload
    pub file_id: Uuid,
    /// Number of chunks created and indexed
    pub total_chunks: usize,
}

/// Per-file ingestion failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestError {
    /// Filename that failed
    pub file_name: String,
    /// Human-readable failure description
    pub error: String,
}

/// Response for an ingest request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestResponse {
    /// True when at least one file was ingested
    pub success: bool,
    /// Receipts for ingested files
    pub files: Vec<IngestReceipt>,
    /// Per-file failures
    pub errors: Vec<IngestError>,
    /// Total processing time
    pub processing_time_ms: u64,
}

/// Response for a query request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    /// The original question
    pub query: String,
    /// Generated answer
    pub answer: String,
    /// Number of chunks retrieved as context
    pub chunks_retrieved: usize,
    /// Total processing time
    pub processing_time_ms: u64,
}

/// Response listing all ingested files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileListResponse {
    /// Distinct files currently indexed
    pub files: Vec<FileInfo>,
}

/// Response for a file deletion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteFileResponse {
    /// Identifier that was targeted
    pub file_id: Uuid,
    /// Number of chunks removed (0 when the file was not present)
    pub chunks_deleted: usize,
}

/// Response carrying the non-expired conversation history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    /// Turns in creation order
    pub turns: Vec<ConversationTurn>,
}

/// Response for a session reset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResetResponse {
    /// Conversation turns discarded
    pub turns_discarded: usize,
    /// Chunks discarded from the vector index
    pub chunks_discarded: usize,
}
