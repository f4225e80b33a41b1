//! Chunk and file metadata types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bounded span of source-document text plus its embedding and provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Unique chunk ID
    pub id: Uuid,
    /// Identifier grouping all chunks from one upload
    pub file_id: Uuid,
    /// Original filename as uploaded
    pub file_name: String,
    /// Position of this chunk within the source document
    pub chunk_index: u32,
    /// Text content
    pub content: String,
    /// Embedding vector
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub embedding: Vec<f32>,
}

impl Chunk {
    /// Create a new chunk with a fresh id
    pub fn new(
        file_id: Uuid,
        file_name: String,
        chunk_index: u32,
        content: String,
        embedding: Vec<f32>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            file_id,
            file_name,
            chunk_index,
            content,
            embedding,
        }
    }
}

/// A distinct ingested file, derived from the chunks that carry its id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    /// Identifier assigned at upload time
    pub file_id: Uuid,
    /// Display name
    pub file_name: String,
    /// Number of chunks stored for this file
    pub total_chunks: usize,
}
