//! In-memory vector index for chunk storage and search
//!
//! Similarity is cosine; results are ranked descending with ties broken by
//! chunk id so equal inputs always produce the same ordering. A secondary
//! file index (file_id -> file_name + chunk ids) is maintained in the same
//! critical section as the chunk map, so file listings and deletions never
//! scan the whole store.

use std::collections::{BTreeMap, HashMap, HashSet};

use parking_lot::RwLock;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::types::{Chunk, FileInfo};

/// Search result with chunk and similarity
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The retrieved chunk
    pub chunk: Chunk,
    /// Cosine similarity to the query vector (higher is better)
    pub similarity: f32,
}

struct IndexInner {
    /// Stored chunks by id
    chunks: HashMap<Uuid, Chunk>,
    /// Secondary index: file_id -> file entry
    files: BTreeMap<Uuid, FileEntry>,
}

struct FileEntry {
    file_name: String,
    chunk_ids: Vec<Uuid>,
}

/// In-memory vector index guarded by a single reader-writer lock
///
/// Writers (`add`, `delete_by_file`, `reset`) are mutually exclusive with
/// everything; readers (`query`, `list_files`, `len`) run concurrently with
/// each other.
pub struct VectorIndex {
    /// Embedding dimensions every stored vector must have
    dimensions: usize,
    inner: RwLock<IndexInner>,
}

impl VectorIndex {
    /// Create an empty index for vectors of the given dimension
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            inner: RwLock::new(IndexInner {
                chunks: HashMap::new(),
                files: BTreeMap::new(),
            }),
        }
    }

    /// Insert a batch of chunks, all or nothing
    ///
    /// Rejected without touching the store: duplicate ids (within the batch
    /// or against stored chunks), embeddings of the wrong dimension, and a
    /// file_name that disagrees with what is already recorded for the same
    /// file_id.
    pub fn add(&self, chunks: &[Chunk]) -> Result<()> {
        let mut inner = self.inner.write();

        // Validate the whole batch before mutating anything
        let mut batch_ids = HashSet::new();
        let mut batch_names: HashMap<Uuid, &str> = HashMap::new();
        for chunk in chunks {
            if chunk.embedding.len() != self.dimensions {
                return Err(Error::index_write(format!(
                    "chunk {} has a {}-dimensional embedding, index expects {}",
                    chunk.id,
                    chunk.embedding.len(),
                    self.dimensions
                )));
            }
            if inner.chunks.contains_key(&chunk.id) || !batch_ids.insert(chunk.id) {
                return Err(Error::index_write(format!("duplicate chunk id: {}", chunk.id)));
            }
            let recorded = inner
                .files
                .get(&chunk.file_id)
                .map(|entry| entry.file_name.as_str())
                .or_else(|| batch_names.get(&chunk.file_id).copied());
            if let Some(name) = recorded {
                if name != chunk.file_name {
                    return Err(Error::index_write(format!(
                        "file {} is named '{}' but chunk {} carries '{}'",
                        chunk.file_id, name, chunk.id, chunk.file_name
                    )));
                }
            }
            batch_names.insert(chunk.file_id, &chunk.file_name);
        }

        for chunk in chunks {
            inner
                .files
                .entry(chunk.file_id)
                .or_insert_with(|| FileEntry {
                    file_name: chunk.file_name.clone(),
                    chunk_ids: Vec::new(),
                })
                .chunk_ids
                .push(chunk.id);
            inner.chunks.insert(chunk.id, chunk.clone());
        }

        Ok(())
    }

    /// Search for the `top_k` most similar chunks
    ///
    /// Returns `min(top_k, len)` results sorted by non-increasing similarity;
    /// an empty index yields an empty vector.
    pub fn query(&self, query_embedding: &[f32], top_k: usize) -> Vec<SearchResult> {
        let inner = self.inner.read();

        let mut results: Vec<SearchResult> = inner
            .chunks
            .values()
            .map(|chunk| SearchResult {
                similarity: cosine_similarity(query_embedding, &chunk.embedding),
                chunk: chunk.clone(),
            })
            .collect();

        results.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.chunk.id.cmp(&b.chunk.id))
        });
        results.truncate(top_k);

        results
    }

    /// List distinct files derived from the secondary index
    pub fn list_files(&self) -> Vec<FileInfo> {
        let inner = self.inner.read();
        inner
            .files
            .iter()
            .map(|(file_id, entry)| FileInfo {
                file_id: *file_id,
                file_name: entry.file_name.clone(),
                total_chunks: entry.chunk_ids.len(),
            })
            .collect()
    }

    /// Delete all chunks for a file, returning how many were removed
    ///
    /// An absent file_id deletes nothing and is not an error.
    pub fn delete_by_file(&self, file_id: &Uuid) -> usize {
        let mut inner = self.inner.write();

        let Some(entry) = inner.files.remove(file_id) else {
            return 0;
        };

        let mut deleted = 0;
        for chunk_id in &entry.chunk_ids {
            if inner.chunks.remove(chunk_id).is_some() {
                deleted += 1;
            }
        }

        deleted
    }

    /// Discard every chunk, returning how many were dropped
    ///
    /// The id namespace is cleared with the chunks; ids are free to reuse.
    pub fn reset(&self) -> usize {
        let mut inner = self.inner.write();
        let dropped = inner.chunks.len();
        inner.chunks.clear();
        inner.files.clear();
        dropped
    }

    /// Number of stored chunks
    pub fn len(&self) -> usize {
        self.inner.read().chunks.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Cosine similarity between two vectors
///
/// Mismatched lengths and zero vectors score 0.0 rather than erroring.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
