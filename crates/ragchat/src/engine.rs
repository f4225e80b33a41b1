//! Retrieval orchestrator
//!
//! Drives ingestion (extract -> chunk -> embed -> index) and querying
//! (embed -> search -> generate -> record turns) over one session. Provider
//! calls are awaited without holding any index or log lock; only the store
//! mutations themselves are synchronized.

use std::sync::Arc;

use uuid::Uuid;

use crate::config::RagConfig;
use crate::embeddings::BatchEmbedder;
use crate::error::{Error, Result};
use crate::ingestion::{TextChunker, TextExtractor};
use crate::providers::{EmbeddingProvider, GenerationProvider};
use crate::session::Session;
use crate::types::{Chunk, ConversationTurn, FileInfo, IngestReceipt, Role, SessionResetResponse};

/// Result of a query, before the HTTP layer adds timing
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    /// Generated answer
    pub answer: String,
    /// Number of chunks retrieved as context
    pub chunks_retrieved: usize,
}

/// The coordinating component of the pipeline
pub struct RagEngine {
    chunker: TextChunker,
    extractor: Arc<dyn TextExtractor>,
    embedder: BatchEmbedder,
    generator: Arc<dyn GenerationProvider>,
    session: Arc<Session>,
}

impl RagEngine {
    /// Create an engine over the given session and provider seams
    pub fn new(
        config: &RagConfig,
        extractor: Arc<dyn TextExtractor>,
        embedding_provider: Arc<dyn EmbeddingProvider>,
        generator: Arc<dyn GenerationProvider>,
        session: Arc<Session>,
    ) -> Self {
        Self {
            chunker: TextChunker::new(config.chunking.chunk_size, config.chunking.chunk_overlap),
            extractor,
            embedder: BatchEmbedder::new(embedding_provider, config.embeddings.batch_size),
            generator,
            session,
        }
    }

    /// The session this engine operates on
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Ingest one uploaded file: extract, chunk, embed, index
    ///
    /// All or nothing: a failure in any stage surfaces as
    /// [`Error::Ingestion`] and leaves the index untouched. A file from which
    /// no text survives chunking is a success with `total_chunks` 0.
    pub async fn ingest(
        &self,
        data: &[u8],
        file_name: &str,
        content_type: &str,
    ) -> Result<IngestReceipt> {
        let text = self
            .extractor
            .extract(data, content_type, file_name)
            .map_err(|e| Error::ingestion("extraction", e))?;

        let texts = self.chunker.chunk(&text);
        let file_id = Uuid::new_v4();

        if texts.is_empty() {
            tracing::info!("'{}' produced no chunks, nothing indexed", file_name);
            return Ok(IngestReceipt {
                file_name: file_name.to_string(),
                file_id,
                total_chunks: 0,
            });
        }

        let embeddings = self
            .embedder
            .embed(&texts)
            .await
            .map_err(|e| Error::ingestion("embedding", e))?;

        let chunks: Vec<Chunk> = texts
            .into_iter()
            .zip(embeddings)
            .enumerate()
            .map(|(i, (content, embedding))| {
                Chunk::new(file_id, file_name.to_string(), i as u32, content, embedding)
            })
            .collect();

        self.session
            .index()
            .add(&chunks)
            .map_err(|e| Error::ingestion("indexing", e))?;

        tracing::info!("Ingested '{}': {} chunks", file_name, chunks.len());

        Ok(IngestReceipt {
            file_name: file_name.to_string(),
            file_id,
            total_chunks: chunks.len(),
        })
    }

    /// Answer a query over the session's documents and record the exchange
    ///
    /// The generation provider is invoked even when the index is empty; it
    /// decides how to answer without context. The user and assistant turns
    /// are appended only after generation succeeded, so a failed call never
    /// leaves a fabricated exchange in the history.
    pub async fn query(&self, query: &str, top_k: usize) -> Result<QueryOutcome> {
        let embeddings = self.embedder.embed(&[query.to_string()]).await?;
        let query_embedding = embeddings
            .into_iter()
            .next()
            .ok_or_else(|| Error::embedding("provider returned no vector for the query"))?;

        let results = self.session.index().query(&query_embedding, top_k);
        let context: Vec<String> = results.iter().map(|r| r.chunk.content.clone()).collect();

        let answer = self.generator.answer(query, &context).await?;

        let log = self.session.log();
        log.append(Role::User, query);
        log.append(Role::Assistant, answer.clone());

        Ok(QueryOutcome {
            answer,
            chunks_retrieved: results.len(),
        })
    }

    /// Start a fresh session: discard all chunks and all turns
    pub fn new_session(&self) -> Result<SessionResetResponse> {
        self.session.reset()
    }

    /// Distinct files currently indexed
    pub fn list_files(&self) -> Vec<FileInfo> {
        self.session.index().list_files()
    }

    /// Delete all chunks of one file, returning how many were removed
    pub fn delete_file(&self, file_id: &Uuid) -> usize {
        self.session.index().delete_by_file(file_id)
    }

    /// Non-expired conversation turns in creation order
    pub fn history(&self) -> Vec<ConversationTurn> {
        self.session.log().history()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingestion::DocumentExtractor;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const DIMS: usize = 8;

    /// Deterministic embedder: a fixed-dimension profile of the input bytes
    struct MockEmbedder {
        fail: bool,
    }

    #[async_trait]
    impl EmbeddingProvider for MockEmbedder {
        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            if self.fail {
                return Err(Error::embedding("embedding server down"));
            }
            Ok(texts
                .iter()
                .map(|t| {
                    let mut v = vec![0.0f32; DIMS];
                    for (i, b) in t.bytes().enumerate() {
                        v[i % DIMS] += f32::from(b) / 255.0;
                    }
                    v
                })
                .collect())
        }

        fn dimensions(&self) -> usize {
            DIMS
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        fn name(&self) -> &str {
            "mock"
        }
    }

    /// Generator that reports how much context it saw
    struct MockGenerator {
        fail: bool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl GenerationProvider for MockGenerator {
        async fn answer(&self, _query: &str, context: &[String]) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(Error::generation("model unavailable"));
            }
            Ok(format!("answer from {} chunks", context.len()))
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        fn name(&self) -> &str {
            "mock"
        }

        fn model(&self) -> &str {
            "mock-model"
        }
    }

    fn build_engine(
        embed_fail: bool,
        generate_fail: bool,
    ) -> (RagEngine, Arc<MockGenerator>) {
        let mut config = RagConfig::default();
        config.embeddings.dimensions = DIMS;

        let generator = Arc::new(MockGenerator {
            fail: generate_fail,
            calls: AtomicUsize::new(0),
        });
        let session = Arc::new(Session::new(&config));
        let engine = RagEngine::new(
            &config,
            Arc::new(DocumentExtractor),
            Arc::new(MockEmbedder { fail: embed_fail }),
            Arc::clone(&generator) as Arc<dyn GenerationProvider>,
            session,
        );
        (engine, generator)
    }

    /// Distinct numbered words, roughly `target` characters
    fn document(target: usize) -> String {
        let mut text = String::new();
        let mut i = 0u32;
        while text.len() < target {
            text.push_str(&format!("word{:04} ", i));
            i += 1;
        }
        text.truncate(target);
        text
    }

    #[tokio::test]
    async fn test_end_to_end_scenario() {
        let (engine, _) = build_engine(false, false);

        // Ingest a 2500-character document with chunk_size 1000 / overlap 200
        let doc = document(2500);
        let receipt = engine
            .ingest(doc.as_bytes(), "doc.txt", "text/plain")
            .await
            .expect("ingest");
        assert!((3..=4).contains(&receipt.total_chunks));
        assert_eq!(engine.session().index().len(), receipt.total_chunks);

        let files = engine.list_files();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_id, receipt.file_id);
        assert_eq!(files[0].total_chunks, receipt.total_chunks);

        // Query with top_k = 2: exactly 2 chunks of context
        let outcome = engine.query("what is word0003?", 2).await.expect("query");
        assert_eq!(outcome.chunks_retrieved, 2);
        assert_eq!(outcome.answer, "answer from 2 chunks");

        // Scores come back non-increasing from the index
        let embedding = engine
            .embedder
            .embed(&["what is word0003?".to_string()])
            .await
            .expect("embed")
            .remove(0);
        let results = engine.session().index().query(&embedding, 2);
        assert_eq!(results.len(), 2);
        assert!(results[0].similarity >= results[1].similarity);

        // Fresh session, then a clean two-turn exchange
        engine.new_session().expect("reset");
        let log = engine.session().log();
        log.append(Role::User, "hello");
        log.append(Role::Assistant, "hi");

        let history = engine.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].sequence, 0);
        assert_eq!(history[0].role, Role::User);
        assert_eq!(history[0].message, "hello");
        assert_eq!(history[1].sequence, 1);
        assert_eq!(history[1].role, Role::Assistant);
        assert_eq!(history[1].message, "hi");
    }

    #[tokio::test]
    async fn test_query_records_turns_in_order() {
        let (engine, _) = build_engine(false, false);

        engine.query("first question", 5).await.expect("query");

        let history = engine.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, Role::User);
        assert_eq!(history[0].message, "first question");
        assert_eq!(history[1].role, Role::Assistant);
    }

    #[tokio::test]
    async fn test_empty_index_still_invokes_generator() {
        let (engine, generator) = build_engine(false, false);

        let outcome = engine.query("anything?", 5).await.expect("query");
        assert_eq!(outcome.chunks_retrieved, 0);
        assert_eq!(outcome.answer, "answer from 0 chunks");
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_generation_leaves_no_turns() {
        let (engine, _) = build_engine(false, true);

        let err = engine.query("anything?", 5).await.expect_err("generation fails");
        assert!(matches!(err, Error::Generation(_)));
        assert!(engine.history().is_empty());
    }

    #[tokio::test]
    async fn test_failed_embedding_aborts_ingest() {
        let (engine, _) = build_engine(true, false);

        let err = engine
            .ingest(b"some document text", "doc.txt", "text/plain")
            .await
            .expect_err("embedding fails");
        assert!(matches!(err, Error::Ingestion { stage: "embedding", .. }));
        assert!(engine.session().index().is_empty());
        assert!(engine.list_files().is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_upload_wraps_extraction_stage() {
        let (engine, _) = build_engine(false, false);

        let err = engine
            .ingest(&[0u8, 159, 146, 150], "img.png", "image/png")
            .await
            .expect_err("unsupported");
        assert!(matches!(err, Error::Ingestion { stage: "extraction", .. }));
    }

    #[tokio::test]
    async fn test_empty_document_is_a_zero_chunk_success() {
        let (engine, _) = build_engine(false, false);

        let receipt = engine
            .ingest(b"", "empty.txt", "text/plain")
            .await
            .expect("empty ok");
        assert_eq!(receipt.total_chunks, 0);
        assert!(engine.list_files().is_empty());
    }

    #[tokio::test]
    async fn test_delete_scopes_to_one_file() {
        let (engine, _) = build_engine(false, false);

        let a = engine
            .ingest(document(1500).as_bytes(), "a.txt", "text/plain")
            .await
            .expect("ingest a");
        let b = engine
            .ingest(document(1500).as_bytes(), "b.txt", "text/plain")
            .await
            .expect("ingest b");

        let deleted = engine.delete_file(&a.file_id);
        assert_eq!(deleted, a.total_chunks);

        let files = engine.list_files();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_id, b.file_id);
    }

    #[tokio::test]
    async fn test_new_session_resets_everything() {
        let (engine, _) = build_engine(false, false);

        engine
            .ingest(document(1500).as_bytes(), "a.txt", "text/plain")
            .await
            .expect("ingest");
        engine.query("a question", 3).await.expect("query");

        let summary = engine.new_session().expect("reset");
        assert!(summary.chunks_discarded > 0);
        assert_eq!(summary.turns_discarded, 2);

        assert!(engine.list_files().is_empty());
        assert!(engine.history().is_empty());
        assert!(engine.session().index().query(&vec![1.0; DIMS], 5).is_empty());
    }
}
