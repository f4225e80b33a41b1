//! Session state: one vector index plus one conversation log
//!
//! All mutable pipeline state lives here, owned explicitly rather than in
//! process-wide globals, so an engine can be handed any session and tests can
//! build as many as they like.

use crate::chat::ConversationLog;
use crate::config::RagConfig;
use crate::error::Result;
use crate::retrieval::VectorIndex;
use crate::types::SessionResetResponse;

/// The current generation of index + conversation state
pub struct Session {
    index: VectorIndex,
    log: ConversationLog,
}

impl Session {
    /// Create a fresh session from configuration
    pub fn new(config: &RagConfig) -> Self {
        Self {
            index: VectorIndex::new(config.embeddings.dimensions),
            log: ConversationLog::new(config.chat.history_ttl_secs),
        }
    }

    /// The session's vector index
    pub fn index(&self) -> &VectorIndex {
        &self.index
    }

    /// The session's conversation log
    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    /// Reset both stores; no prior chunks or turns remain visible afterwards
    ///
    /// Both resets complete before this returns. A fallible session store
    /// that failed mid-reset would surface as [`crate::Error::SessionReset`];
    /// the in-memory stores always complete.
    pub fn reset(&self) -> Result<SessionResetResponse> {
        let turns_discarded = self.log.reset();
        let chunks_discarded = self.index.reset();
        Ok(SessionResetResponse {
            turns_discarded,
            chunks_discarded,
        })
    }
}
