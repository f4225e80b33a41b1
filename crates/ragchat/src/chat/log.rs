//! Append-only conversation log with per-turn expiry
//!
//! Turns carry strictly increasing sequence numbers assigned under the write
//! lock, so concurrent appends can never collide. Expired turns are pruned on
//! append and filtered out of reads; either way they are never returned.

use chrono::Utc;
use parking_lot::RwLock;

use crate::types::{ConversationTurn, Role};

struct LogInner {
    turns: Vec<ConversationTurn>,
    next_sequence: u64,
}

/// Append-only, time-ordered store of conversation turns
pub struct ConversationLog {
    /// Time-to-live for a turn, in seconds
    ttl_seconds: u64,
    inner: RwLock<LogInner>,
}

impl ConversationLog {
    /// Create an empty log with the given turn TTL
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            ttl_seconds,
            inner: RwLock::new(LogInner {
                turns: Vec::new(),
                next_sequence: 0,
            }),
        }
    }

    fn is_expired(&self, turn: &ConversationTurn) -> bool {
        let age = Utc::now().signed_duration_since(turn.created_at);
        age.num_seconds() >= 0 && age.num_seconds() as u64 > self.ttl_seconds
    }

    /// Append a turn, assigning the next sequence number
    pub fn append(&self, role: Role, message: impl Into<String>) -> ConversationTurn {
        let mut inner = self.inner.write();

        let turn = ConversationTurn {
            sequence: inner.next_sequence,
            role,
            message: message.into(),
            created_at: Utc::now(),
        };
        inner.next_sequence += 1;

        // Opportunistic purge; reads filter lazily as well
        inner.turns.retain(|t| !self.is_expired(t));

        inner.turns.push(turn.clone());
        turn
    }

    /// All non-expired turns in creation order
    pub fn history(&self) -> Vec<ConversationTurn> {
        let inner = self.inner.read();
        inner
            .turns
            .iter()
            .filter(|t| !self.is_expired(t))
            .cloned()
            .collect()
    }

    /// Discard all turns and reset the sequence counter to zero
    pub fn reset(&self) -> usize {
        let mut inner = self.inner.write();
        let dropped = inner.turns.len();
        inner.turns.clear();
        inner.next_sequence = 0;
        dropped
    }

    /// Number of non-expired turns
    pub fn len(&self) -> usize {
        let inner = self.inner.read();
        inner.turns.iter().filter(|t| !self.is_expired(t)).count()
    }

    /// Check if the log holds no live turns
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
