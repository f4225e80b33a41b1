//! Conversation turn types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Speaker role for a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The querying user
    User,
    /// The generated answer
    Assistant,
}

/// One message in the conversation log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Monotonically increasing position within the session
    pub sequence: u64,
    /// Speaker role
    pub role: Role,
    /// Message text
    pub message: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}
