//! Core types for the RAG service

pub mod chat;
pub mod chunk;
pub mod query;
pub mod response;

pub use chat::{ConversationTurn, Role};
pub use chunk::{Chunk, FileInfo};
pub use query::QueryRequest;
pub use response::{
    DeleteFileResponse, FileListResponse, HistoryResponse, IngestError, IngestReceipt,
    IngestResponse, QueryResponse, SessionResetResponse,
};
