//! Error types for the RAG service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type alias for RAG operations
pub type Result<T> = std::result::Result<T, Error>;

/// RAG service errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Text extraction failure
    #[error("Failed to extract text from '{filename}': {message}")]
    Extraction { filename: String, message: String },

    /// Upload with a content type no extractor handles
    #[error("Unsupported content type: {0}")]
    UnsupportedFormat(String),

    /// Embedding provider failure (transport, non-success status, bad payload,
    /// or a vector with the wrong dimension)
    #[error("Embedding provider error: {0}")]
    Embedding(String),

    /// Generation provider failure
    #[error("Generation provider error: {0}")]
    Generation(String),

    /// Ingestion failure, wrapping the first failing stage
    #[error("Ingestion failed during {stage}: {source}")]
    Ingestion {
        stage: &'static str,
        #[source]
        source: Box<Error>,
    },

    /// Vector index write rejection (duplicate id, dimension mismatch,
    /// inconsistent file metadata)
    #[error("Index write error: {0}")]
    IndexWrite(String),

    /// A session store failed mid-reset; state is ambiguous and the caller
    /// should retry the reset
    #[error("Session reset incomplete: {0}")]
    SessionReset(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Create an extraction error
    pub fn extraction(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Extraction {
            filename: filename.into(),
            message: message.into(),
        }
    }

    /// Create an embedding error
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding(message.into())
    }

    /// Create a generation error
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation(message.into())
    }

    /// Create an index write error
    pub fn index_write(message: impl Into<String>) -> Self {
        Self::IndexWrite(message.into())
    }

    /// Wrap a stage failure into an ingestion error
    pub fn ingestion(stage: &'static str, source: Error) -> Self {
        Self::Ingestion {
            stage,
            source: Box::new(source),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            Error::Config(msg) => (StatusCode::BAD_REQUEST, "config_error", msg.clone()),
            Error::Extraction { .. } => {
                (StatusCode::BAD_REQUEST, "extraction_error", self.to_string())
            }
            Error::UnsupportedFormat(ct) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "unsupported_format",
                format!("Unsupported content type: {}", ct),
            ),
            Error::Embedding(msg) => (StatusCode::BAD_GATEWAY, "embedding_error", msg.clone()),
            Error::Generation(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "generation_error", msg.clone())
            }
            Error::Ingestion { source, .. } => {
                // An upload problem is the caller's fault; provider and index
                // failures are not.
                let status = match source.as_ref() {
                    Error::Extraction { .. } => StatusCode::BAD_REQUEST,
                    Error::UnsupportedFormat(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                    Error::Embedding(_) => StatusCode::BAD_GATEWAY,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, "ingestion_error", self.to_string())
            }
            Error::IndexWrite(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "index_write_error", msg.clone())
            }
            Error::SessionReset(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "session_reset_error", msg.clone())
            }
            Error::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg.clone())
            }
            Error::Io(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "io_error",
                err.to_string(),
            ),
            Error::Json(err) => (StatusCode::BAD_REQUEST, "json_error", err.to_string()),
            Error::Http(err) => (StatusCode::BAD_GATEWAY, "http_error", err.to_string()),
        };

        let body = Json(json!({
            "error": {
                "type": error_type,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
