//! Text extraction from uploaded files

use crate::error::{Error, Result};

/// Trait for extracting plain text from uploaded file bytes
///
/// The extractor is an external collaborator of the ingestion pipeline;
/// anything beyond the shipped formats can be plugged in behind this trait.
pub trait TextExtractor: Send + Sync {
    /// Extract text from `data`, using the declared content type and the
    /// filename for diagnostics
    fn extract(&self, data: &[u8], content_type: &str, file_name: &str) -> Result<String>;
}

/// Default extractor: PDF via `pdf-extract`, text-like formats via UTF-8
pub struct DocumentExtractor;

impl DocumentExtractor {
    /// Content types decoded as UTF-8 text
    fn is_text_like(content_type: &str) -> bool {
        content_type.starts_with("text/")
            || matches!(
                content_type,
                "application/json"
                    | "application/xml"
                    | "application/csv"
                    | "application/octet-stream"
                    | ""
            )
    }
}

impl TextExtractor for DocumentExtractor {
    fn extract(&self, data: &[u8], content_type: &str, file_name: &str) -> Result<String> {
        // Strip any parameters, e.g. "text/plain; charset=utf-8"
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or(content_type)
            .trim()
            .to_ascii_lowercase();

        if essence == "application/pdf" {
            return pdf_extract::extract_text_from_mem(data)
                .map_err(|e| Error::extraction(file_name, e.to_string()));
        }

        if Self::is_text_like(&essence) {
            return String::from_utf8(data.to_vec())
                .map_err(|_| Error::extraction(file_name, "file is not valid UTF-8"));
        }

        Err(Error::UnsupportedFormat(essence))
    }
}
