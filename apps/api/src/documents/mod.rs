//! Document Text Extractor: turns an uploaded document (base64 data URL) into plain text.
//!
//! Decoding and parsing are split: `data_url` strips the envelope and yields raw
//! bytes, `pdf` runs the parser. `DocumentExtractor` is the seam the insight
//! pipeline depends on, carried in `AppState` as `Arc<dyn DocumentExtractor>`.

pub mod data_url;
pub mod pdf;

use async_trait::async_trait;
use thiserror::Error;

pub use pdf::PdfTextExtractor;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("document payload is empty")]
    Empty,

    #[error("document is not a base64 data URL")]
    MalformedEnvelope,

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("not a readable PDF: {0}")]
    Pdf(String),

    #[error("PDF contains no extractable text")]
    NoText,

    #[error("PDF extraction aborted: {0}")]
    Aborted(String),
}

#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    /// Decodes `encoded` and returns the text of every page in parser order.
    async fn extract_text(&self, encoded: &str) -> Result<String, ExtractionError>;
}
