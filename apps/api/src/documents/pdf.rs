use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use crate::documents::data_url::decode_data_url;
use crate::documents::{DocumentExtractor, ExtractionError};

/// Extracts text from raw PDF bytes.
///
/// CPU-bound and occasionally panics on malformed input; call it from the
/// blocking pool (see `PdfTextExtractor`).
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    if bytes.is_empty() {
        return Err(ExtractionError::Empty);
    }

    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractionError::Pdf(e.to_string()))?;

    if text.trim().is_empty() {
        return Err(ExtractionError::NoText);
    }
    Ok(text)
}

/// `DocumentExtractor` backed by `pdf-extract`, run on tokio's blocking pool.
#[derive(Debug, Clone, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub async fn extract_bytes(&self, bytes: Bytes) -> Result<String, ExtractionError> {
        let size = bytes.len();
        let text = tokio::task::spawn_blocking(move || extract_pdf_text(&bytes))
            .await
            .map_err(|e| ExtractionError::Aborted(e.to_string()))??;

        debug!("Extracted {} chars from {} byte PDF", text.len(), size);
        Ok(text)
    }
}

#[async_trait]
impl DocumentExtractor for PdfTextExtractor {
    async fn extract_text(&self, encoded: &str) -> Result<String, ExtractionError> {
        let bytes = decode_data_url(encoded)?;
        self.extract_bytes(bytes).await
    }
}
