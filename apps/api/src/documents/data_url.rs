use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use bytes::Bytes;

use crate::documents::ExtractionError;

/// Strips a `data:<mime>[;params];base64,` envelope and decodes the payload.
///
/// A bare base64 string without an envelope is accepted as-is. Non-base64
/// data URLs (`data:text/plain,hello`) are rejected.
pub fn decode_data_url(encoded: &str) -> Result<Bytes, ExtractionError> {
    let trimmed = encoded.trim();
    if trimmed.is_empty() {
        return Err(ExtractionError::Empty);
    }

    let payload = match trimmed.strip_prefix("data:") {
        Some(rest) => {
            let (header, data) = rest
                .split_once(',')
                .ok_or(ExtractionError::MalformedEnvelope)?;
            if !header.ends_with(";base64") {
                return Err(ExtractionError::MalformedEnvelope);
            }
            data
        }
        None => trimmed,
    };

    // MIME-wrapped payloads carry line breaks
    let compact: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    if compact.is_empty() {
        return Err(ExtractionError::Empty);
    }

    let raw = BASE64.decode(compact.as_bytes())?;
    if raw.is_empty() {
        return Err(ExtractionError::Empty);
    }
    Ok(Bytes::from(raw))
}
