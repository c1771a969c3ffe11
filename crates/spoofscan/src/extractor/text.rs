use crate::error::ExtractError;

/// Plain text and Markdown are both taken verbatim as UTF-8.
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractError> {
    String::from_utf8(bytes.to_vec())
        .map_err(|e| ExtractError::ExtractionFailure(format!("File is not valid UTF-8: {}", e)))
}
