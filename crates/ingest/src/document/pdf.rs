use super::ExtractionError;

pub fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractionError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractionError::PdfError(e.to_string()))?;

    if text.trim().is_empty() {
        // Scanned/image PDFs have no text layer; the caller decides what an
        // empty document means.
        tracing::warn!("PDF contains no extractable text layer");
    } else {
        tracing::debug!("Extracted {} chars from PDF", text.len());
    }

    Ok(text)
}
