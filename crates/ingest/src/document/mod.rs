pub mod chunker;
mod pdf;
mod txt;

use docrag_core::DocumentKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("PDF extraction failed: {0}")]
    PdfError(String),
}

/// Result of extracting text from an upload.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    /// Original filename.
    pub filename: String,
    pub kind: DocumentKind,
    /// Unstructured text; no page or paragraph structure is kept.
    pub text: String,
}

impl ExtractedDocument {
    pub fn total_chars(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Extract text from file bytes. `.pdf` files go through the PDF extractor;
/// everything else is decoded as UTF-8.
pub fn extract_text(bytes: &[u8], filename: &str) -> Result<ExtractedDocument, ExtractionError> {
    let kind = DocumentKind::from_filename(filename);

    let text = match kind {
        DocumentKind::Pdf => pdf::extract_pdf(bytes)?,
        DocumentKind::Text => txt::extract_txt(bytes),
    };

    Ok(ExtractedDocument {
        filename: filename.to_string(),
        kind,
        text,
    })
}
