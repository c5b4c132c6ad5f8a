//! Document ingestion: text extraction, word chunking, and embedding clients.

pub mod document;
pub mod embedding;

pub use document::chunker;
pub use document::chunker::{chunk_document, split_text_into_chunks, Chunk, ChunkConfig};
pub use document::{extract_text, ExtractedDocument, ExtractionError};
