//! Word-budget chunking engine.
//!
//! Splits extracted text on whitespace and greedily packs the words into
//! chunks whose estimated token count stays within a configured budget.
//! Chunks never overlap and never reorder words.

mod types;
mod words;

pub use types::{Chunk, ChunkConfig};
pub use words::{chunk_document, chunk_text, chunk_words, split_text_into_chunks, split_words};

#[cfg(test)]
mod tests;
