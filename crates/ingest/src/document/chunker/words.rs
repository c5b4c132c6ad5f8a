//! Greedy word packing.

use super::types::{Chunk, ChunkConfig};

/// Split text into words on runs of whitespace. Leading and trailing
/// whitespace never produce empty words, so blank text yields no words.
pub fn split_words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Pack `words` into chunks of at most `max_words` words each.
///
/// A chunk is closed when adding the next word would push it past
/// `max_words`; that word starts the next chunk. With `max_words == 0` the
/// check always trips, so every word ends up alone in its own chunk.
pub fn chunk_words(words: &[&str], max_words: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::with_capacity(max_words.clamp(1, words.len().max(1)));

    for &word in words {
        if !current.is_empty() && current.len() + 1 > max_words {
            chunks.push(current.join(" "));
            current.clear();
        }
        current.push(word);
    }

    if !current.is_empty() {
        chunks.push(current.join(" "));
    }

    chunks
}

/// Chunk `text` with an explicit configuration.
pub fn chunk_text(text: &str, config: &ChunkConfig) -> Vec<String> {
    chunk_words(&split_words(text), config.max_words())
}

/// Chunk `text` with a token budget and the default tokens-per-word ratio.
///
/// Empty or whitespace-only text yields an empty vector.
pub fn split_text_into_chunks(text: &str, max_tokens: usize) -> Vec<String> {
    chunk_text(text, &ChunkConfig::with_max_tokens(max_tokens))
}

/// Chunk a document, attaching each chunk's position and word count.
pub fn chunk_document(text: &str, config: &ChunkConfig) -> Vec<Chunk> {
    chunk_text(text, config)
        .into_iter()
        .enumerate()
        .map(|(index, content)| Chunk {
            index,
            word_count: content.split(' ').count(),
            content,
        })
        .collect()
}
