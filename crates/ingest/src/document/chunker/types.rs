//! Chunk configuration and output types.

use docrag_core::config::{ChunkingConfig, DEFAULT_CHUNK_MAX_TOKENS, DEFAULT_TOKENS_PER_WORD};

// ── Configuration ───────────────────────────────────────────────────────────

/// Configuration for the chunking engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkConfig {
    /// Token budget per chunk (default: 200).
    pub max_tokens: usize,
    /// Average tokens per word used to estimate a chunk's size (default: 2.5).
    pub tokens_per_word: f64,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_CHUNK_MAX_TOKENS,
            tokens_per_word: DEFAULT_TOKENS_PER_WORD,
        }
    }
}

impl From<&ChunkingConfig> for ChunkConfig {
    fn from(config: &ChunkingConfig) -> Self {
        Self {
            max_tokens: config.max_tokens,
            tokens_per_word: config.tokens_per_word,
        }
    }
}

impl ChunkConfig {
    pub fn with_max_tokens(max_tokens: usize) -> Self {
        Self {
            max_tokens,
            ..Self::default()
        }
    }

    /// Word budget per chunk: `floor(max_tokens / tokens_per_word)`.
    ///
    /// May be 0 for tiny budgets, in which case every word becomes its own
    /// chunk. A non-positive or non-finite ratio falls back to the default.
    pub fn max_words(&self) -> usize {
        let per_word = if self.tokens_per_word.is_finite() && self.tokens_per_word > 0.0 {
            self.tokens_per_word
        } else {
            DEFAULT_TOKENS_PER_WORD
        };
        (self.max_tokens as f64 / per_word).floor() as usize
    }

    /// Estimated token count of a run of `words` words.
    pub fn estimated_tokens(&self, words: usize) -> f64 {
        words as f64 * self.tokens_per_word
    }
}

// ── Chunk output ────────────────────────────────────────────────────────────

/// A chunk of a document, ready for embedding.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    /// 0-based position within the document's chunk sequence.
    pub index: usize,
    /// Words of the chunk joined by single spaces.
    pub content: String,
    /// Number of words in `content`.
    pub word_count: usize,
}
