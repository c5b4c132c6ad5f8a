//! Tests for the chunking engine.

use super::types::ChunkConfig;
use super::words::{chunk_document, chunk_text, chunk_words, split_text_into_chunks, split_words};

fn numbered_words(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("w{i}")).collect()
}

fn rejoin(chunks: &[String]) -> Vec<String> {
    chunks
        .iter()
        .flat_map(|c| c.split(' ').map(str::to_string))
        .collect()
}

// ── Word budget ─────────────────────────────────────────────────────

#[test]
fn max_words_rounds_down() {
    assert_eq!(ChunkConfig::with_max_tokens(200).max_words(), 80);
    assert_eq!(ChunkConfig::with_max_tokens(8).max_words(), 3);
    assert_eq!(ChunkConfig::with_max_tokens(5).max_words(), 2);
    assert_eq!(ChunkConfig::with_max_tokens(2).max_words(), 0);
    assert_eq!(ChunkConfig::with_max_tokens(1).max_words(), 0);
}

#[test]
fn invalid_ratio_uses_default() {
    let config = ChunkConfig {
        max_tokens: 200,
        tokens_per_word: 0.0,
    };
    assert_eq!(config.max_words(), 80);

    let config = ChunkConfig {
        max_tokens: 200,
        tokens_per_word: f64::NAN,
    };
    assert_eq!(config.max_words(), 80);
}

#[test]
fn custom_ratio() {
    let config = ChunkConfig {
        max_tokens: 100,
        tokens_per_word: 1.0,
    };
    assert_eq!(config.max_words(), 100);
    assert_eq!(config.estimated_tokens(40), 40.0);
}

// ── Scenarios ───────────────────────────────────────────────────────

#[test]
fn short_text_is_single_chunk() {
    assert_eq!(split_text_into_chunks("a b c d e", 200), vec!["a b c d e"]);
}

#[test]
fn ten_words_three_per_chunk() {
    let text = numbered_words(10).join(" ");
    let chunks = split_text_into_chunks(&text, 8);
    assert_eq!(chunks, vec!["w1 w2 w3", "w4 w5 w6", "w7 w8 w9", "w10"]);
}

#[test]
fn tiny_budget_puts_every_word_alone() {
    let chunks = split_text_into_chunks("alpha beta gamma", 1);
    assert_eq!(chunks, vec!["alpha", "beta", "gamma"]);

    let chunks = chunk_words(&["x", "y"], 0);
    assert_eq!(chunks, vec!["x", "y"]);
}

#[test]
fn empty_text_yields_no_chunks() {
    assert!(split_text_into_chunks("", 200).is_empty());
    assert!(split_text_into_chunks("   \n\t  ", 200).is_empty());
    assert!(split_text_into_chunks("", 1).is_empty());
}

#[test]
fn whitespace_runs_collapse_to_single_spaces() {
    let chunks = split_text_into_chunks("  one\t\ttwo \n\n three  ", 200);
    assert_eq!(chunks, vec!["one two three"]);
}

#[test]
fn unicode_words_survive() {
    let chunks = split_text_into_chunks("naïve café 日本語 🎉", 5);
    assert_eq!(chunks, vec!["naïve café", "日本語 🎉"]);
}

#[test]
fn exact_multiple_has_no_short_tail() {
    let text = numbered_words(6).join(" ");
    let chunks = split_text_into_chunks(&text, 8);
    assert_eq!(chunks, vec!["w1 w2 w3", "w4 w5 w6"]);
}

// ── Properties ──────────────────────────────────────────────────────

#[test]
fn rejoining_reproduces_words() {
    for n in [1usize, 2, 7, 80, 81, 250] {
        let words = numbered_words(n);
        let refs: Vec<&str> = words.iter().map(String::as_str).collect();
        for max_words in [0usize, 1, 2, 3, 10, 80, 1000] {
            let chunks = chunk_words(&refs, max_words);
            assert_eq!(rejoin(&chunks), words, "n={n} max_words={max_words}");
        }
    }
}

#[test]
fn only_last_chunk_may_be_short() {
    for n in 1usize..=40 {
        let words = numbered_words(n);
        let refs: Vec<&str> = words.iter().map(String::as_str).collect();
        for max_words in 1usize..=9 {
            let chunks = chunk_words(&refs, max_words);
            assert_eq!(chunks.len(), n.div_ceil(max_words));
            let (last, full) = chunks.split_last().unwrap();
            for chunk in full {
                assert_eq!(chunk.split(' ').count(), max_words);
            }
            let last_len = last.split(' ').count();
            if n % max_words == 0 {
                assert_eq!(last_len, max_words);
            } else {
                assert_eq!(last_len, n % max_words);
            }
        }
    }
}

#[test]
fn rechunking_rejoined_output_is_stable() {
    let text = numbered_words(123).join("  \n ");
    let config = ChunkConfig::with_max_tokens(30);
    let first = chunk_text(&text, &config);
    let second = chunk_text(&first.join(" "), &config);
    assert_eq!(first, second);
}

#[test]
fn chunking_is_deterministic() {
    let text = numbered_words(57).join(" ");
    assert_eq!(split_text_into_chunks(&text, 20), split_text_into_chunks(&text, 20));
}

// ── Documents ───────────────────────────────────────────────────────

#[test]
fn document_chunks_are_indexed_in_order() {
    let text = numbered_words(7).join(" ");
    let chunks = chunk_document(&text, &ChunkConfig::with_max_tokens(8));
    assert_eq!(chunks.len(), 3);
    for (i, chunk) in chunks.iter().enumerate() {
        assert_eq!(chunk.index, i);
    }
    assert_eq!(chunks[0].word_count, 3);
    assert_eq!(chunks[2].content, "w7");
    assert_eq!(chunks[2].word_count, 1);
}

#[test]
fn split_words_drops_empty_tokens() {
    assert!(split_words("").is_empty());
    assert!(split_words(" \t ").is_empty());
    assert_eq!(split_words(" a  b "), vec!["a", "b"]);
}
