//! CLI argument parsing and subcommand dispatch.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use docrag_core::Config;
use docrag_ingest::{chunk_document, extract_text, ChunkConfig};

#[derive(Debug, Parser)]
#[command(name = "docrag", version, about = "Document upload, vector search, and RAG chat")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the HTTP server (default).
    Serve {
        /// Overrides PORT.
        #[arg(long)]
        port: Option<u16>,
    },
    /// Extract and chunk a local file, printing the chunks.
    Chunk {
        path: PathBuf,
        /// Overrides CHUNK_MAX_TOKENS.
        #[arg(long)]
        max_tokens: Option<usize>,
    },
}

/// Parse CLI arguments and dispatch to the selected subcommand.
pub async fn dispatch(cli: Cli, mut config: Config) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Command::Serve { port: None }) {
        Command::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            crate::serve(config).await
        }
        Command::Chunk { path, max_tokens } => {
            let mut chunking = ChunkConfig::from(&config.chunking);
            if let Some(max_tokens) = max_tokens {
                chunking.max_tokens = max_tokens;
            }
            chunk_file(&path, &chunking)
        }
    }
}

fn chunk_file(path: &Path, config: &ChunkConfig) -> anyhow::Result<()> {
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();

    let doc = extract_text(&bytes, filename)?;
    let chunks = chunk_document(&doc.text, config);
    info!(
        "{} ({}): {} chars, {} chunks of at most {} words",
        filename,
        doc.kind,
        doc.total_chars(),
        chunks.len(),
        config.max_words()
    );

    for chunk in &chunks {
        println!(
            "[{}] {} words, ~{:.0} tokens\n{}\n",
            chunk.index,
            chunk.word_count,
            config.estimated_tokens(chunk.word_count),
            chunk.content
        );
    }
    Ok(())
}
