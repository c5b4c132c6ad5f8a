//! Upload pipeline: extract, chunk, store the original, embed, persist.
//!
//! Steps run strictly in order. There is no rollback; a failure reports the
//! step that failed and every side effect that had already happened so the
//! leftovers can be found from the logs.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use docrag_core::FileId;
use docrag_ingest::embedding::{embed_in_batches, Embedder};
use docrag_ingest::{chunk_document, extract_text, ChunkConfig};
use docrag_storage::{upload_key, UploadStore};

use crate::vector_store::{ChunkInsert, NewFile, VectorStore};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStep {
    Extract,
    Chunk,
    StoreObject,
    Embed,
    PersistMetadata,
    PersistChunks,
}

impl PipelineStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStep::Extract => "extract",
            PipelineStep::Chunk => "chunk",
            PipelineStep::StoreObject => "store_object",
            PipelineStep::Embed => "embed",
            PipelineStep::PersistMetadata => "persist_metadata",
            PipelineStep::PersistChunks => "persist_chunks",
        }
    }
}

impl fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side effects that completed before a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Committed {
    pub steps: Vec<PipelineStep>,
    /// `vector_data` rows written so far.
    pub chunk_rows: usize,
}

impl fmt::Display for Committed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() && self.chunk_rows == 0 {
            return f.write_str("nothing");
        }
        let names: Vec<&str> = self.steps.iter().map(PipelineStep::as_str).collect();
        write!(f, "[{}]", names.join(", "))?;
        if self.chunk_rows > 0 {
            write!(f, " + {} chunk rows", self.chunk_rows)?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("document contains no extractable text")]
    EmptyDocument,

    #[error("step '{step}' failed (committed: {committed}): {source}")]
    StepFailed {
        step: PipelineStep,
        committed: Committed,
        #[source]
        source: BoxError,
    },
}

impl PipelineError {
    pub fn step(&self) -> Option<PipelineStep> {
        match self {
            PipelineError::EmptyDocument => Some(PipelineStep::Chunk),
            PipelineError::StepFailed { step, .. } => Some(*step),
        }
    }
}

fn failed(step: PipelineStep, committed: &Committed, source: impl Into<BoxError>) -> PipelineError {
    PipelineError::StepFailed {
        step,
        committed: committed.clone(),
        source: source.into(),
    }
}

/// Returned to the client after a successful upload.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadSummary {
    #[schema(value_type = uuid::Uuid)]
    pub file_id: FileId,
    pub s3_key: String,
    pub filename: String,
    pub chunk_count: usize,
}

pub struct UploadPipeline {
    store: Arc<dyn VectorStore>,
    embedder: Arc<dyn Embedder>,
    uploads: UploadStore,
    chunking: ChunkConfig,
    batch_size: usize,
}

impl UploadPipeline {
    pub fn new(
        store: Arc<dyn VectorStore>,
        embedder: Arc<dyn Embedder>,
        uploads: UploadStore,
        chunking: ChunkConfig,
        batch_size: usize,
    ) -> Self {
        Self {
            store,
            embedder,
            uploads,
            chunking,
            batch_size,
        }
    }

    pub async fn run(&self, filename: &str, bytes: Bytes) -> Result<UploadSummary, PipelineError> {
        let file_id = Uuid::new_v4();
        let mut committed = Committed::default();

        let doc = extract_text(&bytes, filename)
            .map_err(|e| failed(PipelineStep::Extract, &committed, e))?;
        debug!(
            "Extracted '{}' (kind={}): {} chars",
            filename,
            doc.kind,
            doc.total_chars()
        );

        let chunks = chunk_document(&doc.text, &self.chunking);
        if chunks.is_empty() {
            warn!("Document '{}' produced no chunks", filename);
            return Err(PipelineError::EmptyDocument);
        }
        info!(
            "Chunked '{}' into {} chunks (max {} words each)",
            filename,
            chunks.len(),
            self.chunking.max_words()
        );

        let key = upload_key(file_id, filename);
        self.uploads
            .put(&key, bytes)
            .await
            .map_err(|e| failed(PipelineStep::StoreObject, &committed, e))?;
        committed.steps.push(PipelineStep::StoreObject);

        let texts: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();
        let embeddings = embed_in_batches(self.embedder.as_ref(), &texts, self.batch_size)
            .await
            .map_err(|e| failed(PipelineStep::Embed, &committed, e))?;

        self.store
            .insert_file(&NewFile {
                file_id,
                s3_uri: key.clone(),
                filename: filename.to_string(),
            })
            .await
            .map_err(|e| failed(PipelineStep::PersistMetadata, &committed, e))?;
        committed.steps.push(PipelineStep::PersistMetadata);

        for (chunk, embedding) in chunks.iter().zip(embeddings) {
            self.store
                .insert_chunk(&ChunkInsert {
                    file_id,
                    chunk_id: Uuid::new_v4(),
                    chunk_index: chunk.index,
                    content: chunk.content.clone(),
                    embedding,
                })
                .await
                .map_err(|e| failed(PipelineStep::PersistChunks, &committed, e))?;
            committed.chunk_rows += 1;
        }

        info!(
            "Uploaded '{}' as {}: {} chunks embedded",
            filename,
            file_id,
            chunks.len()
        );

        Ok(UploadSummary {
            file_id,
            s3_key: key,
            filename: filename.to_string(),
            chunk_count: chunks.len(),
        })
    }
}
