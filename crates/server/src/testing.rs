//! In-memory collaborators for handler and pipeline tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use docrag_core::FileId;
use docrag_ingest::embedding::{Embedder, EmbeddingError};
use docrag_llm::{CompletionOptions, LlmError, LlmProvider, Message};

use crate::vector_store::{
    ChunkInsert, FileRecord, NewFile, SearchHit, StoreError, TableInfo, VectorStore,
    DEFAULT_UPLOADER,
};

/// Brute-force store; keeps rows in insertion order.
#[derive(Default)]
pub struct MemoryVectorStore {
    files: Mutex<Vec<FileRecord>>,
    chunks: Mutex<Vec<ChunkInsert>>,
    chunk_insert_limit: Option<usize>,
    broken: bool,
}

impl MemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `n` chunk rows, then fail every further insert.
    pub fn fail_chunk_inserts_after(mut self, n: usize) -> Self {
        self.chunk_insert_limit = Some(n);
        self
    }

    /// Every call fails.
    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    pub fn files(&self) -> Vec<FileRecord> {
        self.files.lock().unwrap().clone()
    }

    pub fn chunks(&self) -> Vec<ChunkInsert> {
        self.chunks.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.broken {
            Err(StoreError::Database(sqlx::Error::PoolClosed))
        } else {
            Ok(())
        }
    }
}

fn l2(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = f64::from(*x) - f64::from(*y);
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

#[async_trait]
impl VectorStore for MemoryVectorStore {
    async fn insert_file(&self, file: &NewFile) -> Result<(), StoreError> {
        self.check()?;
        self.files.lock().unwrap().push(FileRecord {
            file_id: file.file_id,
            s3_uri: file.s3_uri.clone(),
            filename: file.filename.clone(),
            permissions: Vec::new(),
            uploaded_by: DEFAULT_UPLOADER.to_string(),
            uploaded_at: Utc::now(),
            chunk_count: 0,
        });
        Ok(())
    }

    async fn insert_chunk(&self, chunk: &ChunkInsert) -> Result<(), StoreError> {
        self.check()?;
        let mut chunks = self.chunks.lock().unwrap();
        if self.chunk_insert_limit.is_some_and(|limit| chunks.len() >= limit) {
            return Err(StoreError::Database(sqlx::Error::PoolClosed));
        }
        chunks.push(chunk.clone());
        Ok(())
    }

    async fn search(&self, embedding: &[f32], limit: i64) -> Result<Vec<SearchHit>, StoreError> {
        self.check()?;
        let mut hits: Vec<SearchHit> = self
            .chunks
            .lock()
            .unwrap()
            .iter()
            .map(|c| SearchHit {
                file_id: c.file_id,
                chunk_id: c.chunk_id,
                chunk_index: c.chunk_index as i32,
                content: c.content.clone(),
                distance: l2(&c.embedding, embedding),
            })
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits.truncate(limit.max(0) as usize);
        Ok(hits)
    }

    async fn list_files(&self) -> Result<Vec<FileRecord>, StoreError> {
        self.check()?;
        let chunks = self.chunks.lock().unwrap();
        let mut files: Vec<FileRecord> = self
            .files
            .lock()
            .unwrap()
            .iter()
            .map(|f| FileRecord {
                chunk_count: chunks.iter().filter(|c| c.file_id == f.file_id).count() as i64,
                ..f.clone()
            })
            .collect();
        files.reverse();
        Ok(files)
    }

    async fn delete_file(&self, file_id: FileId) -> Result<Option<String>, StoreError> {
        self.check()?;
        let mut files = self.files.lock().unwrap();
        let Some(pos) = files.iter().position(|f| f.file_id == file_id) else {
            return Ok(None);
        };
        let removed = files.remove(pos);
        self.chunks.lock().unwrap().retain(|c| c.file_id != file_id);
        Ok(Some(removed.s3_uri))
    }

    async fn list_tables(&self) -> Result<Vec<TableInfo>, StoreError> {
        self.check()?;
        Ok(["metadata", "vector_data"]
            .iter()
            .map(|t| TableInfo {
                table_name: t.to_string(),
            })
            .collect())
    }
}

/// Deterministic bag-of-words embedder: each word bumps one bucket chosen
/// by its bytes, so identical texts get identical vectors.
pub struct HashEmbedder {
    dims: usize,
}

impl HashEmbedder {
    pub fn new(dims: usize) -> Self {
        Self { dims }
    }

    fn embed(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0.0; self.dims];
        for word in text.split_whitespace() {
            let bucket = word
                .bytes()
                .fold(0usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize));
            v[bucket % self.dims] += 1.0;
        }
        v
    }
}

#[async_trait]
impl Embedder for HashEmbedder {
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(texts.iter().map(|t| self.embed(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dims
    }
}

pub struct FailingEmbedder;

#[async_trait]
impl Embedder for FailingEmbedder {
    async fn embed_batch(&self, _texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Err(EmbeddingError::Api("service unavailable".into()))
    }

    fn dimensions(&self) -> usize {
        4
    }
}

/// Answers every prompt with a fixed text and remembers what it was asked.
pub struct ScriptedProvider {
    reply: Result<String, String>,
    /// Shared so tests can inspect it after boxing the provider.
    pub prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedProvider {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: Err("model overloaded".to_string()),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn complete(
        &self,
        messages: Vec<Message>,
        _options: &CompletionOptions,
    ) -> Result<String, LlmError> {
        self.prompts
            .lock()
            .unwrap()
            .extend(messages.into_iter().map(|m| m.content));
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(body) => Err(LlmError::ApiError {
                status: 503,
                body: body.clone(),
            }),
        }
    }
}
