use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pgvector::Vector;
use serde::Serialize;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use docrag_core::{ChunkId, FileId};

/// Uploader recorded for every file until authentication exists.
pub const DEFAULT_UPLOADER: &str = "unknown_user";

// ── Types ──────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// A row of the `metadata` table plus the number of chunks stored for it.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct FileRecord {
    #[schema(value_type = Uuid)]
    pub file_id: FileId,
    pub s3_uri: String,
    pub filename: String,
    pub permissions: Vec<String>,
    pub uploaded_by: String,
    pub uploaded_at: DateTime<Utc>,
    pub chunk_count: i64,
}

/// Metadata written once per upload, before its chunks.
#[derive(Debug, Clone)]
pub struct NewFile {
    pub file_id: FileId,
    pub s3_uri: String,
    pub filename: String,
}

#[derive(Debug, Clone)]
pub struct ChunkInsert {
    pub file_id: FileId,
    pub chunk_id: ChunkId,
    pub chunk_index: usize,
    pub content: String,
    pub embedding: Vec<f32>,
}

/// Nearest-neighbour match, ordered by ascending L2 distance.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct SearchHit {
    #[schema(value_type = Uuid)]
    pub file_id: FileId,
    #[schema(value_type = Uuid)]
    pub chunk_id: ChunkId,
    pub chunk_index: i32,
    pub content: String,
    pub distance: f64,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct TableInfo {
    pub table_name: String,
}

/// Storage for file metadata and chunk embeddings.
#[async_trait]
pub trait VectorStore: Send + Sync {
    async fn insert_file(&self, file: &NewFile) -> Result<(), StoreError>;

    async fn insert_chunk(&self, chunk: &ChunkInsert) -> Result<(), StoreError>;

    /// The `limit` chunks closest to `embedding`.
    async fn search(&self, embedding: &[f32], limit: i64) -> Result<Vec<SearchHit>, StoreError>;

    /// All files, newest first.
    async fn list_files(&self) -> Result<Vec<FileRecord>, StoreError>;

    /// Delete a file and its chunks. Returns the object key of the deleted
    /// file, or `None` when no such file exists.
    async fn delete_file(&self, file_id: FileId) -> Result<Option<String>, StoreError>;

    /// Tables in the `public` schema.
    async fn list_tables(&self) -> Result<Vec<TableInfo>, StoreError>;
}

// ── PostgreSQL + pgvector ──────────────────────────

pub struct PgVectorStore {
    pool: PgPool,
}

impl PgVectorStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VectorStore for PgVectorStore {
    async fn insert_file(&self, file: &NewFile) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO metadata (file_id, s3_uri, filename, permissions, uploaded_by) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(file.file_id)
        .bind(&file.s3_uri)
        .bind(&file.filename)
        .bind(Json(Vec::<String>::new()))
        .bind(DEFAULT_UPLOADER)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn insert_chunk(&self, chunk: &ChunkInsert) -> Result<(), StoreError> {
        let embedding = Vector::from(chunk.embedding.clone());
        sqlx::query(
            "INSERT INTO vector_data (file_id, chunk_id, chunk_index, content, embedding) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(chunk.file_id)
        .bind(chunk.chunk_id)
        .bind(chunk.chunk_index as i32)
        .bind(&chunk.content)
        .bind(&embedding)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn search(&self, embedding: &[f32], limit: i64) -> Result<Vec<SearchHit>, StoreError> {
        let embedding = Vector::from(embedding.to_vec());
        let rows = sqlx::query(
            "SELECT file_id, chunk_id, chunk_index, content, \
             embedding <-> $1 AS distance \
             FROM vector_data \
             ORDER BY embedding <-> $1 \
             LIMIT $2",
        )
        .bind(&embedding)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        let hits = rows
            .iter()
            .map(|row| SearchHit {
                file_id: row.get("file_id"),
                chunk_id: row.get("chunk_id"),
                chunk_index: row.get("chunk_index"),
                content: row.get("content"),
                distance: row.get("distance"),
            })
            .collect();
        Ok(hits)
    }

    async fn list_files(&self) -> Result<Vec<FileRecord>, StoreError> {
        let rows = sqlx::query(
            "SELECT m.file_id, m.s3_uri, m.filename, m.permissions, m.uploaded_by, m.uploaded_at, \
             COUNT(v.chunk_id) AS chunk_count \
             FROM metadata m \
             LEFT JOIN vector_data v ON v.file_id = m.file_id \
             GROUP BY m.file_id \
             ORDER BY m.uploaded_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        let files = rows
            .iter()
            .map(|row| FileRecord {
                file_id: row.get("file_id"),
                s3_uri: row.get("s3_uri"),
                filename: row.get("filename"),
                permissions: row.get::<Json<Vec<String>>, _>("permissions").0,
                uploaded_by: row.get("uploaded_by"),
                uploaded_at: row.get("uploaded_at"),
                chunk_count: row.get("chunk_count"),
            })
            .collect();
        Ok(files)
    }

    async fn delete_file(&self, file_id: FileId) -> Result<Option<String>, StoreError> {
        // vector_data rows go with it (ON DELETE CASCADE).
        let row = sqlx::query("DELETE FROM metadata WHERE file_id = $1 RETURNING s3_uri")
            .bind(file_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.get("s3_uri")))
    }

    async fn list_tables(&self) -> Result<Vec<TableInfo>, StoreError> {
        let rows = sqlx::query(
            "SELECT table_name::text AS table_name FROM information_schema.tables \
             WHERE table_schema = 'public' ORDER BY table_name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| TableInfo {
                table_name: row.get("table_name"),
            })
            .collect())
    }
}
