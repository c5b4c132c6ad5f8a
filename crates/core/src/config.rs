use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::DocragError;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_parse<T: std::str::FromStr>(profile: &str, key: &str, default: T) -> T {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub server: ServerConfig,
    pub postgres: PostgresConfig,
    pub storage: StorageConfig,
    pub embedding: EmbeddingConfig,
    pub llm: LlmConfig,
    pub ollama: OllamaConfig,
    pub chunking: ChunkingConfig,
    pub retrieval: RetrievalConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `DOCRAG_PROFILE`. When set (e.g. `PROD`), every
    /// key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("DOCRAG_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            server: ServerConfig::from_env_profiled(p),
            postgres: PostgresConfig::from_env_profiled(p),
            storage: StorageConfig::from_env_profiled(p),
            embedding: EmbeddingConfig::from_env_profiled(p),
            llm: LlmConfig::from_env_profiled(p),
            ollama: OllamaConfig::from_env_profiled(p),
            chunking: ChunkingConfig::from_env_profiled(p),
            retrieval: RetrievalConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Reject combinations that cannot work at all. Missing optional
    /// collaborators are not errors here; they surface when first used.
    pub fn validate(&self) -> Result<(), DocragError> {
        if self.embedding.dimensions == 0 {
            return Err(DocragError::Config("EMBEDDING_DIMENSIONS must be positive".into()));
        }
        if self.embedding.batch_size == 0 {
            return Err(DocragError::Config("EMBEDDING_BATCH_SIZE must be positive".into()));
        }
        if self.chunking.max_tokens == 0 {
            return Err(DocragError::Config("CHUNK_MAX_TOKENS must be positive".into()));
        }
        match self.storage.backend.as_str() {
            "s3" | "local" => {}
            other => {
                return Err(DocragError::Config(format!(
                    "unknown STORAGE_BACKEND '{other}' (expected 's3' or 'local')"
                )))
            }
        }
        Ok(())
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!("  server:     {}:{}", self.server.host, self.server.port);
        tracing::info!("  postgres:   host={}, db={}", self.postgres.host, self.postgres.database);
        tracing::info!(
            "  storage:    backend={}, bucket={}, region={}",
            self.storage.backend, self.storage.s3_bucket, self.storage.region
        );
        tracing::info!(
            "  embedding:  provider={}, model={}, dims={}",
            self.embedding.provider, self.embedding.model, self.embedding.dimensions
        );
        tracing::info!("  llm:        provider={}, model={}", self.llm.provider, self.llm.model);
        tracing::info!(
            "  chunking:   max_tokens={}, tokens_per_word={}",
            self.chunking.max_tokens, self.chunking.tokens_per_word
        );
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
    pub max_upload_mb: usize,
}

impl ServerConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            host: profiled_env_or(p, "HOST", "0.0.0.0"),
            port: profiled_env_parse(p, "PORT", 8000),
            cors_origin: profiled_env_or(p, "CORS_ORIGIN", "*"),
            max_upload_mb: profiled_env_parse(p, "MAX_UPLOAD_MB", 50),
        }
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

// ── PostgreSQL ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostgresConfig {
    /// Full connection URL; takes precedence over the individual fields.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
    pub max_connections: u32,
}

impl PostgresConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            url: profiled_env_opt(p, "PG_URL"),
            host: profiled_env_or(p, "PG_HOST", "localhost"),
            port: profiled_env_parse(p, "PG_PORT", 5433),
            database: profiled_env_or(p, "PG_DATABASE", "postgres_db"),
            username: profiled_env_or(p, "PG_USERNAME", "postgres_user"),
            password: profiled_env_or(p, "PG_PASSWORD", "postgres_psw"),
            max_connections: profiled_env_parse(p, "PG_MAX_CONNECTIONS", 10),
        }
    }

    pub fn database_url(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => format!(
                "postgres://{}:{}@{}:{}/{}",
                self.username, self.password, self.host, self.port, self.database
            ),
        }
    }
}

// ── Object storage ────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// "s3" or "local"
    pub backend: String,
    pub region: String,
    pub s3_bucket: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub session_token: Option<String>,
    pub endpoint_url: Option<String>,
    /// Root directory for the local backend.
    pub data_dir: PathBuf,
}

impl StorageConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            backend: profiled_env_or(p, "STORAGE_BACKEND", "s3").to_lowercase(),
            region: profiled_env_or(p, "AWS_REGION", "eu-west-1"),
            s3_bucket: profiled_env_or(p, "S3_BUCKET", "alf-upload-bucket"),
            access_key_id: profiled_env_opt(p, "AWS_ACCESS_KEY_ID"),
            secret_access_key: profiled_env_opt(p, "AWS_SECRET_ACCESS_KEY"),
            session_token: profiled_env_opt(p, "AWS_SESSION_TOKEN"),
            endpoint_url: profiled_env_opt(p, "AWS_ENDPOINT_URL"),
            data_dir: PathBuf::from(profiled_env_or(p, "DATA_DIR", "data")),
        }
    }

    pub fn is_s3(&self) -> bool {
        self.backend == "s3"
    }
}

// ── Embedding ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// "openai" or "ollama"
    pub provider: String,
    pub model: String,
    pub dimensions: usize,
    pub batch_size: usize,
}

impl EmbeddingConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            provider: profiled_env_or(p, "EMBEDDING_PROVIDER", "openai"),
            model: profiled_env_or(p, "EMBEDDING_MODEL", "text-embedding-ada-002"),
            dimensions: profiled_env_parse(p, "EMBEDDING_DIMENSIONS", 1536),
            batch_size: profiled_env_parse(p, "EMBEDDING_BATCH_SIZE", 64),
        }
    }
}

// ── LLM ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "openai" or "ollama"
    pub provider: String,
    pub openai_api_key: Option<String>,
    pub openai_base_url: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: Option<f32>,
}

impl LlmConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            provider: profiled_env_or(p, "LLM_PROVIDER", "openai"),
            openai_api_key: profiled_env_opt(p, "OPENAI_API_KEY"),
            openai_base_url: profiled_env_opt(p, "OPENAI_BASE_URL"),
            model: profiled_env_or(p, "LLM_MODEL", "gpt-4o-mini"),
            max_tokens: profiled_env_parse(p, "LLM_MAX_TOKENS", 300),
            temperature: profiled_env_opt(p, "LLM_TEMPERATURE").and_then(|v| v.parse().ok()),
        }
    }
}

// ── Ollama (local models) ─────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    pub url: String,
    pub model: String,
    pub embedding_model: String,
}

impl OllamaConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            url: profiled_env_or(p, "OLLAMA_URL", "http://localhost:11434"),
            model: profiled_env_or(p, "OLLAMA_MODEL", "llama3.2"),
            embedding_model: profiled_env_or(p, "OLLAMA_EMBEDDING_MODEL", "nomic-embed-text"),
        }
    }
}

// ── Chunking ──────────────────────────────────────────────────

pub const DEFAULT_CHUNK_MAX_TOKENS: usize = 200;
pub const DEFAULT_TOKENS_PER_WORD: f64 = 2.5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    pub max_tokens: usize,
    pub tokens_per_word: f64,
}

impl ChunkingConfig {
    fn from_env_profiled(p: &str) -> Self {
        let tokens_per_word = profiled_env_parse(p, "CHUNK_TOKENS_PER_WORD", DEFAULT_TOKENS_PER_WORD);
        Self {
            max_tokens: profiled_env_parse(p, "CHUNK_MAX_TOKENS", DEFAULT_CHUNK_MAX_TOKENS),
            tokens_per_word: if tokens_per_word.is_finite() && tokens_per_word > 0.0 {
                tokens_per_word
            } else {
                DEFAULT_TOKENS_PER_WORD
            },
        }
    }
}

// ── Retrieval ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// `limit` used by /search when the request omits it.
    pub search_default_limit: i64,
    /// Number of nearest chunks fed to the LLM by /chat.
    pub chat_context_chunks: i64,
}

impl RetrievalConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            search_default_limit: profiled_env_parse(p, "SEARCH_DEFAULT_LIMIT", 5),
            chat_context_chunks: profiled_env_parse(p, "CHAT_CONTEXT_CHUNKS", 5),
        }
    }
}
