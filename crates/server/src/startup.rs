//! Server startup: build every collaborator once and wire them into `AppState`.

use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;

use docrag_core::Config;
use docrag_ingest::embedding::create_embedder;
use docrag_llm::ChatGenerator;
use docrag_storage::UploadStore;

use crate::db;
use crate::state::AppState;
use crate::vector_store::{PgVectorStore, VectorStore};

/// Build `AppState`. The pool is returned separately so it can be closed
/// on shutdown.
pub async fn build_app_state(config: &Config) -> anyhow::Result<(Arc<AppState>, PgPool)> {
    let pool = db::init_pg_pool(&config.postgres).await?;
    let store: Arc<dyn VectorStore> = Arc::new(PgVectorStore::new(pool.clone()));

    let embedder = create_embedder(&config.embedding, &config.llm, &config.ollama)?;
    info!(
        "Embedder ready (provider: {}, {} dims)",
        config.embedding.provider,
        embedder.dimensions()
    );

    let generator = ChatGenerator::from_config(&config.llm, &config.ollama)?;
    info!("LLM ready (provider: {}, model: {})", config.llm.provider, config.llm.model);

    let uploads = UploadStore::from_config(&config.storage)?;
    info!("Upload store ready at {}", uploads.location());

    let state = AppState::new(store, embedder, generator, uploads, config);
    Ok((Arc::new(state), pool))
}
