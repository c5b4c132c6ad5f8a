use std::sync::Arc;

use docrag_core::config::RetrievalConfig;
use docrag_core::Config;
use docrag_ingest::embedding::Embedder;
use docrag_ingest::ChunkConfig;
use docrag_llm::ChatGenerator;
use docrag_storage::UploadStore;

use crate::pipeline::UploadPipeline;
use crate::vector_store::VectorStore;

/// Handles shared by every request, built once at startup.
pub struct AppState {
    pub store: Arc<dyn VectorStore>,
    pub embedder: Arc<dyn Embedder>,
    pub generator: ChatGenerator,
    pub uploads: UploadStore,
    pub pipeline: UploadPipeline,
    pub retrieval: RetrievalConfig,
}

impl AppState {
    pub fn new(
        store: Arc<dyn VectorStore>,
        embedder: Arc<dyn Embedder>,
        generator: ChatGenerator,
        uploads: UploadStore,
        config: &Config,
    ) -> Self {
        let pipeline = UploadPipeline::new(
            store.clone(),
            embedder.clone(),
            uploads.clone(),
            ChunkConfig::from(&config.chunking),
            config.embedding.batch_size,
        );
        Self {
            store,
            embedder,
            generator,
            uploads,
            pipeline,
            retrieval: config.retrieval.clone(),
        }
    }
}
