pub mod batcher;
pub mod ollama;
pub mod openai;
pub mod traits;

use std::sync::Arc;

use docrag_core::config::{EmbeddingConfig, LlmConfig, OllamaConfig};

pub use batcher::embed_in_batches;
pub use ollama::OllamaEmbedder;
pub use openai::OpenAiEmbedder;
pub use traits::{Embedder, EmbeddingError};

/// Create the embedding backend selected by `EMBEDDING_PROVIDER`.
///
/// The OpenAI backend shares its API key and base URL with the LLM section.
pub fn create_embedder(
    embedding: &EmbeddingConfig,
    llm: &LlmConfig,
    ollama: &OllamaConfig,
) -> Result<Arc<dyn Embedder>, EmbeddingError> {
    match embedding.provider.as_str() {
        "openai" => {
            let api_key = llm
                .openai_api_key
                .as_ref()
                .ok_or_else(|| EmbeddingError::NotConfigured("OPENAI_API_KEY not set".into()))?;
            Ok(Arc::new(OpenAiEmbedder::new(
                api_key.clone(),
                embedding.model.clone(),
                llm.openai_base_url.clone(),
                embedding.dimensions,
            )))
        }
        "ollama" => Ok(Arc::new(OllamaEmbedder::new(
            ollama.url.clone(),
            ollama.embedding_model.clone(),
            embedding.dimensions,
        ))),
        other => Err(EmbeddingError::NotConfigured(format!(
            "unknown embedding provider: '{}'",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docrag_core::Config;

    #[test]
    fn openai_requires_api_key() {
        let mut config = Config::for_profile("DOCRAG_TEST_EMBED_FACTORY");
        config.embedding.provider = "openai".into();
        config.llm.openai_api_key = None;
        let err = create_embedder(&config.embedding, &config.llm, &config.ollama).err();
        assert!(matches!(err, Some(EmbeddingError::NotConfigured(_))));

        config.llm.openai_api_key = Some("sk-test".into());
        let embedder = create_embedder(&config.embedding, &config.llm, &config.ollama).unwrap();
        assert_eq!(embedder.dimensions(), config.embedding.dimensions);
    }

    #[test]
    fn ollama_needs_no_key() {
        let mut config = Config::for_profile("DOCRAG_TEST_EMBED_FACTORY");
        config.embedding.provider = "ollama".into();
        config.embedding.dimensions = 768;
        let embedder = create_embedder(&config.embedding, &config.llm, &config.ollama).unwrap();
        assert_eq!(embedder.dimensions(), 768);
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let mut config = Config::for_profile("DOCRAG_TEST_EMBED_FACTORY");
        config.embedding.provider = "onnx".into();
        assert!(create_embedder(&config.embedding, &config.llm, &config.ollama).is_err());
    }
}
