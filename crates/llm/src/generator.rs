//! Retrieval-augmented answer generation.

use tracing::{debug, info};

use crate::provider::{CompletionOptions, LlmError, LlmProvider, Message};

/// Prepend retrieved context to the user's prompt: the chunk contents joined
/// by newlines, a blank line, then the prompt itself.
pub fn build_augmented_prompt<S: AsRef<str>>(context_chunks: &[S], prompt: &str) -> String {
    let context = context_chunks
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("\n");
    format!("{context}\n\n{prompt}")
}

/// Answers prompts with an LLM, grounding them in retrieved chunks.
pub struct ChatGenerator {
    provider: Box<dyn LlmProvider>,
    options: CompletionOptions,
}

impl ChatGenerator {
    pub fn new(provider: Box<dyn LlmProvider>, options: CompletionOptions) -> Self {
        Self { provider, options }
    }

    /// Build from config, creating the appropriate provider.
    pub fn from_config(
        llm_config: &docrag_core::config::LlmConfig,
        ollama_config: &docrag_core::config::OllamaConfig,
    ) -> Result<Self, LlmError> {
        let provider = crate::providers::create_provider(llm_config, ollama_config)?;
        Ok(Self::new(
            provider,
            CompletionOptions {
                max_tokens: llm_config.max_tokens,
                temperature: llm_config.temperature,
            },
        ))
    }

    /// Send `prompt`, prefixed with `context_chunks`, as a single user message.
    pub async fn answer<S: AsRef<str> + Sync>(
        &self,
        context_chunks: &[S],
        prompt: &str,
    ) -> Result<String, LlmError> {
        let augmented = build_augmented_prompt(context_chunks, prompt);
        info!(
            "Generating answer with {} context chunks ({} chars)",
            context_chunks.len(),
            augmented.len()
        );
        debug!("Augmented prompt: {}", augmented);

        self.provider
            .complete(vec![Message::user(augmented)], &self.options)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records the messages it receives and echoes the last one back.
    struct EchoProvider {
        seen: Mutex<Vec<Message>>,
    }

    #[async_trait]
    impl LlmProvider for EchoProvider {
        async fn complete(
            &self,
            messages: Vec<Message>,
            options: &CompletionOptions,
        ) -> Result<String, LlmError> {
            assert_eq!(options.max_tokens, 42);
            let last = messages.last().map(|m| m.content.clone()).unwrap_or_default();
            self.seen.lock().unwrap().extend(messages);
            Ok(last)
        }
    }

    #[test]
    fn prompt_puts_context_first() {
        let prompt = build_augmented_prompt(&["first chunk", "second chunk"], "What is it?");
        assert_eq!(prompt, "first chunk\nsecond chunk\n\nWhat is it?");
    }

    #[test]
    fn prompt_without_context_still_has_separator() {
        let empty: [&str; 0] = [];
        assert_eq!(build_augmented_prompt(&empty, "hi"), "\n\nhi");
    }

    #[tokio::test]
    async fn answer_sends_single_user_message() {
        let generator = ChatGenerator::new(
            Box::new(EchoProvider {
                seen: Mutex::new(Vec::new()),
            }),
            CompletionOptions {
                max_tokens: 42,
                temperature: None,
            },
        );

        let context = vec!["alpha".to_string(), "beta".to_string()];
        let answer = generator.answer(&context, "question").await.unwrap();

        assert_eq!(answer, "alpha\nbeta\n\nquestion");
    }

    #[test]
    fn from_config_requires_known_provider() {
        let mut config = docrag_core::Config::for_profile("DOCRAG_TEST_LLM_FACTORY");
        config.llm.provider = "ollama".into();
        assert!(ChatGenerator::from_config(&config.llm, &config.ollama).is_ok());

        config.llm.provider = "openai".into();
        config.llm.openai_api_key = None;
        assert!(matches!(
            ChatGenerator::from_config(&config.llm, &config.ollama),
            Err(LlmError::NotConfigured(_))
        ));

        config.llm.provider = "mystery".into();
        assert!(ChatGenerator::from_config(&config.llm, &config.ollama).is_err());
    }
}
