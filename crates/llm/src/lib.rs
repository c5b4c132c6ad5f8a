pub mod generator;
pub mod provider;
pub mod providers;

pub use generator::{build_augmented_prompt, ChatGenerator};
pub use provider::{CompletionOptions, LlmError, LlmProvider, Message, Role};
