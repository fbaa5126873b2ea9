//! quizforge-providers: question-generator backends.
//!
//! Implements the `QuestionGenerator` trait for Ollama and OpenAI-compatible
//! chat APIs, plus an offline template generator, and loads the generator
//! configuration that the CLI runs with.

pub mod config;
pub mod error;
pub mod mock;
pub mod ollama;
pub mod openai;
pub mod retry;
pub mod template;

pub use config::{create_generator, load_config, GeneratorConfig, QuizforgeConfig};
pub use error::ProviderError;
pub use retry::RetryingGenerator;
pub use template::TemplateGenerator;

/// Instructions shared by the chat-based generators.
pub(crate) const SYSTEM_PROMPT: &str = "You write quiz questions. The user message is a sentence in which the answer is wrapped in <hl> markers. Reply with one question whose answer is exactly the highlighted text. Do not mention the highlighted text or the markers. Reply with the question only.";
