//! Mock generator for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use quizforge_core::traits::QuestionGenerator;

/// A generator that returns canned questions without calling any backend.
///
/// Responses are chosen by substring match on the highlighted input.
pub struct MockGenerator {
    /// Map of input substring → question.
    responses: HashMap<String, String>,
    /// Question returned when no key matches.
    default_response: String,
    call_count: AtomicU32,
    last_input: Mutex<Option<String>>,
}

impl MockGenerator {
    pub fn new(responses: HashMap<String, String>) -> Self {
        Self {
            responses,
            default_response: "Which option is correct?".to_string(),
            call_count: AtomicU32::new(0),
            last_input: Mutex::new(None),
        }
    }

    /// Create a mock that always returns the same question.
    pub fn with_fixed_response(response: &str) -> Self {
        Self {
            default_response: response.to_string(),
            ..Self::new(HashMap::new())
        }
    }

    /// Get the number of calls made to this generator.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the last highlighted input received.
    pub fn last_input(&self) -> Option<String> {
        self.last_input
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl QuestionGenerator for MockGenerator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, highlighted: &str) -> anyhow::Result<String> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self
            .last_input
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(highlighted.to_string());

        Ok(self
            .responses
            .iter()
            .find(|(key, _)| highlighted.contains(key.as_str()))
            .map(|(_, v)| v.clone())
            .unwrap_or_else(|| self.default_response.clone()))
    }
}
