//! Test doubles shared by the unit tests of this crate.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::traits::QuestionGenerator;

/// Generator that returns a fixed question and remembers its inputs.
pub(crate) struct RecordingGenerator {
    response: String,
    calls: AtomicU32,
    inputs: Mutex<Vec<String>>,
}

impl RecordingGenerator {
    pub(crate) fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            calls: AtomicU32::new(0),
            inputs: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn call_count(&self) -> u32 {
        self.calls.load(Ordering::Relaxed)
    }

    pub(crate) fn last_input(&self) -> Option<String> {
        self.inputs.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl QuestionGenerator for RecordingGenerator {
    fn name(&self) -> &str {
        "recording"
    }

    async fn generate(&self, highlighted: &str) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.inputs.lock().unwrap().push(highlighted.to_string());
        Ok(self.response.clone())
    }
}

/// Generator that always fails.
pub(crate) struct FailingGenerator;

#[async_trait]
impl QuestionGenerator for FailingGenerator {
    fn name(&self) -> &str {
        "failing"
    }

    async fn generate(&self, _highlighted: &str) -> anyhow::Result<String> {
        anyhow::bail!("generator unavailable")
    }
}
