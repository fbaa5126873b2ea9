//! Quiz outcome type with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::GeneratedSet;

/// Everything produced by one conversion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizOutcome {
    /// Unique run identifier.
    pub id: Uuid,
    /// When the quiz was generated.
    pub created_at: DateTime<Utc>,
    /// Sets in request order.
    pub sets: Vec<GeneratedSet>,
    /// Sum of the questions in all sets.
    pub total_questions: usize,
    /// Final position of the shared sentence cursor.
    pub sentences_consumed: usize,
    /// Sentences in the source document.
    pub sentence_count: usize,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

impl QuizOutcome {
    /// True when any set came out smaller than requested.
    pub fn has_partial_sets(&self) -> bool {
        self.sets.iter().any(GeneratedSet::is_partial)
    }

    /// Save the outcome as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize quiz")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write quiz to {}", path.display()))?;
        Ok(())
    }

    /// Load an outcome from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read quiz from {}", path.display()))?;
        let outcome: QuizOutcome =
            serde_json::from_str(&content).context("failed to parse quiz JSON")?;
        Ok(outcome)
    }
}
