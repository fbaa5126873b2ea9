//! Offline question generator.

use async_trait::async_trait;

use quizforge_core::traits::{QuestionGenerator, HIGHLIGHT_MARKER};

const BLANK: &str = "_____";

/// Builds a question by blanking the highlighted span.
///
/// Needs no network access, which makes it the default generator and the one
/// used for reproducible runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateGenerator;

impl TemplateGenerator {
    pub fn new() -> Self {
        Self
    }

    fn question_for(highlighted: &str) -> String {
        let mut parts = highlighted.splitn(3, HIGHLIGHT_MARKER);
        let (Some(before), Some(_answer), Some(after)) = (parts.next(), parts.next(), parts.next())
        else {
            return format!("Which option is correct: \"{}\"?", highlighted.trim());
        };

        let before = before.trim_end();
        let after = after.trim_start();
        let mut statement = String::with_capacity(highlighted.len());
        statement.push_str(before);
        if !before.is_empty() {
            statement.push(' ');
        }
        statement.push_str(BLANK);
        if !after.is_empty() {
            if after.starts_with(|c: char| c.is_alphanumeric() || c == '(') {
                statement.push(' ');
            }
            statement.push_str(after);
        }
        format!("Which option completes the statement: \"{statement}\"?")
    }
}

#[async_trait]
impl QuestionGenerator for TemplateGenerator {
    fn name(&self) -> &str {
        "template"
    }

    async fn generate(&self, highlighted: &str) -> anyhow::Result<String> {
        Ok(Self::question_for(highlighted))
    }
}
