//! Collaborator traits.
//!
//! The engine consumes sentence segmentation, entity annotation and question
//! phrasing as capabilities. Implementations are built once per process and
//! handed to the engine, so tests can substitute deterministic fakes.

use async_trait::async_trait;

use crate::model::{RawSpan, Sentence};

/// Marker wrapped around the answer span in generator input.
pub const HIGHLIGHT_MARKER: &str = "<hl>";

/// Splits raw document text into sentences.
///
/// Implementations must keep document order and drop fragments of four
/// words or fewer.
pub trait Segmenter: Send + Sync {
    fn segment(&self, text: &str) -> Vec<Sentence>;
}

/// Finds typed entity spans inside one sentence.
pub trait Annotator: Send + Sync {
    fn annotate(&self, sentence: &Sentence) -> Vec<RawSpan>;
}

/// Turns a sentence with a highlighted span into a question whose answer is
/// that span.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    /// Human-readable backend name (e.g. "ollama").
    fn name(&self) -> &str;

    /// `highlighted` contains the answer wrapped once in [`HIGHLIGHT_MARKER`].
    async fn generate(&self, highlighted: &str) -> anyhow::Result<String>;
}

/// Minimum number of words a segment needs to count as a sentence.
pub const MIN_SENTENCE_WORDS: usize = 5;

/// True when `text` is long enough to be kept by a segmenter.
pub fn is_sentence_long_enough(text: &str) -> bool {
    text.split_whitespace().count() >= MIN_SENTENCE_WORDS
}
