//! Annotated documents: sentences plus their typed entity spans.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::{EntitySpan, RawSpan, Sentence};
use crate::traits::{Annotator, Segmenter};

/// Characters of source text kept as a preview in conversion output.
pub const PREVIEW_CHARS: usize = 500;

/// A document ready for quiz synthesis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnnotatedDocument {
    /// Full source text, kept for previews.
    #[serde(default)]
    pub text: String,
    pub sentences: Vec<Sentence>,
    #[serde(default)]
    pub spans: Vec<EntitySpan>,
}

/// On-disk shape of a pre-annotated document, with untyped labels.
#[derive(Debug, Deserialize)]
struct JsonDocument {
    #[serde(default)]
    text: String,
    sentences: Vec<JsonSentence>,
    #[serde(default)]
    entities: Vec<RawSpan>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonSentence {
    Plain(String),
    Indexed(Sentence),
}

impl AnnotatedDocument {
    /// Assemble a document from already segmented sentences and raw spans.
    ///
    /// Spans with unrecognized labels or pointing past the last sentence are
    /// dropped.
    pub fn from_parts(text: impl Into<String>, sentences: Vec<Sentence>, raw: Vec<RawSpan>) -> Self {
        let count = sentences.len();
        let spans = raw
            .into_iter()
            .filter_map(|r| {
                if r.sentence_index >= count {
                    tracing::debug!(index = r.sentence_index, "span outside document, dropped");
                    return None;
                }
                let label = r.label.clone();
                let span = EntitySpan::from_raw(r);
                if span.is_none() {
                    tracing::debug!(%label, "unrecognized entity label, dropped");
                }
                span
            })
            .collect();
        let mut text = text.into();
        if text.is_empty() {
            text = sentences
                .iter()
                .map(|s| s.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");
        }
        Self {
            text,
            sentences,
            spans,
        }
    }

    /// Segment and annotate raw text.
    pub fn annotate(text: &str, segmenter: &dyn Segmenter, annotator: &dyn Annotator) -> Self {
        let sentences = segmenter.segment(text);
        let raw = sentences.iter().flat_map(|s| annotator.annotate(s)).collect();
        Self::from_parts(text, sentences, raw)
    }

    /// Parse a pre-annotated JSON document.
    ///
    /// Sentences may be plain strings (indexed by position) or
    /// `{ "index", "text" }` objects; entities carry string labels.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let parsed: JsonDocument =
            serde_json::from_str(content).context("failed to parse annotated document JSON")?;
        let sentences = parsed
            .sentences
            .into_iter()
            .enumerate()
            .map(|(i, s)| match s {
                JsonSentence::Plain(text) => Sentence::new(i, text),
                JsonSentence::Indexed(sentence) => Sentence::new(i, sentence.text),
            })
            .collect();
        Ok(Self::from_parts(parsed.text, sentences, parsed.entities))
    }

    /// Load a pre-annotated JSON document from disk.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read document: {}", path.display()))?;
        Self::from_json_str(&content)
            .with_context(|| format!("invalid document: {}", path.display()))
    }

    /// The first [`PREVIEW_CHARS`] characters of the source text.
    pub fn preview(&self) -> String {
        self.text.chars().take(PREVIEW_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EntityType;

    #[test]
    fn from_parts_drops_unknown_labels_and_stray_spans() {
        let doc = AnnotatedDocument::from_parts(
            "",
            vec![Sentence::new(0, "Ada Lovelace lived in London for years.")],
            vec![
                RawSpan {
                    text: "Ada Lovelace".into(),
                    label: "PERSON".into(),
                    sentence_index: 0,
                },
                RawSpan {
                    text: "years".into(),
                    label: "DURATION".into(),
                    sentence_index: 0,
                },
                RawSpan {
                    text: "London".into(),
                    label: "GPE".into(),
                    sentence_index: 4,
                },
            ],
        );
        assert_eq!(doc.spans.len(), 1);
        assert_eq!(doc.spans[0].entity_type, EntityType::Person);
        assert_eq!(doc.text, "Ada Lovelace lived in London for years.");
    }

    #[test]
    fn json_with_plain_sentences() {
        let json = r#"{
            "sentences": ["Ada Lovelace lived in London for years.", "She worked with Charles Babbage there."],
            "entities": [
                {"text": "Ada Lovelace", "label": "PERSON", "sentence_index": 0},
                {"text": "Charles Babbage", "label": "PERSON", "sentence_index": 1}
            ]
        }"#;
        let doc = AnnotatedDocument::from_json_str(json).unwrap();
        assert_eq!(doc.sentences.len(), 2);
        assert_eq!(doc.sentences[1].index, 1);
        assert_eq!(doc.spans.len(), 2);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(AnnotatedDocument::from_json_str("{ not json").is_err());
    }

    #[test]
    fn preview_is_capped_at_500_chars() {
        let doc = AnnotatedDocument {
            text: "é".repeat(800),
            ..Default::default()
        };
        assert_eq!(doc.preview().chars().count(), PREVIEW_CHARS);
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(&path, r#"{"sentences": ["One two three four five six."]}"#).unwrap();
        let doc = AnnotatedDocument::load_json(&path).unwrap();
        assert_eq!(doc.sentences.len(), 1);
        assert!(doc.spans.is_empty());
    }
}
