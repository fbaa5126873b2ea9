//! Document-wide entity reservoir and the per-sentence context window.

use std::collections::{BTreeMap, HashSet};

use crate::model::{EntitySpan, EntityType};

/// Sentences on either side of the current one that count as context.
pub const CONTEXT_RADIUS: usize = 2;

/// An entity seen near the sentence being rendered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContextEntity {
    pub text: String,
    pub entity_type: EntityType,
}

/// Every entity surface form in the document, grouped by type.
///
/// Strings are unique per type and kept in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct EntityPool {
    by_type: BTreeMap<EntityType, Vec<String>>,
    seen: HashSet<(EntityType, String)>,
    spans: Vec<EntitySpan>,
}

impl EntityPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pool from all spans of a document.
    pub fn from_spans<'a>(spans: impl IntoIterator<Item = &'a EntitySpan>) -> Self {
        let mut pool = Self::new();
        for span in spans {
            pool.add_span(span.clone());
        }
        pool
    }

    /// Record a span. Duplicate (type, text) pairs are stored once in the
    /// type index; blank text is ignored entirely.
    pub fn add_span(&mut self, span: EntitySpan) {
        if span.text.trim().is_empty() {
            return;
        }
        if self.seen.insert((span.entity_type, span.text.clone())) {
            self.by_type
                .entry(span.entity_type)
                .or_default()
                .push(span.text.clone());
        }
        self.spans.push(span);
    }

    /// Unique surface forms recorded under `entity_type`.
    pub fn entities_of_type(&self, entity_type: EntityType) -> &[String] {
        self.by_type
            .get(&entity_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All (type, text) pairs in type order, then first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityType, &str)> {
        self.by_type
            .iter()
            .flat_map(|(ty, texts)| texts.iter().map(move |t| (*ty, t.as_str())))
    }

    /// Number of unique (type, text) pairs.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Spans annotated in one sentence, in annotation order.
    pub fn spans_in_sentence(&self, index: usize) -> Vec<&EntitySpan> {
        self.spans
            .iter()
            .filter(|s| s.sentence_index == index)
            .collect()
    }

    /// Unique entities from sentences `index - radius ..= index + radius`.
    pub fn context_around(&self, index: usize, radius: usize) -> Vec<ContextEntity> {
        let lo = index.saturating_sub(radius);
        let hi = index.saturating_add(radius);
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for span in &self.spans {
            if span.sentence_index < lo || span.sentence_index > hi {
                continue;
            }
            let entity = ContextEntity {
                text: span.text.clone(),
                entity_type: span.entity_type,
            };
            if seen.insert(entity.clone()) {
                out.push(entity);
            }
        }
        out
    }
}
