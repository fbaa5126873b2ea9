//! Dictionary-based entity annotation.
//!
//! Terms are listed per label in TOML:
//!
//! ```toml
//! [entities]
//! PERSON = ["Ada Lovelace", "Charles Babbage"]
//! GPE = ["London"]
//! ```
//!
//! Numbers, years, percentages and currency amounts are recognized by simple
//! token rules unless disabled.

use std::collections::{BTreeMap, HashSet};
use std::ops::Range;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{EntityType, RawSpan, Sentence};
use crate::traits::Annotator;

#[derive(Debug, Deserialize)]
struct TomlGazetteer {
    #[serde(default)]
    entities: BTreeMap<String, Vec<String>>,
    #[serde(default = "default_true")]
    numeric_rules: bool,
}

fn default_true() -> bool {
    true
}

/// Annotator backed by a fixed term list.
#[derive(Debug, Clone)]
pub struct GazetteerAnnotator {
    /// Longest terms first so longer names win over their prefixes.
    terms: Vec<(String, EntityType)>,
    numeric_rules: bool,
}

impl Default for GazetteerAnnotator {
    fn default() -> Self {
        Self {
            terms: Vec::new(),
            numeric_rules: true,
        }
    }
}

impl GazetteerAnnotator {
    pub fn new(terms: impl IntoIterator<Item = (String, EntityType)>) -> Self {
        let mut seen = HashSet::new();
        let mut terms: Vec<(String, EntityType)> = terms
            .into_iter()
            .filter(|(t, _)| !t.trim().is_empty())
            .filter(|(t, _)| seen.insert(t.clone()))
            .collect();
        terms.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        Self {
            terms,
            numeric_rules: true,
        }
    }

    pub fn with_numeric_rules(mut self, enabled: bool) -> Self {
        self.numeric_rules = enabled;
        self
    }

    /// Number of dictionary terms.
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Load a gazetteer from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read gazetteer: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("failed to parse gazetteer: {}", path.display()))
    }

    /// Parse a gazetteer from TOML. Labels outside the taxonomy are skipped.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let parsed: TomlGazetteer = toml::from_str(content)?;
        let mut terms = Vec::new();
        for (label, entries) in parsed.entities {
            match label.parse::<EntityType>() {
                Ok(ty) => terms.extend(entries.into_iter().map(|t| (t, ty))),
                Err(e) => tracing::warn!("skipping gazetteer label: {e}"),
            }
        }
        Ok(Self::new(terms).with_numeric_rules(parsed.numeric_rules))
    }
}

impl Annotator for GazetteerAnnotator {
    fn annotate(&self, sentence: &Sentence) -> Vec<RawSpan> {
        let text = sentence.text.as_str();
        let mut found: Vec<(Range<usize>, EntityType)> = Vec::new();

        for (term, ty) in &self.terms {
            let mut from = 0;
            while let Some(pos) = text[from..].find(term.as_str()) {
                let range = from + pos..from + pos + term.len();
                from = range.end;
                if is_word_bounded(text, &range) && !overlaps(&found, &range) {
                    found.push((range, *ty));
                }
            }
        }

        if self.numeric_rules {
            for (range, ty) in numeric_spans(text) {
                if !overlaps(&found, &range) {
                    found.push((range, ty));
                }
            }
        }

        found.sort_by_key(|(r, _)| r.start);
        found
            .into_iter()
            .map(|(range, ty)| RawSpan {
                text: text[range].to_string(),
                label: ty.label().to_string(),
                sentence_index: sentence.index,
            })
            .collect()
    }
}

fn overlaps(found: &[(Range<usize>, EntityType)], range: &Range<usize>) -> bool {
    found
        .iter()
        .any(|(r, _)| r.start < range.end && range.start < r.end)
}

fn is_word_bounded(text: &str, range: &Range<usize>) -> bool {
    let before = text[..range.start].chars().next_back();
    let after = text[range.end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}

/// Whitespace-separated tokens with their byte offsets, trailing and leading
/// punctuation stripped.
fn tokens(text: &str) -> Vec<(usize, &str)> {
    let mut out = Vec::new();
    let mut start = None;
    for (i, c) in text.char_indices().chain(std::iter::once((text.len(), ' '))) {
        match (c.is_whitespace(), start) {
            (true, Some(s)) => {
                let raw = &text[s..i];
                let trimmed_start = raw.trim_start_matches(['(', '"', '\'']);
                let offset = s + (raw.len() - trimmed_start.len());
                let token = trimmed_start
                    .trim_end_matches([',', '.', ';', ':', '!', '?', ')', '"', '\'']);
                if !token.is_empty() {
                    out.push((offset, token));
                }
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    out
}

fn is_number(s: &str) -> bool {
    !s.is_empty()
        && s.chars().next().is_some_and(|c| c.is_ascii_digit())
        && s.chars().all(|c| c.is_ascii_digit() || c == ',' || c == '.')
}

fn numeric_spans(text: &str) -> Vec<(Range<usize>, EntityType)> {
    let toks = tokens(text);
    let mut out = Vec::new();
    let mut i = 0;
    while i < toks.len() {
        let (offset, tok) = toks[i];
        let range = offset..offset + tok.len();
        let next_word = toks.get(i + 1).map(|(_, t)| t.to_lowercase());

        if let Some(amount) = tok.strip_suffix('%') {
            if is_number(amount) {
                out.push((range, EntityType::Percent));
            }
        } else if let Some(amount) = tok.strip_prefix(['$', '€', '£']) {
            if is_number(amount) {
                out.push((range, EntityType::Money));
            }
        } else if is_number(tok) {
            if matches!(next_word.as_deref(), Some("percent")) {
                let (next_offset, next_tok) = toks[i + 1];
                out.push((offset..next_offset + next_tok.len(), EntityType::Percent));
                i += 2;
                continue;
            }
            let is_year = tok.len() == 4
                && tok
                    .parse::<u32>()
                    .is_ok_and(|y| (1000..=2099).contains(&y));
            let ty = if is_year {
                EntityType::Date
            } else {
                EntityType::Cardinal
            };
            out.push((range, ty));
        }
        i += 1;
    }
    out
}
