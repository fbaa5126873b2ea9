//! Difficulty policy: pure mappings from a requested difficulty to selection,
//! distractor and rendering parameters.

use crate::model::{Difficulty, EntitySpan, EntityType};

/// How distractors are sourced for a difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistractorStrategy {
    /// Only types from other groups.
    DisjointGroups,
    /// Same-group strings blended with an equal count from other groups.
    Blended,
    /// Same type, nearby sentences first.
    SameTypeContextual,
}

/// Visual form of a fill-in blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlankStyle {
    /// Long blank followed by the entity type in parentheses.
    Hinted,
    /// Long blank.
    Plain,
    /// Short blank.
    Short,
}

const LONG_BLANK: &str = "__________";
const SHORT_BLANK: &str = "_____";

/// Entity types a difficulty prefers as question subjects. Empty means no
/// preference.
pub fn preferred_types(difficulty: Difficulty) -> &'static [EntityType] {
    match difficulty {
        Difficulty::Easy => &[EntityType::Person, EntityType::Organization],
        Difficulty::Medium => &[],
        Difficulty::Hard => &[
            EntityType::Date,
            EntityType::Money,
            EntityType::Percent,
            EntityType::Time,
            EntityType::Cardinal,
        ],
    }
}

/// Keep candidates of preferred types, falling back to all candidates when
/// the filter would leave nothing.
pub fn filter_candidates<'a>(
    difficulty: Difficulty,
    candidates: &[&'a EntitySpan],
) -> Vec<&'a EntitySpan> {
    let preferred = preferred_types(difficulty);
    if preferred.is_empty() {
        return candidates.to_vec();
    }
    let filtered: Vec<&EntitySpan> = candidates
        .iter()
        .copied()
        .filter(|s| preferred.contains(&s.entity_type))
        .collect();
    if filtered.is_empty() {
        candidates.to_vec()
    } else {
        filtered
    }
}

pub fn distractor_strategy(difficulty: Difficulty) -> DistractorStrategy {
    match difficulty {
        Difficulty::Easy => DistractorStrategy::DisjointGroups,
        Difficulty::Medium => DistractorStrategy::Blended,
        Difficulty::Hard => DistractorStrategy::SameTypeContextual,
    }
}

/// Probability that a true/false statement is deliberately falsified.
pub fn falsify_probability(difficulty: Difficulty) -> f64 {
    match difficulty {
        Difficulty::Easy => 0.6,
        Difficulty::Medium => 0.5,
        Difficulty::Hard => 0.7,
    }
}

pub fn blank_style(difficulty: Difficulty) -> BlankStyle {
    match difficulty {
        Difficulty::Easy => BlankStyle::Hinted,
        Difficulty::Medium => BlankStyle::Plain,
        Difficulty::Hard => BlankStyle::Short,
    }
}

/// The placeholder that replaces the answer in a fill-blank prompt.
pub fn render_blank(difficulty: Difficulty, entity_type: EntityType) -> String {
    match blank_style(difficulty) {
        BlankStyle::Hinted => format!("{LONG_BLANK} ({entity_type})"),
        BlankStyle::Plain => LONG_BLANK.to_string(),
        BlankStyle::Short => SHORT_BLANK.to_string(),
    }
}
