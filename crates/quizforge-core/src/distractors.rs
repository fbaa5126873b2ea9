//! Wrong-answer construction.
//!
//! Confusability grows with difficulty: easy answers compete with entities
//! of unrelated kinds, medium ones with a blend, hard ones with entities of
//! the very same type taken from nearby sentences where possible.

use std::collections::HashSet;

use crate::model::{Difficulty, EntityType};
use crate::policy::{distractor_strategy, DistractorStrategy};
use crate::pool::{ContextEntity, EntityPool};
use crate::random::{shuffle, RandomSource};

/// Distractors an MCQ needs besides the correct answer.
pub const MCQ_DISTRACTORS: usize = 3;

/// Global same-type entities added when the context only offers same-group ones.
const GLOBAL_SAME_TYPE_TOP_UP: usize = 2;

/// Minimum exact-type context entities that are used on their own.
const MIN_CONTEXT_SAME_TYPE: usize = 2;

/// The answer a distractor list is built against.
#[derive(Debug, Clone, Copy)]
pub struct Target<'a> {
    pub text: &'a str,
    pub entity_type: EntityType,
}

/// Build the ordered, duplicate-free distractor list for `target`.
///
/// The result never contains the correct answer or blank strings.
pub fn build(
    target: Target<'_>,
    pool: &EntityPool,
    difficulty: Difficulty,
    context: &[ContextEntity],
    rng: &mut dyn RandomSource,
) -> Vec<String> {
    let mut list = match distractor_strategy(difficulty) {
        DistractorStrategy::DisjointGroups => disjoint_groups(target, pool),
        DistractorStrategy::Blended => blended(target, pool, rng),
        DistractorStrategy::SameTypeContextual => {
            same_type_contextual(target, pool, context, rng)
        }
    };
    shuffle(&mut list, rng);
    finalize(list, target.text)
}

fn disjoint_groups(target: Target<'_>, pool: &EntityPool) -> Vec<String> {
    let group = target.entity_type.group();
    pool.iter()
        .filter(|(ty, _)| ty.group() != group)
        .map(|(_, text)| text.to_string())
        .collect()
}

/// Equal counts from the same group and from other groups. Whichever side is
/// longer is truncated, the same-group side included.
fn blended(target: Target<'_>, pool: &EntityPool, rng: &mut dyn RandomSource) -> Vec<String> {
    let group = target.entity_type.group();
    let (same, other): (Vec<_>, Vec<_>) = pool
        .iter()
        .filter(|(_, text)| *text != target.text)
        .partition(|(ty, _)| ty.group() == group);
    let mut same = finalize(
        same.into_iter().map(|(_, t)| t.to_string()).collect(),
        target.text,
    );
    let mut other = finalize(
        other.into_iter().map(|(_, t)| t.to_string()).collect(),
        target.text,
    );
    shuffle(&mut same, rng);
    shuffle(&mut other, rng);

    let k = same.len().min(other.len());
    same.truncate(k);
    other.truncate(k);
    same.extend(other);
    same
}

fn same_type_contextual(
    target: Target<'_>,
    pool: &EntityPool,
    context: &[ContextEntity],
    rng: &mut dyn RandomSource,
) -> Vec<String> {
    let mut global: Vec<String> = pool
        .entities_of_type(target.entity_type)
        .iter()
        .filter(|t| t.as_str() != target.text)
        .cloned()
        .collect();

    if context.is_empty() {
        return global;
    }

    let same_type = finalize(
        context
            .iter()
            .filter(|e| e.entity_type == target.entity_type)
            .map(|e| e.text.clone())
            .collect(),
        target.text,
    );
    if same_type.len() >= MIN_CONTEXT_SAME_TYPE {
        return same_type;
    }

    let group = target.entity_type.group();
    let same_group = finalize(
        context
            .iter()
            .filter(|e| e.entity_type != target.entity_type && e.entity_type.group() == group)
            .map(|e| e.text.clone())
            .collect(),
        target.text,
    );
    if same_group.is_empty() {
        return global;
    }

    shuffle(&mut global, rng);
    let mut out = same_group;
    out.extend(global.into_iter().take(GLOBAL_SAME_TYPE_TOP_UP));
    out
}

/// Dedup preserving first occurrence, dropping `correct` and blank strings.
fn finalize(list: Vec<String>, correct: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    list.into_iter()
        .filter(|s| !s.trim().is_empty() && s != correct)
        .filter(|s| seen.insert(s.clone()))
        .collect()
}

/// Fill `distractors` up to `wanted` entries: first with random pool strings
/// of any type, then with `Option N` placeholders.
pub fn top_up(
    distractors: &mut Vec<String>,
    wanted: usize,
    correct: &str,
    pool: &EntityPool,
    rng: &mut dyn RandomSource,
) {
    distractors.truncate(wanted);
    if distractors.len() < wanted {
        let mut spare: Vec<String> = pool
            .iter()
            .map(|(_, t)| t.to_string())
            .filter(|t| t != correct && !distractors.contains(t))
            .collect();
        spare = finalize(spare, correct);
        shuffle(&mut spare, rng);
        let missing = wanted - distractors.len();
        distractors.extend(spare.into_iter().take(missing));
    }

    let mut n = 1;
    while distractors.len() < wanted {
        let placeholder = format!("Option {n}");
        n += 1;
        if placeholder != correct && !distractors.contains(&placeholder) {
            distractors.push(placeholder);
        }
    }
}
