//! True/false rendering.

use crate::distractors::{self, Target};
use crate::model::{Choice, Difficulty};
use crate::policy::falsify_probability;
use crate::random::{choose, RandomSource};

use super::{replace_first, RenderedQuestion, SentenceInput};

pub const TRUE_LABEL: &str = "True";
pub const FALSE_LABEL: &str = "False";

/// Render a true/false statement from the sentence.
///
/// With the difficulty's falsification probability one entity is swapped for
/// a distractor. When no entity, distractor or verbatim match is available
/// the statement is presented unchanged and is true. Never returns `None`.
pub fn render_true_false(
    input: &SentenceInput<'_>,
    rng: &mut dyn RandomSource,
) -> Option<RenderedQuestion> {
    let falsify = rng.next_f64() < falsify_probability(input.difficulty);
    let falsified = if falsify { falsify_statement(input, rng) } else { None };

    let (prompt, correct) = match falsified {
        Some(text) => (text, FALSE_LABEL),
        None => (input.sentence.text.clone(), TRUE_LABEL),
    };

    Some(RenderedQuestion {
        prompt,
        choices: vec![
            Choice::new(TRUE_LABEL, TRUE_LABEL),
            Choice::new(FALSE_LABEL, FALSE_LABEL),
        ],
        correct_answer: correct.to_string(),
    })
}

fn falsify_statement(input: &SentenceInput<'_>, rng: &mut dyn RandomSource) -> Option<String> {
    let entity = input.pick_entity(rng)?;
    let target = Target {
        text: &entity.text,
        entity_type: entity.entity_type,
    };
    let candidates =
        distractors::build(target, input.pool, input.difficulty, &input.context, rng);

    let replacement = match input.difficulty {
        Difficulty::Hard => candidates.first(),
        Difficulty::Easy | Difficulty::Medium => choose(&candidates, rng),
    }?;

    let altered = replace_first(&input.sentence.text, &entity.text, replacement);
    if altered.is_none() {
        tracing::debug!(
            sentence = input.sentence.index,
            entity = %entity.text,
            "entity text not found verbatim, statement stays true"
        );
    }
    altered
}
