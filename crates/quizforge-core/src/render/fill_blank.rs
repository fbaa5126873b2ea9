//! Fill-in-the-blank rendering.

use crate::policy::render_blank;
use crate::random::RandomSource;

use super::{replace_first, RenderedQuestion, SentenceInput};

/// Blank out the chosen entity. `None` when the sentence has no usable
/// entity or its text does not occur verbatim.
pub fn render_fill_blank(
    input: &SentenceInput<'_>,
    rng: &mut dyn RandomSource,
) -> Option<RenderedQuestion> {
    let entity = input.pick_entity(rng)?;
    let blank = render_blank(input.difficulty, entity.entity_type);
    let prompt = replace_first(&input.sentence.text, &entity.text, &blank)?;

    Some(RenderedQuestion {
        prompt,
        choices: Vec::new(),
        correct_answer: entity.text.clone(),
    })
}
