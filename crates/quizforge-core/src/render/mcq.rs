//! Multiple-choice rendering.

use crate::distractors::{self, Target, MCQ_DISTRACTORS};
use crate::model::Choice;
use crate::random::{shuffle, RandomSource};
use crate::traits::{QuestionGenerator, HIGHLIGHT_MARKER};

use super::{replace_first, RenderedQuestion, SentenceInput};

const LABELS: [&str; 4] = ["A", "B", "C", "D"];

/// Render a four-choice question, or `None` when the sentence has no usable
/// entity. Generator failures are returned as errors.
pub async fn render_mcq(
    input: &SentenceInput<'_>,
    generator: &dyn QuestionGenerator,
    rng: &mut dyn RandomSource,
) -> anyhow::Result<Option<RenderedQuestion>> {
    let Some(entity) = input.pick_entity(rng) else {
        return Ok(None);
    };

    let marked = format!("{HIGHLIGHT_MARKER} {} {HIGHLIGHT_MARKER}", entity.text);
    let Some(highlighted) = replace_first(&input.sentence.text, &entity.text, &marked) else {
        tracing::debug!(
            sentence = input.sentence.index,
            entity = %entity.text,
            "entity text not found verbatim, skipping"
        );
        return Ok(None);
    };

    let target = Target {
        text: &entity.text,
        entity_type: entity.entity_type,
    };
    let mut wrong =
        distractors::build(target, input.pool, input.difficulty, &input.context, rng);
    distractors::top_up(&mut wrong, MCQ_DISTRACTORS, &entity.text, input.pool, rng);

    let mut options = Vec::with_capacity(LABELS.len());
    options.push(entity.text.clone());
    options.extend(wrong);
    shuffle(&mut options, rng);

    let choices: Vec<Choice> = LABELS
        .iter()
        .zip(options)
        .map(|(label, text)| Choice::new(*label, text))
        .collect();
    let correct_answer = choices
        .iter()
        .find(|c| c.text == entity.text)
        .map(|c| c.label.clone())
        .ok_or_else(|| anyhow::anyhow!("correct answer missing from choices"))?;

    let question = generator.generate(&highlighted).await?;

    Ok(Some(RenderedQuestion {
        prompt: question.trim().to_string(),
        choices,
        correct_answer,
    }))
}
