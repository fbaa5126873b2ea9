//! Quiz allocation engine.
//!
//! Walks a single sentence cursor through the document, filling each
//! requested set in order. Consumed sentences are never revisited, so sets
//! never share a sentence. Sets that run out of sentences are returned
//! partially filled.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use uuid::Uuid;

use crate::document::AnnotatedDocument;
use crate::model::{AnswerKeyEntry, GeneratedQuestion, GeneratedSet, QuestionType, SetRequest};
use crate::pool::{EntityPool, CONTEXT_RADIUS};
use crate::random::RandomSource;
use crate::render::{
    render_fill_blank, render_mcq, render_true_false, RenderedQuestion, SentenceInput,
};
use crate::report::QuizOutcome;
use crate::request::validate_requests;
use crate::traits::QuestionGenerator;

/// Configuration for the quiz engine.
#[derive(Debug, Clone)]
pub struct QuizEngineConfig {
    /// Sentences on each side used as distractor context.
    pub context_radius: usize,
    /// Attempt ceiling per set, as a multiple of the sentence count.
    pub attempt_factor: usize,
}

impl Default for QuizEngineConfig {
    fn default() -> Self {
        Self {
            context_radius: CONTEXT_RADIUS,
            attempt_factor: 2,
        }
    }
}

/// Progress reporting trait.
pub trait ProgressReporter: Send + Sync {
    fn on_set_start(&self, label: &str, request: &SetRequest);
    fn on_question(&self, label: &str, question: &GeneratedQuestion);
    fn on_sentence_skipped(&self, label: &str, sentence_index: usize);
    fn on_set_complete(&self, set: &GeneratedSet);
}

/// No-op progress reporter.
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn on_set_start(&self, _: &str, _: &SetRequest) {}
    fn on_question(&self, _: &str, _: &GeneratedQuestion) {}
    fn on_sentence_skipped(&self, _: &str, _: usize) {}
    fn on_set_complete(&self, _: &GeneratedSet) {}
}

/// The quiz synthesis engine.
pub struct QuizEngine {
    generator: Arc<dyn QuestionGenerator>,
    config: QuizEngineConfig,
}

impl QuizEngine {
    pub fn new(generator: Arc<dyn QuestionGenerator>, config: QuizEngineConfig) -> Self {
        Self { generator, config }
    }

    /// Generate every requested set from `document`.
    ///
    /// Fails only on a malformed request or a question-generator error.
    pub async fn run(
        &self,
        document: &AnnotatedDocument,
        requests: &[SetRequest],
        rng: &mut dyn RandomSource,
        progress: &dyn ProgressReporter,
    ) -> Result<QuizOutcome> {
        validate_requests(requests)?;

        let start = Instant::now();
        let pool = EntityPool::from_spans(&document.spans);
        let total = document.sentences.len();
        let max_attempts = total.saturating_mul(self.config.attempt_factor);
        let mut cursor = 0usize;
        let mut sets = Vec::with_capacity(requests.len());

        tracing::debug!(
            sentences = total,
            entities = pool.len(),
            sets = requests.len(),
            "starting quiz generation"
        );

        for (position, request) in requests.iter().enumerate() {
            let label = GeneratedSet::label_for(position);
            progress.on_set_start(&label, request);

            let mut questions: Vec<GeneratedQuestion> = Vec::new();
            let mut attempts = 0usize;

            while questions.len() < request.question_count
                && cursor < total
                && attempts < max_attempts
            {
                let sentence = &document.sentences[cursor];
                cursor += 1;
                attempts += 1;

                let input = SentenceInput {
                    sentence,
                    candidates: pool.spans_in_sentence(sentence.index),
                    context: pool.context_around(sentence.index, self.config.context_radius),
                    pool: &pool,
                    difficulty: request.difficulty,
                };

                match self.render(request.question_type, &input, rng).await? {
                    Some(rendered) => {
                        let question = GeneratedQuestion {
                            ordinal: questions.len() + 1,
                            prompt: rendered.prompt,
                            choices: rendered.choices,
                            correct_answer: rendered.correct_answer,
                            sentence_index: sentence.index,
                        };
                        progress.on_question(&label, &question);
                        questions.push(question);
                    }
                    None => {
                        tracing::debug!(set = %label, sentence = sentence.index, "sentence unusable");
                        progress.on_sentence_skipped(&label, sentence.index);
                    }
                }
            }

            let answer_key = questions
                .iter()
                .map(|q| AnswerKeyEntry {
                    ordinal: q.ordinal,
                    answer: q.correct_answer.clone(),
                })
                .collect();

            let set = GeneratedSet {
                label,
                difficulty: request.difficulty,
                question_type: request.question_type,
                requested: request.question_count,
                questions,
                answer_key,
            };

            if set.is_partial() {
                tracing::info!(
                    set = %set.label,
                    produced = set.questions.len(),
                    requested = set.requested,
                    "document exhausted before set was filled"
                );
            } else {
                tracing::info!(set = %set.label, questions = set.questions.len(), "set complete");
            }
            progress.on_set_complete(&set);
            sets.push(set);
        }

        let total_questions = sets.iter().map(|s| s.questions.len()).sum();

        Ok(QuizOutcome {
            id: Uuid::new_v4(),
            created_at: chrono::Utc::now(),
            sets,
            total_questions,
            sentences_consumed: cursor,
            sentence_count: total,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    async fn render(
        &self,
        question_type: QuestionType,
        input: &SentenceInput<'_>,
        rng: &mut dyn RandomSource,
    ) -> Result<Option<RenderedQuestion>> {
        match question_type {
            QuestionType::Mcq => render_mcq(input, self.generator.as_ref(), rng).await,
            QuestionType::TrueFalse => Ok(render_true_false(input, rng)),
            QuestionType::FillBlank => Ok(render_fill_blank(input, rng)),
        }
    }
}
