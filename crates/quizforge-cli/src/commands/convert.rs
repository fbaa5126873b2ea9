//! The `quizforge convert` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use quizforge_core::engine::{ProgressReporter, QuizEngine, QuizEngineConfig};
use quizforge_core::model::{Difficulty, GeneratedQuestion, GeneratedSet, QuestionType, SetRequest};
use quizforge_core::random::RngSource;
use quizforge_core::report::QuizOutcome;
use quizforge_core::request::{parse_request_file, parse_set_spec};
use quizforge_providers::config::load_config_from;
use quizforge_providers::create_generator;

use super::load_document;

pub struct ConvertArgs {
    pub input: PathBuf,
    pub request: Option<PathBuf>,
    pub sets: Vec<String>,
    pub seed: Option<u64>,
    pub generator: Option<String>,
    pub gazetteer: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

/// What gets written to disk for one conversion.
#[derive(Debug, Serialize)]
pub struct ConversionOutput {
    pub total_questions: usize,
    /// Start of the source text.
    pub text_preview: String,
    pub difficulty_summary: Vec<SetSummary>,
    pub quiz: QuizOutcome,
}

#[derive(Debug, Serialize)]
pub struct SetSummary {
    pub label: String,
    pub difficulty: Difficulty,
    pub question_type: QuestionType,
    pub requested: usize,
    pub generated: usize,
}

impl From<&GeneratedSet> for SetSummary {
    fn from(set: &GeneratedSet) -> Self {
        Self {
            label: set.label.clone(),
            difficulty: set.difficulty,
            question_type: set.question_type,
            requested: set.requested,
            generated: set.questions.len(),
        }
    }
}

/// Console progress reporter.
struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn on_set_start(&self, label: &str, request: &SetRequest) {
        eprintln!(
            "  Starting: {label} ({} {} {} questions)",
            request.question_count, request.difficulty, request.question_type
        );
    }

    fn on_question(&self, label: &str, question: &GeneratedQuestion) {
        tracing::debug!(
            set = label,
            ordinal = question.ordinal,
            sentence = question.sentence_index,
            "question added"
        );
    }

    fn on_sentence_skipped(&self, label: &str, sentence_index: usize) {
        tracing::debug!(set = label, sentence = sentence_index, "sentence skipped");
    }

    fn on_set_complete(&self, set: &GeneratedSet) {
        let note = if set.is_partial() { " (partial)" } else { "" };
        eprintln!(
            "  Done: {} {}/{}{note}",
            set.label,
            set.questions.len(),
            set.requested
        );
    }
}

pub async fn execute(args: ConvertArgs) -> Result<()> {
    let config = load_config_from(args.config.as_deref())?;

    let mut requests = match &args.request {
        Some(path) => parse_request_file(path)?,
        None => Vec::new(),
    };
    for spec in &args.sets {
        requests.push(parse_set_spec(spec)?);
    }

    let gazetteer = args.gazetteer.as_deref().or(config.gazetteer.as_deref());
    let document = load_document(&args.input, gazetteer)?;

    let generator_name = args
        .generator
        .as_deref()
        .unwrap_or(&config.default_generator);
    let generator = create_generator(generator_name, &config)?;

    let mut rng = match args.seed {
        Some(seed) => RngSource::seeded(seed),
        None => RngSource::from_entropy(),
    };

    let total_requested: usize = requests.iter().map(|r| r.question_count).sum();
    eprintln!(
        "quizforge v{}: {} sets, {} questions from {} sentences ({} generator)",
        env!("CARGO_PKG_VERSION"),
        requests.len(),
        total_requested,
        document.sentences.len(),
        generator.name()
    );
    eprintln!();

    let engine = QuizEngine::new(generator, QuizEngineConfig::default());
    let outcome = engine
        .run(&document, &requests, &mut rng, &ConsoleReporter)
        .await?;

    print_summary(&outcome);

    let output = ConversionOutput {
        total_questions: outcome.total_questions,
        text_preview: document.preview(),
        difficulty_summary: outcome.sets.iter().map(SetSummary::from).collect(),
        quiz: outcome,
    };

    let output_dir = args.output.unwrap_or(config.output_dir);
    let path = save_output(&output, &output_dir)?;
    eprintln!("Quiz saved to: {}", path.display());

    Ok(())
}

fn save_output(output: &ConversionOutput, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory: {}", dir.display()))?;
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
    let path = dir.join(format!("quiz-{timestamp}.json"));
    let json = serde_json::to_string_pretty(output).context("failed to serialize quiz")?;
    std::fs::write(&path, json)
        .with_context(|| format!("failed to write quiz to {}", path.display()))?;
    Ok(path)
}

fn print_summary(outcome: &QuizOutcome) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Set", "Difficulty", "Type", "Questions", "Sentences"]);

    for set in &outcome.sets {
        let sentences = match (set.questions.first(), set.questions.last()) {
            (Some(first), Some(last)) => {
                format!("{}-{}", first.sentence_index, last.sentence_index)
            }
            _ => "-".to_string(),
        };
        table.add_row(vec![
            Cell::new(&set.label),
            Cell::new(set.difficulty),
            Cell::new(set.question_type),
            Cell::new(format!("{}/{}", set.questions.len(), set.requested)),
            Cell::new(sentences),
        ]);
    }

    eprintln!("\n{table}");
    eprintln!(
        "{} questions, {}/{} sentences consumed ({}ms)",
        outcome.total_questions,
        outcome.sentences_consumed,
        outcome.sentence_count,
        outcome.duration_ms
    );
    if outcome.has_partial_sets() {
        eprintln!("Warning: the document ran out of usable sentences before every set was filled.");
    }
}
