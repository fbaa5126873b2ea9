pub mod convert;
pub mod init;
pub mod list_generators;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};

use quizforge_core::document::AnnotatedDocument;
use quizforge_core::gazetteer::GazetteerAnnotator;
use quizforge_core::segment::RuleSegmenter;

/// Load `input` as a document: `.json` files are pre-annotated, anything else
/// is segmented and annotated with the gazetteer.
pub fn load_document(input: &Path, gazetteer: Option<&Path>) -> Result<AnnotatedDocument> {
    let is_json = input
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        return AnnotatedDocument::load_json(input);
    }

    let text = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read input: {}", input.display()))?;
    let annotator = match gazetteer {
        Some(path) => GazetteerAnnotator::load(path)?,
        None => GazetteerAnnotator::default(),
    };
    tracing::debug!(terms = annotator.term_count(), "annotating plain-text input");
    Ok(AnnotatedDocument::annotate(&text, &RuleSegmenter, &annotator))
}
