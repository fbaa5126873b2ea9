//! The `quizforge validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizforge_core::request::{parse_request_file, request_warnings};

use super::load_document;

pub fn execute(
    request_path: PathBuf,
    input: Option<PathBuf>,
    gazetteer: Option<PathBuf>,
) -> Result<()> {
    let requests = parse_request_file(&request_path)?;
    let total: usize = requests.iter().map(|r| r.question_count).sum();
    println!("Request: {} sets ({total} questions)", requests.len());
    for (i, r) in requests.iter().enumerate() {
        println!(
            "  [{}] {} {} {} questions",
            i + 1,
            r.question_count,
            r.difficulty,
            r.question_type
        );
    }

    let document = match &input {
        Some(path) => {
            let doc = load_document(path, gazetteer.as_deref())?;
            println!(
                "Document: {} sentences, {} entities",
                doc.sentences.len(),
                doc.spans.len()
            );
            Some(doc)
        }
        None => None,
    };

    let warnings = request_warnings(&requests, document.as_ref());
    for w in &warnings {
        let prefix = w
            .set
            .map(|set| format!("  [{set}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Request valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
