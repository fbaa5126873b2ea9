//! Set request parsing and validation.
//!
//! Requests come either from a TOML file:
//!
//! ```toml
//! [[sets]]
//! questions = 5
//! difficulty = "easy"
//! question_type = "mcq"
//! ```
//!
//! or from `COUNT:DIFFICULTY:TYPE` specs such as `5:hard:fill-blank`.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::document::AnnotatedDocument;
use crate::error::{RequestError, MAX_SETS};
use crate::model::{Difficulty, QuestionType, SetRequest};

#[derive(Debug, Deserialize)]
struct TomlRequestFile {
    #[serde(default)]
    sets: Vec<TomlSet>,
}

#[derive(Debug, Deserialize)]
struct TomlSet {
    questions: usize,
    difficulty: String,
    #[serde(alias = "type")]
    question_type: String,
}

/// Parse a TOML request file.
pub fn parse_request_file(path: &Path) -> Result<Vec<SetRequest>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read request file: {}", path.display()))?;

    parse_request_str(&content, path)
}

/// Parse a TOML request string (useful for testing).
pub fn parse_request_str(content: &str, source_path: &Path) -> Result<Vec<SetRequest>> {
    let parsed: TomlRequestFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let requests = parsed
        .sets
        .into_iter()
        .map(|s| {
            Ok(SetRequest {
                question_count: s.questions,
                difficulty: s.difficulty.parse::<Difficulty>()?,
                question_type: s.question_type.parse::<QuestionType>()?,
            })
        })
        .collect::<Result<Vec<_>, RequestError>>()?;

    validate_requests(&requests)?;
    Ok(requests)
}

/// Parse a `COUNT:DIFFICULTY:TYPE` set spec.
pub fn parse_set_spec(spec: &str) -> Result<SetRequest, RequestError> {
    let parts: Vec<&str> = spec.trim().split(':').map(str::trim).collect();
    let [count, difficulty, question_type] = parts.as_slice() else {
        return Err(RequestError::MalformedSetSpec(spec.to_string()));
    };
    let question_count = count
        .parse::<usize>()
        .map_err(|_| RequestError::MalformedSetSpec(spec.to_string()))?;
    Ok(SetRequest {
        question_count,
        difficulty: difficulty.parse()?,
        question_type: question_type.parse()?,
    })
}

/// Check the request shape: 1 to [`MAX_SETS`] sets, none of them empty.
pub fn validate_requests(requests: &[SetRequest]) -> Result<(), RequestError> {
    if requests.is_empty() {
        return Err(RequestError::NoSets);
    }
    if requests.len() > MAX_SETS {
        return Err(RequestError::TooManySets {
            requested: requests.len(),
            max: MAX_SETS,
        });
    }
    if let Some(pos) = requests.iter().position(|r| r.question_count == 0) {
        return Err(RequestError::ZeroQuestions { set: pos + 1 });
    }
    Ok(())
}

/// A non-fatal observation about a request.
#[derive(Debug, Clone)]
pub struct RequestWarning {
    /// 1-based set number (if applicable).
    pub set: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Flag requests that are likely to come back partially filled.
pub fn request_warnings(
    requests: &[SetRequest],
    document: Option<&AnnotatedDocument>,
) -> Vec<RequestWarning> {
    let mut warnings = Vec::new();

    let Some(doc) = document else {
        return warnings;
    };

    let total: usize = requests.iter().map(|r| r.question_count).sum();
    let sentences = doc.sentences.len();
    if total > sentences {
        warnings.push(RequestWarning {
            set: None,
            message: format!(
                "{total} questions requested but the document has only {sentences} sentences"
            ),
        });
    }

    let annotated: std::collections::HashSet<usize> =
        doc.spans.iter().map(|s| s.sentence_index).collect();
    let needs_entities: usize = requests
        .iter()
        .filter(|r| r.question_type != QuestionType::TrueFalse)
        .map(|r| r.question_count)
        .sum();
    if needs_entities > annotated.len() {
        warnings.push(RequestWarning {
            set: None,
            message: format!(
                "{needs_entities} mcq/fill-blank questions requested but only {} sentences contain entities",
                annotated.len()
            ),
        });
    }

    if doc.spans.is_empty() {
        for (i, r) in requests.iter().enumerate() {
            if r.question_type != QuestionType::TrueFalse {
                warnings.push(RequestWarning {
                    set: Some(i + 1),
                    message: format!("{} set will be empty: document has no entities", r.question_type),
                });
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntitySpan, EntityType, Sentence};
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[[sets]]
questions = 5
difficulty = "easy"
question_type = "mcq"

[[sets]]
questions = 3
difficulty = "hard"
type = "fill-blank"
"#;

    #[test]
    fn parse_valid_toml() {
        let sets = parse_request_str(VALID_TOML, &PathBuf::from("req.toml")).unwrap();
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0], SetRequest::new(5, Difficulty::Easy, QuestionType::Mcq));
        assert_eq!(sets[1].question_type, QuestionType::FillBlank);
    }

    #[test]
    fn unknown_difficulty_rejected() {
        let toml = r#"
[[sets]]
questions = 2
difficulty = "nightmare"
question_type = "mcq"
"#;
        let err = parse_request_str(toml, &PathBuf::from("req.toml")).unwrap_err();
        assert!(err.to_string().contains("unknown difficulty"));
    }

    #[test]
    fn too_many_sets_rejected() {
        let one = "[[sets]]\nquestions = 1\ndifficulty = \"easy\"\nquestion_type = \"mcq\"\n";
        let toml = one.repeat(4);
        let err = parse_request_str(&toml, &PathBuf::from("req.toml")).unwrap_err();
        assert!(err.to_string().contains("at most 3"));
    }

    #[test]
    fn missing_fields_rejected() {
        let toml = "[[sets]]\nquestions = 1\n";
        assert!(parse_request_str(toml, &PathBuf::from("req.toml")).is_err());
        assert!(parse_request_str("", &PathBuf::from("req.toml")).is_err());
    }

    #[test]
    fn set_specs() {
        assert_eq!(
            parse_set_spec("4:medium:tf").unwrap(),
            SetRequest::new(4, Difficulty::Medium, QuestionType::TrueFalse)
        );
        assert!(matches!(
            parse_set_spec("four:easy:mcq"),
            Err(RequestError::MalformedSetSpec(_))
        ));
        assert!(matches!(
            parse_set_spec("4:easy"),
            Err(RequestError::MalformedSetSpec(_))
        ));
        assert!(matches!(
            parse_set_spec("4:easy:essay"),
            Err(RequestError::UnknownQuestionType(_))
        ));
    }

    #[test]
    fn warns_when_document_too_short() {
        let doc = AnnotatedDocument {
            text: String::new(),
            sentences: vec![Sentence::new(0, "Ada Lovelace wrote notes on the engine.")],
            spans: vec![EntitySpan::new("Ada Lovelace", EntityType::Person, 0)],
        };
        let requests = [SetRequest::new(3, Difficulty::Easy, QuestionType::Mcq)];
        let warnings = request_warnings(&requests, Some(&doc));
        assert!(warnings.iter().any(|w| w.message.contains("only 1 sentences")));
        assert!(request_warnings(&requests, None).is_empty());
    }

    #[test]
    fn warns_when_no_entities() {
        let doc = AnnotatedDocument {
            text: String::new(),
            sentences: vec![Sentence::new(0, "Nothing in here has a proper name.")],
            spans: vec![],
        };
        let requests = [
            SetRequest::new(1, Difficulty::Easy, QuestionType::FillBlank),
            SetRequest::new(1, Difficulty::Easy, QuestionType::TrueFalse),
        ];
        let warnings = request_warnings(&requests, Some(&doc));
        assert!(warnings.iter().any(|w| w.set == Some(1)));
        assert!(!warnings.iter().any(|w| w.set == Some(2)));
    }

    #[test]
    fn load_request_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("req.toml");
        std::fs::write(&path, VALID_TOML).unwrap();
        assert_eq!(parse_request_file(&path).unwrap().len(), 2);
    }
}
