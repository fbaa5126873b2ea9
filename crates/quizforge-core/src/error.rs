//! Request error types.
//!
//! A malformed set request is the only failure the engine reports to its
//! caller. Sparse documents, missing entities and short distractor lists are
//! all recovered inside the engine.

use thiserror::Error;

/// Maximum number of sets in one conversion request.
pub const MAX_SETS: usize = 3;

/// Errors in the caller-supplied request shape.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    /// No sets were requested.
    #[error("at least one set must be requested")]
    NoSets,

    /// More sets than the engine supports.
    #[error("{requested} sets requested, at most {max} are supported")]
    TooManySets { requested: usize, max: usize },

    /// A set asked for zero questions.
    #[error("set {set} requests zero questions")]
    ZeroQuestions { set: usize },

    /// Difficulty outside easy/medium/hard.
    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),

    /// Question type outside mcq/true-false/fill-blank.
    #[error("unknown question type: {0}")]
    UnknownQuestionType(String),

    /// A `COUNT:DIFFICULTY:TYPE` set spec could not be parsed.
    #[error("malformed set spec '{0}', expected COUNT:DIFFICULTY:TYPE")]
    MalformedSetSpec(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let err = RequestError::TooManySets {
            requested: 4,
            max: MAX_SETS,
        };
        assert_eq!(err.to_string(), "4 sets requested, at most 3 are supported");
        assert!(RequestError::ZeroQuestions { set: 2 }
            .to_string()
            .contains("set 2"));
    }
}
