//! quizforge-core: Quiz synthesis engine.
//!
//! Turns a document that has been split into sentences and annotated with
//! typed entity spans into graded quiz sets: multiple-choice, true/false and
//! fill-in-the-blank questions with difficulty-calibrated distractors.

pub mod distractors;
pub mod document;
pub mod engine;
pub mod error;
pub mod gazetteer;
pub mod model;
pub mod policy;
pub mod pool;
pub mod random;
pub mod render;
pub mod report;
pub mod request;
pub mod segment;
pub mod selector;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;
