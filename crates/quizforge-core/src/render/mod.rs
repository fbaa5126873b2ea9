//! Question renderers.
//!
//! Each renderer works on a single sentence plus the entities captured for
//! it. Returning `None` means the sentence cannot carry that question type.
//!
//! Entity text is located by its first byte-exact occurrence in the
//! sentence. If the same text appears earlier in another sense, that earlier
//! occurrence is the one highlighted or replaced.

pub mod fill_blank;
pub mod mcq;
pub mod true_false;

use serde::{Deserialize, Serialize};

use crate::model::{Choice, Difficulty, EntitySpan, Sentence};
use crate::policy::filter_candidates;
use crate::pool::{ContextEntity, EntityPool};
use crate::random::RandomSource;
use crate::selector::select;

pub use fill_blank::render_fill_blank;
pub use mcq::render_mcq;
pub use true_false::render_true_false;

/// Everything a renderer may look at for one sentence.
#[derive(Debug, Clone)]
pub struct SentenceInput<'a> {
    pub sentence: &'a Sentence,
    /// Spans annotated in this sentence.
    pub candidates: Vec<&'a EntitySpan>,
    /// Entities from the surrounding sentences.
    pub context: Vec<ContextEntity>,
    pub pool: &'a EntityPool,
    pub difficulty: Difficulty,
}

/// A question before it is numbered within its set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedQuestion {
    pub prompt: String,
    pub choices: Vec<Choice>,
    pub correct_answer: String,
}

impl SentenceInput<'_> {
    /// The answer entity for this sentence under the input's difficulty.
    pub(crate) fn pick_entity(&self, rng: &mut dyn RandomSource) -> Option<&EntitySpan> {
        let filtered = filter_candidates(self.difficulty, &self.candidates);
        select(&filtered, self.difficulty, rng)
    }
}

/// Replace the first byte-exact occurrence of `needle` in `haystack`.
///
/// Returns `None` when `needle` is empty or does not occur verbatim.
pub fn replace_first(haystack: &str, needle: &str, replacement: &str) -> Option<String> {
    if needle.is_empty() {
        return None;
    }
    let start = haystack.find(needle)?;
    let mut out = String::with_capacity(haystack.len() - needle.len() + replacement.len());
    out.push_str(&haystack[..start]);
    out.push_str(replacement);
    out.push_str(&haystack[start + needle.len()..]);
    Some(out)
}
