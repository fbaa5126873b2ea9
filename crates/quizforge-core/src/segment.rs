//! Rule-based sentence segmentation.

use crate::model::Sentence;
use crate::traits::{is_sentence_long_enough, Segmenter};

/// Splits on `.`, `!` or `?` followed by whitespace, and on blank lines.
///
/// Internal whitespace (including hard line wraps from extracted text) is
/// collapsed to single spaces. Fragments of four words or fewer are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleSegmenter;

impl Segmenter for RuleSegmenter {
    fn segment(&self, text: &str) -> Vec<Sentence> {
        split_raw(text)
            .into_iter()
            .map(|s| s.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|s| is_sentence_long_enough(s))
            .enumerate()
            .map(|(i, s)| Sentence::new(i, s))
            .collect()
    }
}

fn split_raw(text: &str) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\n' && current.trim_end_matches([' ', '\t', '\r']).ends_with('\n') {
            // blank or whitespace-only line
            push_piece(&mut pieces, &mut current);
            continue;
        }
        current.push(c);
        if matches!(c, '.' | '!' | '?') {
            match chars.peek() {
                None => push_piece(&mut pieces, &mut current),
                Some(next) if next.is_whitespace() => push_piece(&mut pieces, &mut current),
                _ => {}
            }
        }
    }
    push_piece(&mut pieces, &mut current);
    pieces
}

fn push_piece(pieces: &mut Vec<String>, current: &mut String) {
    if !current.trim().is_empty() {
        pieces.push(current.trim().to_string());
    }
    current.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_and_drops_short_fragments() {
        let text = "Ada Lovelace wrote the first program. Truly. \
                    Did Babbage ever finish the engine? We may never know for sure!";
        let sentences = RuleSegmenter.segment(text);
        let texts: Vec<&str> = sentences.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "Ada Lovelace wrote the first program.",
                "Did Babbage ever finish the engine?",
                "We may never know for sure!",
            ]
        );
        assert_eq!(sentences[2].index, 2);
    }

    #[test]
    fn blank_lines_separate_sentences_and_wraps_collapse() {
        let text = "Chapter one covers the early\nhistory of computing machines\n\nThe second chapter covers modern systems";
        let sentences = RuleSegmenter.segment(text);
        assert_eq!(sentences.len(), 2);
        assert_eq!(
            sentences[0].text,
            "Chapter one covers the early history of computing machines"
        );
    }

    #[test]
    fn whitespace_only_lines_separate_sentences() {
        let text = "Chapter one covers the early history\n  \t\nThe second chapter covers modern systems\r\n\r\nA third part covers future work";
        let sentences = RuleSegmenter.segment(text);
        let texts: Vec<&str> = sentences.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "Chapter one covers the early history",
                "The second chapter covers modern systems",
                "A third part covers future work",
            ]
        );
    }

    #[test]
    fn decimals_do_not_split() {
        let sentences = RuleSegmenter.segment("The rate rose to 3.5 percent last year.");
        assert_eq!(sentences.len(), 1);
    }

    #[test]
    fn empty_text() {
        assert!(RuleSegmenter.segment("   \n\n ").is_empty());
    }
}
