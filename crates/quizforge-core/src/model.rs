//! Core data model types for quizforge.
//!
//! Sentences and entity spans come in from the annotation collaborators;
//! set requests come in from the caller; generated questions and sets go out.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RequestError;

/// One sentence of the source document, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// 0-based position in the document.
    pub index: usize,
    /// Raw sentence text.
    pub text: String,
}

impl Sentence {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }
}

/// Entity labels the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Person,
    Organization,
    Place,
    Date,
    /// Nationalities, religious or political groups.
    Norp,
    Money,
    Percent,
    Time,
    Cardinal,
}

impl EntityType {
    /// Every recognized type, in a stable order.
    pub const ALL: [EntityType; 9] = [
        EntityType::Person,
        EntityType::Organization,
        EntityType::Place,
        EntityType::Date,
        EntityType::Norp,
        EntityType::Money,
        EntityType::Percent,
        EntityType::Time,
        EntityType::Cardinal,
    ];

    /// The semantic bucket this type belongs to.
    pub fn group(self) -> TypeGroup {
        match self {
            EntityType::Person => TypeGroup::People,
            EntityType::Organization => TypeGroup::Organizations,
            EntityType::Place => TypeGroup::Places,
            EntityType::Date
            | EntityType::Money
            | EntityType::Percent
            | EntityType::Time
            | EntityType::Cardinal => TypeGroup::NumericTemporal,
            EntityType::Norp => TypeGroup::Groups,
        }
    }

    /// Conspicuous types that make easy answers.
    pub fn is_prominent(self) -> bool {
        matches!(self, EntityType::Person | EntityType::Organization)
    }

    /// Inconspicuous types that make hard answers.
    pub fn is_subtle(self) -> bool {
        matches!(
            self,
            EntityType::Date
                | EntityType::Money
                | EntityType::Percent
                | EntityType::Time
                | EntityType::Cardinal
                | EntityType::Norp
        )
    }

    /// Conventional upper-case NER label.
    pub fn label(self) -> &'static str {
        match self {
            EntityType::Person => "PERSON",
            EntityType::Organization => "ORG",
            EntityType::Place => "GPE",
            EntityType::Date => "DATE",
            EntityType::Norp => "NORP",
            EntityType::Money => "MONEY",
            EntityType::Percent => "PERCENT",
            EntityType::Time => "TIME",
            EntityType::Cardinal => "CARDINAL",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityType::Person => "person",
            EntityType::Organization => "organization",
            EntityType::Place => "place",
            EntityType::Date => "date",
            EntityType::Norp => "group",
            EntityType::Money => "money",
            EntityType::Percent => "percent",
            EntityType::Time => "time",
            EntityType::Cardinal => "number",
        };
        write!(f, "{name}")
    }
}

impl FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "person" | "per" => Ok(EntityType::Person),
            "org" | "organization" | "organisation" => Ok(EntityType::Organization),
            "gpe" | "loc" | "place" | "location" => Ok(EntityType::Place),
            "date" => Ok(EntityType::Date),
            "norp" | "group" => Ok(EntityType::Norp),
            "money" => Ok(EntityType::Money),
            "percent" => Ok(EntityType::Percent),
            "time" => Ok(EntityType::Time),
            "cardinal" | "number" => Ok(EntityType::Cardinal),
            other => Err(format!("unrecognized entity label: {other}")),
        }
    }
}

/// Coarse buckets of related entity types, used for distractor confusability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeGroup {
    People,
    Organizations,
    Places,
    NumericTemporal,
    Groups,
}

/// A span as reported by an annotator, before its label is interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSpan {
    pub text: String,
    pub label: String,
    pub sentence_index: usize,
}

/// A recognized entity occurrence inside one sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpan {
    /// Literal surface form as it appears in the sentence.
    pub text: String,
    pub entity_type: EntityType,
    pub sentence_index: usize,
}

impl EntitySpan {
    pub fn new(text: impl Into<String>, entity_type: EntityType, sentence_index: usize) -> Self {
        Self {
            text: text.into(),
            entity_type,
            sentence_index,
        }
    }

    /// Interpret a raw span's label; `None` for labels outside the taxonomy.
    pub fn from_raw(raw: RawSpan) -> Option<Self> {
        let entity_type = raw.label.parse().ok()?;
        Some(Self {
            text: raw.text,
            entity_type,
            sentence_index: raw.sentence_index,
        })
    }
}

/// Requested difficulty for a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(RequestError::UnknownDifficulty(other.to_string())),
        }
    }
}

/// Shape of the questions in a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    Mcq,
    TrueFalse,
    FillBlank,
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::Mcq => write!(f, "mcq"),
            QuestionType::TrueFalse => write!(f, "true-false"),
            QuestionType::FillBlank => write!(f, "fill-blank"),
        }
    }
}

impl FromStr for QuestionType {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mcq" | "multiple-choice" | "multiple_choice" => Ok(QuestionType::Mcq),
            "true-false" | "true_false" | "truefalse" | "tf" => Ok(QuestionType::TrueFalse),
            "fill-blank" | "fill_blank" | "fill" | "blank" => Ok(QuestionType::FillBlank),
            other => Err(RequestError::UnknownQuestionType(other.to_string())),
        }
    }
}

/// One caller-requested batch of questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetRequest {
    pub question_count: usize,
    pub difficulty: Difficulty,
    pub question_type: QuestionType,
}

impl SetRequest {
    pub fn new(question_count: usize, difficulty: Difficulty, question_type: QuestionType) -> Self {
        Self {
            question_count,
            difficulty,
            question_type,
        }
    }
}

/// A labelled answer option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub label: String,
    pub text: String,
}

impl Choice {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}

/// A rendered quiz item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedQuestion {
    /// 1-based position within its set.
    pub ordinal: usize,
    pub prompt: String,
    /// Empty for fill-blank questions.
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// Choice label for MCQ and true/false, surface text for fill-blank.
    pub correct_answer: String,
    /// Sentence the question was built from.
    pub sentence_index: usize,
}

impl GeneratedQuestion {
    /// Text of the correct choice, or the answer itself when there are no choices.
    pub fn correct_text(&self) -> &str {
        self.choices
            .iter()
            .find(|c| c.label == self.correct_answer)
            .map(|c| c.text.as_str())
            .unwrap_or(&self.correct_answer)
    }
}

/// One answer-key line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerKeyEntry {
    pub ordinal: usize,
    pub answer: String,
}

/// A finished set of questions with its answer key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedSet {
    /// "Set-A", "Set-B", ...
    pub label: String,
    pub difficulty: Difficulty,
    pub question_type: QuestionType,
    /// How many questions the caller asked for.
    pub requested: usize,
    pub questions: Vec<GeneratedQuestion>,
    pub answer_key: Vec<AnswerKeyEntry>,
}

impl GeneratedSet {
    /// Label for the set at 0-based position `position`.
    pub fn label_for(position: usize) -> String {
        let letter = (b'A' + (position % 26) as u8) as char;
        format!("Set-{letter}")
    }

    /// True when fewer questions were produced than requested.
    pub fn is_partial(&self) -> bool {
        self.questions.len() < self.requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_labels_parse() {
        assert_eq!("PERSON".parse::<EntityType>().unwrap(), EntityType::Person);
        assert_eq!("ORG".parse::<EntityType>().unwrap(), EntityType::Organization);
        assert_eq!("GPE".parse::<EntityType>().unwrap(), EntityType::Place);
        assert_eq!("loc".parse::<EntityType>().unwrap(), EntityType::Place);
        assert_eq!("NORP".parse::<EntityType>().unwrap(), EntityType::Norp);
        assert!("WORK_OF_ART".parse::<EntityType>().is_err());
    }

    #[test]
    fn every_type_has_one_group() {
        for ty in EntityType::ALL {
            let groups = [
                TypeGroup::People,
                TypeGroup::Organizations,
                TypeGroup::Places,
                TypeGroup::NumericTemporal,
                TypeGroup::Groups,
            ];
            assert_eq!(groups.iter().filter(|g| **g == ty.group()).count(), 1);
        }
        assert_eq!(EntityType::Percent.group(), TypeGroup::NumericTemporal);
    }

    #[test]
    fn raw_span_with_unknown_label_is_dropped() {
        let raw = RawSpan {
            text: "Mona Lisa".into(),
            label: "WORK_OF_ART".into(),
            sentence_index: 0,
        };
        assert!(EntitySpan::from_raw(raw).is_none());
    }

    #[test]
    fn difficulty_and_type_parse() {
        assert_eq!("Hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("brutal".parse::<Difficulty>().is_err());
        assert_eq!("tf".parse::<QuestionType>().unwrap(), QuestionType::TrueFalse);
        assert_eq!(
            "fill-blank".parse::<QuestionType>().unwrap(),
            QuestionType::FillBlank
        );
        assert_eq!(QuestionType::TrueFalse.to_string(), "true-false");
    }

    #[test]
    fn set_labels() {
        assert_eq!(GeneratedSet::label_for(0), "Set-A");
        assert_eq!(GeneratedSet::label_for(2), "Set-C");
    }

    #[test]
    fn question_type_serde_uses_kebab_case() {
        let json = serde_json::to_string(&QuestionType::FillBlank).unwrap();
        assert_eq!(json, "\"fill-blank\"");
        let back: QuestionType = serde_json::from_str("\"true-false\"").unwrap();
        assert_eq!(back, QuestionType::TrueFalse);
    }
}
