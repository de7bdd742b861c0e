use serde::{Deserialize, Serialize};

use crate::model::{QuestionId, StudyMode};

/// One generated quiz item. Immutable once received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Prompt text shown to the learner.
    pub question: String,
    /// Category tag, e.g. `knowledge` or `analysis`.
    #[serde(rename = "type")]
    pub category: String,
    /// Source passage the question was generated from.
    pub context: String,
    pub difficulty: String,
    pub hint: String,
    #[serde(default)]
    pub key_points: Vec<String>,
}

impl Question {
    /// Identity of this question when shown at `index` in `mode`.
    #[must_use]
    pub fn id(&self, mode: StudyMode, index: usize) -> QuestionId {
        QuestionId::new(self.category.clone(), mode, index)
    }

    #[must_use]
    pub fn difficulty_level(&self) -> Difficulty {
        Difficulty::parse(&self.difficulty)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Unknown,
}

impl Difficulty {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "easy" => Self::Easy,
            "medium" => Self::Medium,
            "hard" => Self::Hard,
            _ => Self::Unknown,
        }
    }
}

/// The four per-mode question lists returned by the generation service.
///
/// Every list is required; a payload missing any of them does not deserialize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSet {
    #[serde(rename = "QUICK_REVIEW")]
    quick_review: Vec<Question>,
    #[serde(rename = "DEEP_STUDY")]
    deep_study: Vec<Question>,
    #[serde(rename = "REVISION")]
    revision: Vec<Question>,
    #[serde(rename = "TEST_PREP")]
    test_prep: Vec<Question>,
}

impl QuestionSet {
    #[must_use]
    pub fn new(
        quick_review: Vec<Question>,
        deep_study: Vec<Question>,
        revision: Vec<Question>,
        test_prep: Vec<Question>,
    ) -> Self {
        Self {
            quick_review,
            deep_study,
            revision,
            test_prep,
        }
    }

    #[must_use]
    pub fn get(&self, mode: StudyMode) -> &[Question] {
        match mode {
            StudyMode::QuickReview => &self.quick_review,
            StudyMode::DeepStudy => &self.deep_study,
            StudyMode::Revision => &self.revision,
            StudyMode::TestPrep => &self.test_prep,
        }
    }

    #[must_use]
    pub fn count(&self, mode: StudyMode) -> usize {
        self.get(mode).len()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        StudyMode::ALL.into_iter().map(|mode| self.count(mode)).sum()
    }

    /// Questions of `mode` paired with their identities, in display order.
    pub fn identified(&self, mode: StudyMode) -> impl Iterator<Item = (QuestionId, &Question)> {
        self.get(mode)
            .iter()
            .enumerate()
            .map(move |(index, question)| (question.id(mode, index), question))
    }
}
