use study_core::model::{Difficulty, Feedback, QuestionId, QuestionSet, SessionSnapshot, StudyMode};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub score: u8,
    pub passed: bool,
    pub summary: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub tip: Option<String>,
}

impl From<&Feedback> for FeedbackVm {
    fn from(feedback: &Feedback) -> Self {
        Self {
            score: feedback.score.value(),
            passed: feedback.is_passing(),
            summary: feedback.feedback.clone(),
            strengths: feedback.strengths.clone(),
            improvements: feedback.improvements.clone(),
            tip: Some(feedback.tip.trim())
                .filter(|tip| !tip.is_empty())
                .map(str::to_string),
        }
    }
}

impl FeedbackVm {
    #[must_use]
    pub fn score_class(&self) -> &'static str {
        if self.passed { "score score-pass" } else { "score score-retry" }
    }
}

/// Everything a question card renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionCardVm {
    pub id: QuestionId,
    /// 1-based position within the mode.
    pub number: usize,
    pub question: String,
    pub category: String,
    pub difficulty: String,
    pub difficulty_class: &'static str,
    pub hint: String,
    pub hint_shown: bool,
    pub key_points: Vec<String>,
    pub answer: String,
    pub feedback: Option<FeedbackVm>,
}

fn difficulty_class(level: Difficulty) -> &'static str {
    match level {
        Difficulty::Easy => "difficulty difficulty-easy",
        Difficulty::Medium => "difficulty difficulty-medium",
        Difficulty::Hard => "difficulty difficulty-hard",
        Difficulty::Unknown => "difficulty",
    }
}

#[must_use]
pub fn map_question_cards(
    questions: &QuestionSet,
    mode: StudyMode,
    snapshot: &SessionSnapshot,
) -> Vec<QuestionCardVm> {
    questions
        .identified(mode)
        .map(|(id, question)| QuestionCardVm {
            number: id.index() + 1,
            question: question.question.clone(),
            category: question.category.clone(),
            difficulty: question.difficulty.clone(),
            difficulty_class: difficulty_class(question.difficulty_level()),
            hint: question.hint.clone(),
            hint_shown: snapshot.hints_shown.contains(&id),
            key_points: question.key_points.clone(),
            answer: snapshot.answers.get(&id).cloned().unwrap_or_default(),
            feedback: snapshot.feedback.get(&id).map(FeedbackVm::from),
            id,
        })
        .collect()
}
