use study_core::model::{QuestionId, StudyMode};

/// User actions raised by the study screen's child components.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StudyIntent {
    SelectMode(StudyMode),
    Back,
    EditAnswer(QuestionId, String),
    ToggleHint(QuestionId),
    Submit(QuestionId),
    ResetMode(StudyMode),
    ResetAll,
}
