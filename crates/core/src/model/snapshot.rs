use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

use crate::model::{Feedback, ModuleProgress, ProgressByMode, QuestionId, StudyMode};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SnapshotError {
    #[error("malformed session snapshot: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("inconsistent progress for {mode}: {progress:?}")]
    InconsistentProgress {
        mode: StudyMode,
        progress: ModuleProgress,
    },
    #[error("feedback stored for {0} without an answer")]
    FeedbackWithoutAnswer(QuestionId),
}

/// Full serializable state of one study session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub questions_answered: u32,
    pub answers: BTreeMap<QuestionId, String>,
    pub feedback: BTreeMap<QuestionId, Feedback>,
    pub hints_shown: BTreeSet<QuestionId>,
    pub current_mode: Option<StudyMode>,
    pub progress_by_mode: ProgressByMode,
}

impl SessionSnapshot {
    /// # Errors
    ///
    /// Returns `SnapshotError` if serialization fails.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// # Errors
    ///
    /// Returns `SnapshotError::Malformed` for corrupt or incomplete JSON, and
    /// the `validate` errors for records no session could have written.
    pub fn from_json(raw: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(raw)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check the cross-field invariants serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::InconsistentProgress` when a mode reports more
    /// completions than attempts or more than 100 points per attempt, and
    /// `SnapshotError::FeedbackWithoutAnswer` for feedback with no stored answer.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if let Some((mode, progress)) = self
            .progress_by_mode
            .iter()
            .find(|(_, progress)| !progress.is_consistent())
        {
            return Err(SnapshotError::InconsistentProgress {
                mode,
                progress: *progress,
            });
        }
        if let Some(id) = self.feedback.keys().find(|id| !self.answers.contains_key(*id)) {
            return Err(SnapshotError::FeedbackWithoutAnswer(id.clone()));
        }
        Ok(())
    }

    /// Drop every answer and feedback entry that belongs to `mode`.
    pub fn clear_mode_entries(&mut self, mode: StudyMode) {
        self.answers.retain(|id, _| !id.belongs_to(mode));
        self.feedback.retain(|id, _| !id.belongs_to(mode));
    }
}
