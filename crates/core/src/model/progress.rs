use serde::{Deserialize, Serialize};

use crate::model::{Score, StudyMode};

/// Scores at or above this count a submission as completed.
pub const PASSING_SCORE: u8 = 80;

/// Aggregate stats for one study mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleProgress {
    pub attempted: u32,
    pub completed: u32,
    pub total_score: u32,
}

impl ModuleProgress {
    /// Record one accepted submission.
    ///
    /// Not idempotent: callers record each submission exactly once.
    pub fn record(&mut self, score: Score) {
        self.attempted = self.attempted.saturating_add(1);
        if score.value() >= PASSING_SCORE {
            self.completed = self.completed.saturating_add(1);
        }
        self.total_score = self.total_score.saturating_add(u32::from(score.value()));
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Rounded mean score, 0 when nothing has been attempted.
    #[must_use]
    pub fn average_score(&self) -> u32 {
        if self.attempted == 0 {
            return 0;
        }
        let attempted = u64::from(self.attempted);
        let rounded = (u64::from(self.total_score) + attempted / 2) / attempted;
        u32::try_from(rounded).unwrap_or(u32::MAX)
    }

    /// True when some sequence of `record` calls could have produced these counters.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.completed <= self.attempted
            && u64::from(self.total_score) <= u64::from(self.attempted) * 100
    }
}

/// One `ModuleProgress` per study mode; every mode always has an entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressByMode {
    #[serde(rename = "QUICK_REVIEW")]
    quick_review: ModuleProgress,
    #[serde(rename = "DEEP_STUDY")]
    deep_study: ModuleProgress,
    #[serde(rename = "REVISION")]
    revision: ModuleProgress,
    #[serde(rename = "TEST_PREP")]
    test_prep: ModuleProgress,
}

impl ProgressByMode {
    #[must_use]
    pub fn get(&self, mode: StudyMode) -> &ModuleProgress {
        match mode {
            StudyMode::QuickReview => &self.quick_review,
            StudyMode::DeepStudy => &self.deep_study,
            StudyMode::Revision => &self.revision,
            StudyMode::TestPrep => &self.test_prep,
        }
    }

    pub fn get_mut(&mut self, mode: StudyMode) -> &mut ModuleProgress {
        match mode {
            StudyMode::QuickReview => &mut self.quick_review,
            StudyMode::DeepStudy => &mut self.deep_study,
            StudyMode::Revision => &mut self.revision,
            StudyMode::TestPrep => &mut self.test_prep,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (StudyMode, &ModuleProgress)> {
        StudyMode::ALL.into_iter().map(|mode| (mode, self.get(mode)))
    }

    pub fn reset_all(&mut self) {
        *self = Self::default();
    }
}
