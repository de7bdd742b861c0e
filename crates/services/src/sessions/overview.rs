use study_core::model::{SessionSnapshot, StudyMode};

/// Display numbers for one mode in the progress tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeProgressRow {
    pub mode: StudyMode,
    pub attempted: u32,
    pub completed: u32,
    pub target: u32,
    /// Rounded mean score, 0 when nothing has been attempted.
    pub average_score: u32,
    pub is_complete: bool,
}

/// Progress tracker and stats panel figures derived from a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressOverview {
    pub rows: Vec<ModeProgressRow>,
    pub completed_total: u32,
    pub target_total: u32,
    /// Share of targets met, capped at 100.
    pub overall_percent: u32,
    pub average_score: u32,
    pub questions_answered: u32,
}

impl ProgressOverview {
    #[must_use]
    pub fn from_snapshot(snapshot: &SessionSnapshot) -> Self {
        let rows: Vec<ModeProgressRow> = StudyMode::ALL
            .into_iter()
            .map(|mode| {
                let progress = snapshot.progress_by_mode.get(mode);
                let target = mode.meta().target_questions;
                ModeProgressRow {
                    mode,
                    attempted: progress.attempted,
                    completed: progress.completed,
                    target,
                    average_score: progress.average_score(),
                    is_complete: progress.completed >= target,
                }
            })
            .collect();

        let completed_total: u32 = rows.iter().map(|row| row.completed).sum();
        let target_total: u32 = rows.iter().map(|row| row.target).sum();
        let overall_percent = if target_total == 0 {
            0
        } else {
            (u64::from(completed_total) * 100 / u64::from(target_total)).min(100) as u32
        };

        let (attempted, score_sum) = snapshot
            .progress_by_mode
            .iter()
            .fold((0_u64, 0_u64), |(attempted, sum), (_, progress)| {
                (
                    attempted + u64::from(progress.attempted),
                    sum + u64::from(progress.total_score),
                )
            });
        let average_score = if attempted == 0 {
            0
        } else {
            ((score_sum + attempted / 2) / attempted) as u32
        };

        Self {
            rows,
            completed_total,
            target_total,
            overall_percent,
            average_score,
            questions_answered: snapshot.questions_answered,
        }
    }

    #[must_use]
    pub fn row(&self, mode: StudyMode) -> Option<&ModeProgressRow> {
        self.rows.iter().find(|row| row.mode == mode)
    }

    /// Every mode has met its own target; surplus in one mode does not count.
    #[must_use]
    pub fn all_complete(&self) -> bool {
        self.rows.iter().all(|row| row.is_complete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use study_core::model::Score;

    fn snapshot_with(scores: &[(StudyMode, u8)]) -> SessionSnapshot {
        let mut snapshot = SessionSnapshot::default();
        for (mode, value) in scores {
            snapshot
                .progress_by_mode
                .get_mut(*mode)
                .record(Score::new(*value).unwrap());
        }
        snapshot
    }

    #[test]
    fn empty_snapshot_has_zeroes() {
        let overview = ProgressOverview::from_snapshot(&SessionSnapshot::default());
        assert_eq!(overview.target_total, 18);
        assert_eq!(overview.overall_percent, 0);
        assert_eq!(overview.average_score, 0);
        assert!(!overview.all_complete());
        assert!(overview.rows.iter().all(|row| !row.is_complete));
    }

    #[test]
    fn rows_round_average_and_flag_completion() {
        let overview = ProgressOverview::from_snapshot(&snapshot_with(&[
            (StudyMode::QuickReview, 80),
            (StudyMode::QuickReview, 85),
            (StudyMode::QuickReview, 90),
            (StudyMode::DeepStudy, 60),
            (StudyMode::DeepStudy, 85),
        ]));

        let quick = overview.row(StudyMode::QuickReview).unwrap();
        assert_eq!(quick.target, 3);
        assert!(quick.is_complete);
        assert_eq!(quick.average_score, 85);

        let deep = overview.row(StudyMode::DeepStudy).unwrap();
        assert_eq!((deep.attempted, deep.completed), (2, 1));
        // 145 / 2 = 72.5 rounds up.
        assert_eq!(deep.average_score, 73);
        assert!(!deep.is_complete);

        assert_eq!(overview.completed_total, 4);
        assert_eq!(overview.overall_percent, 22);
        assert_eq!(overview.average_score, 80);
    }

    #[test]
    fn overall_percent_caps_at_one_hundred() {
        let mut scores = Vec::new();
        for mode in StudyMode::ALL {
            for _ in 0..8 {
                scores.push((mode, 100));
            }
        }
        let overview = ProgressOverview::from_snapshot(&snapshot_with(&scores));
        assert_eq!(overview.completed_total, 32);
        assert_eq!(overview.overall_percent, 100);
        assert!(overview.all_complete());
    }

    #[test]
    fn surplus_in_one_mode_is_not_all_complete() {
        let scores: Vec<_> = (0..20).map(|_| (StudyMode::Revision, 95)).collect();
        let overview = ProgressOverview::from_snapshot(&snapshot_with(&scores));
        assert_eq!(overview.overall_percent, 100);
        assert!(!overview.all_complete());
    }
}
