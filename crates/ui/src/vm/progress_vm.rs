use services::{ModeProgressRow, ProgressOverview};
use study_core::model::StudyMode;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressRowVm {
    pub mode: StudyMode,
    pub title: &'static str,
    pub average_label: String,
    pub count_label: String,
    pub is_complete: bool,
    pub is_current: bool,
}

impl ProgressRowVm {
    #[must_use]
    pub fn row_class(&self) -> &'static str {
        if self.is_current {
            "progress-row current"
        } else if self.is_complete {
            "progress-row complete"
        } else {
            "progress-row"
        }
    }
}

/// Progress tracker panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressVm {
    pub rows: Vec<ProgressRowVm>,
    pub overall_percent: u32,
    pub overall_label: String,
    pub stats_label: String,
    pub all_complete: bool,
}

fn map_row(row: &ModeProgressRow, current: Option<StudyMode>) -> ProgressRowVm {
    ProgressRowVm {
        mode: row.mode,
        title: row.mode.title(),
        average_label: format!("Avg. Score: {}%", row.average_score),
        count_label: format!("{}/{}", row.completed, row.target),
        is_complete: row.is_complete,
        is_current: current == Some(row.mode),
    }
}

#[must_use]
pub fn map_progress(overview: &ProgressOverview, current: Option<StudyMode>) -> ProgressVm {
    ProgressVm {
        rows: overview.rows.iter().map(|row| map_row(row, current)).collect(),
        overall_percent: overview.overall_percent,
        overall_label: format!(
            "{} of {} targets met ({}%)",
            overview.completed_total, overview.target_total, overview.overall_percent
        ),
        stats_label: format!(
            "Questions answered: {} · Avg. score: {}%",
            overview.questions_answered, overview.average_score
        ),
        all_complete: overview.all_complete(),
    }
}
