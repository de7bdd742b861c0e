use services::ProgressOverview;
use study_core::model::StudyMode;

/// One card in the mode selection grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModeCardVm {
    pub mode: StudyMode,
    pub title: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    /// e.g. `Ctrl+Q`.
    pub shortcut_label: String,
    pub question_count: usize,
    pub completed: u32,
    pub target: u32,
    pub is_complete: bool,
}

#[must_use]
pub fn map_mode_cards(
    overview: &ProgressOverview,
    question_count: impl Fn(StudyMode) -> usize,
) -> Vec<ModeCardVm> {
    StudyMode::ALL
        .into_iter()
        .map(|mode| {
            let meta = mode.meta();
            let row = overview.row(mode);
            ModeCardVm {
                mode,
                title: meta.title,
                icon: meta.icon,
                description: meta.description,
                shortcut_label: format!("Ctrl+{}", meta.shortcut.to_ascii_uppercase()),
                question_count: question_count(mode),
                completed: row.map_or(0, |row| row.completed),
                target: meta.target_questions,
                is_complete: row.is_some_and(|row| row.is_complete),
            }
        })
        .collect()
}
