mod mode_grid;
mod progress_panel;
mod question_card;
mod state;
mod study;
mod study_timer;
mod upload;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use mode_grid::ModeGrid;
pub use progress_panel::ProgressPanel;
pub use question_card::QuestionCard;
pub use state::{ViewError, ViewState};
pub use study::StudyView;
pub use study_timer::StudyTimerView;
pub use upload::UploadView;
