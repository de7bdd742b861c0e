mod intent;
mod mode_vm;
mod progress_vm;
mod question_vm;

pub use intent::StudyIntent;
pub use mode_vm::{ModeCardVm, map_mode_cards};
pub use progress_vm::{ProgressRowVm, ProgressVm, map_progress};
pub use question_vm::{FeedbackVm, QuestionCardVm, map_question_cards};
