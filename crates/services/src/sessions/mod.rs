mod controller;
mod overview;
mod store;
mod timer;

// Public API of the session subsystem.
pub use controller::{ModeChange, StudyViewController, StudyViewEvent, StudyViewState, shortcut_event};
pub use overview::{ModeProgressRow, ProgressOverview};
pub use store::{PersistenceStatus, SessionStore};
pub use timer::{StudyTimer, format_elapsed};
