mod document;
mod feedback;
mod ids;
mod mode;
mod progress;
mod question;
mod snapshot;

pub use document::{DocumentError, MAX_DOCUMENT_BYTES, PdfDocument};
pub use feedback::{Feedback, Score, ScoreError};
pub use ids::{ParseQuestionIdError, QuestionId, SESSION_KEY_PREFIX, SessionKey};
pub use mode::{ModeMeta, ParseStudyModeError, StudyMode};
pub use progress::{ModuleProgress, PASSING_SCORE, ProgressByMode};
pub use question::{Difficulty, Question, QuestionSet};
pub use snapshot::{SessionSnapshot, SnapshotError};
