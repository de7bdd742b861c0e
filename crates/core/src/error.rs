use thiserror::Error;

use crate::model::{DocumentError, ParseQuestionIdError, ScoreError, SnapshotError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    QuestionId(#[from] ParseQuestionIdError),
    #[error(transparent)]
    Score(#[from] ScoreError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}
