use std::sync::Arc;

use study_core::model::{Feedback, ModuleProgress, Question, QuestionId};

use crate::api::StudyApi;
use crate::error::SubmitError;
use crate::sessions::SessionStore;

/// Result of one accepted submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub feedback: Feedback,
    pub passed: bool,
    /// The mode's progress after this submission was counted.
    pub progress: ModuleProgress,
}

/// Sends stored answers for scoring and records the result.
#[derive(Clone)]
pub struct AnswerService {
    api: Arc<dyn StudyApi>,
}

impl AnswerService {
    #[must_use]
    pub fn new(api: Arc<dyn StudyApi>) -> Self {
        Self { api }
    }

    /// Validate the answer stored for `id` and count it toward `id`'s mode.
    ///
    /// Edits queued before the call are applied first, so the answer sent is
    /// the latest one typed.
    ///
    /// # Errors
    ///
    /// Returns `SubmitError::EmptyAnswer` without contacting the server when
    /// the stored answer is missing or blank.
    /// Returns `SubmitError::Api` when validation fails; the store is unchanged.
    pub async fn submit(
        &self,
        store: &SessionStore,
        question: &Question,
        id: &QuestionId,
    ) -> Result<SubmissionOutcome, SubmitError> {
        let answer = store
            .answer_settled(id)
            .await
            .filter(|answer| !answer.trim().is_empty())
            .ok_or(SubmitError::EmptyAnswer)?;

        let feedback = self
            .api
            .validate_answer(&question.question, &question.context, &answer)
            .await
            .map_err(|err| {
                log::warn!("validation of {id} failed: {err}");
                err
            })?;

        let progress = store.record_submission(id, feedback.clone()).await?;
        log::info!("{id} scored {}", feedback.score);
        Ok(SubmissionOutcome {
            passed: feedback.is_passing(),
            feedback,
            progress,
        })
    }
}
