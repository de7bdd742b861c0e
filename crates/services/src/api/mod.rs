//! Contract and HTTP client for the remote question-generation and answer-validation endpoints.

mod http;
mod wire;

use async_trait::async_trait;

use study_core::model::{Feedback, PdfDocument, QuestionSet};

use crate::error::ApiError;

pub use http::HttpStudyApi;

#[async_trait]
pub trait StudyApi: Send + Sync {
    /// Send a document and receive the generated questions for all four modes.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failures, non-2xx responses, or a response
    /// missing any of the four question lists.
    async fn upload_document(&self, document: &PdfDocument) -> Result<QuestionSet, ApiError>;

    /// Score a free-text answer. Single attempt, no retry.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failures, non-2xx responses, or malformed feedback.
    async fn validate_answer(
        &self,
        question: &str,
        context: &str,
        answer: &str,
    ) -> Result<Feedback, ApiError>;
}
