use std::sync::{Arc, PoisonError, RwLock};

use study_core::model::{PdfDocument, QuestionSet, StudyMode};

use crate::api::StudyApi;
use crate::error::UploadError;

/// Turns a PDF into the current question set.
#[derive(Clone)]
pub struct UploadService {
    api: Arc<dyn StudyApi>,
    current: Arc<RwLock<Option<Arc<QuestionSet>>>>,
}

impl UploadService {
    #[must_use]
    pub fn new(api: Arc<dyn StudyApi>) -> Self {
        Self {
            api,
            current: Arc::new(RwLock::new(None)),
        }
    }

    /// Validate `file_name`/`bytes` and upload them.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::Document` without contacting the server when the
    /// file is empty, too large or not a PDF.
    /// Returns `UploadError::Api` when generation fails.
    pub async fn upload_bytes(
        &self,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Arc<QuestionSet>, UploadError> {
        let document = PdfDocument::new(file_name, bytes)?;
        self.upload(&document).await
    }

    /// Generate questions for `document` and make them current.
    ///
    /// The current question set only changes on success.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::Api` when generation fails.
    pub async fn upload(&self, document: &PdfDocument) -> Result<Arc<QuestionSet>, UploadError> {
        let questions = Arc::new(self.api.upload_document(document).await?);
        log::info!(
            "received {} questions from {}: {}",
            questions.total(),
            document.file_name(),
            StudyMode::ALL
                .iter()
                .map(|mode| format!("{mode}={}", questions.count(*mode)))
                .collect::<Vec<_>>()
                .join(", ")
        );

        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&questions));
        Ok(questions)
    }

    /// The question set from the last successful upload.
    #[must_use]
    pub fn current(&self) -> Option<Arc<QuestionSet>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Forget the current question set, returning to the upload screen.
    pub fn clear(&self) {
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }
}
