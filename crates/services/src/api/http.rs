use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};

use study_core::model::{Feedback, PdfDocument, QuestionSet};

use super::StudyApi;
use super::wire::{
    ValidateRequest, parse_feedback_body, parse_upload_body, upload_failure, validate_failure,
};
use crate::config::AppConfig;
use crate::error::ApiError;

/// `StudyApi` over HTTP with a per-request timeout.
#[derive(Clone)]
pub struct HttpStudyApi {
    client: Client,
    base_url: String,
}

impl HttpStudyApi {
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Http)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// # Errors
    ///
    /// Returns `ApiError::Http` if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        Self::new(&config.api_base_url, config.request_timeout)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }
}

#[async_trait]
impl StudyApi for HttpStudyApi {
    async fn upload_document(&self, document: &PdfDocument) -> Result<QuestionSet, ApiError> {
        let url = self.endpoint("upload");
        log::info!(
            "uploading {} ({} bytes) to {url}",
            document.file_name(),
            document.len()
        );

        let part = Part::bytes(document.bytes().to_vec())
            .file_name(document.file_name().to_string())
            .mime_str("application/pdf")
            .map_err(ApiError::Http)?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        let status = response.status();
        let body = response.text().await.map_err(ApiError::from_transport)?;
        if !status.is_success() {
            log::warn!("upload failed with {status}: {body}");
            return Err(upload_failure(status, &body));
        }

        parse_upload_body(&body)
    }

    async fn validate_answer(
        &self,
        question: &str,
        context: &str,
        answer: &str,
    ) -> Result<Feedback, ApiError> {
        let payload = ValidateRequest {
            question,
            context,
            answer,
        };

        let response = self
            .client
            .post(self.endpoint("validate"))
            .json(&payload)
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("answer validation failed with {status}");
            return Err(validate_failure(status));
        }

        let body = response.text().await.map_err(ApiError::from_transport)?;
        parse_feedback_body(&body)
    }
}
