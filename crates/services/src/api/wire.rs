use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use study_core::model::{Feedback, QuestionSet};

use crate::error::ApiError;

#[derive(Debug, Serialize)]
pub(super) struct ValidateRequest<'a> {
    pub question: &'a str,
    pub context: &'a str,
    pub answer: &'a str,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    questions: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

pub(super) fn parse_upload_body(body: &str) -> Result<QuestionSet, ApiError> {
    let response: UploadResponse = serde_json::from_str(body).map_err(|err| {
        ApiError::MalformedResponse(format!("Unreadable response from server: {err}"))
    })?;
    let questions = response
        .questions
        .ok_or_else(|| ApiError::MalformedResponse("No questions received from server".into()))?;
    serde_json::from_value(questions).map_err(|err| {
        log::warn!("rejecting question payload: {err}");
        ApiError::MalformedResponse("Invalid questions structure received from server".into())
    })
}

pub(super) fn parse_feedback_body(body: &str) -> Result<Feedback, ApiError> {
    serde_json::from_str(body)
        .map_err(|err| ApiError::MalformedResponse(format!("Invalid feedback from server: {err}")))
}

/// Error for a non-2xx upload: the server's `detail` when present, else the raw body.
pub(super) fn upload_failure(status: StatusCode, body: &str) -> ApiError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return ApiError::RateLimited;
    }
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.detail)
        .map(|detail| match detail {
            serde_json::Value::String(text) => text,
            other => other.to_string(),
        })
        .or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        });
    match detail {
        Some(detail) => ApiError::Server { status, detail },
        None => ApiError::HttpStatus(status),
    }
}

pub(super) fn validate_failure(status: StatusCode) -> ApiError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        ApiError::RateLimited
    } else {
        ApiError::HttpStatus(status)
    }
}
