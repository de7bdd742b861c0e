//! Shared error types for the services crate.

use reqwest::StatusCode;
use thiserror::Error;

use storage::sqlite::SqliteInitError;
use study_core::model::{DocumentError, QuestionId};

/// Errors from the remote generation and validation endpoints.
///
/// The `Display` text is what the UI shows to the learner.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("Hmm, can't reach the server. Mind checking your connection?")]
    Unreachable(#[source] reqwest::Error),
    #[error("The server took too long to respond. Please try again.")]
    Timeout,
    #[error("Whoa there, speedster! Let's take a quick breather.")]
    RateLimited,
    /// Non-2xx response that carried an explanation.
    #[error("{detail}")]
    Server { status: StatusCode, detail: String },
    #[error("HTTP error! status: {0}")]
    HttpStatus(StatusCode),
    #[error("{0}")]
    MalformedResponse(String),
    #[error(transparent)]
    Http(reqwest::Error),
}

impl ApiError {
    /// Sort a transport error into the friendly buckets.
    #[must_use]
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Unreachable(err)
        } else if err.is_decode() {
            Self::MalformedResponse(err.to_string())
        } else {
            Self::Http(err)
        }
    }

    /// Whether submitting the same request again may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::MalformedResponse(_))
    }
}

/// Errors emitted by `UploadService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum UploadError {
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `SessionStore` mutations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionStoreError {
    #[error("no answer stored for {0}")]
    MissingAnswer(QuestionId),
}

/// Errors emitted by `AnswerService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SubmitError {
    #[error("Write an answer before checking it.")]
    EmptyAnswer,
    #[error("Failed to validate answer. Please try again.")]
    Api(#[from] ApiError),
    #[error(transparent)]
    Store(#[from] SessionStoreError),
}

/// Errors from reading configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid API base URL: {raw}")]
    InvalidApiUrl { raw: String },
    #[error("invalid request timeout (seconds): {raw}")]
    InvalidTimeout { raw: String },
    #[error("session name must not be empty")]
    EmptySessionName,
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
