#![forbid(unsafe_code)]

pub mod answer_service;
pub mod api;
pub mod app_services;
pub mod config;
pub mod error;
pub mod sessions;
pub mod upload_service;

pub use study_core::Clock;

pub use answer_service::{AnswerService, SubmissionOutcome};
pub use api::{HttpStudyApi, StudyApi};
pub use app_services::AppServices;
pub use config::{AppConfig, SessionPolicy};
pub use error::{
    ApiError, AppServicesError, ConfigError, SessionStoreError, SubmitError, UploadError,
};
pub use upload_service::UploadService;

pub use sessions::{
    ModeChange, ModeProgressRow, PersistenceStatus, ProgressOverview, SessionStore,
    StudyTimer, StudyViewController, StudyViewEvent, StudyViewState, format_elapsed,
    shortcut_event,
};
