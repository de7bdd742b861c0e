use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::answer_service::AnswerService;
use crate::api::{HttpStudyApi, StudyApi};
use crate::config::AppConfig;
use crate::error::AppServicesError;
use crate::sessions::SessionStore;
use crate::upload_service::UploadService;

/// Assembles the session store and the app-facing services.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    store: Arc<SessionStore>,
    uploads: Arc<UploadService>,
    answers: Arc<AnswerService>,
}

impl AppServices {
    /// Build services talking to the HTTP API from `config`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Api` if the HTTP client cannot be built.
    pub async fn open(
        config: &AppConfig,
        storage: &Storage,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let api: Arc<dyn StudyApi> = Arc::new(HttpStudyApi::from_config(config)?);
        log::info!("using study API at {}", config.api_base_url);
        Ok(Self::with_api(config, storage, clock, api).await)
    }

    /// Like `open`, with the API implementation injected.
    pub async fn with_api(
        config: &AppConfig,
        storage: &Storage,
        clock: Clock,
        api: Arc<dyn StudyApi>,
    ) -> Self {
        let key = config.session.session_key(&clock);
        let store = Arc::new(SessionStore::open(Arc::clone(&storage.kv), key, clock).await);
        Self {
            clock,
            store,
            uploads: Arc::new(UploadService::new(Arc::clone(&api))),
            answers: Arc::new(AnswerService::new(api)),
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn store(&self) -> Arc<SessionStore> {
        Arc::clone(&self.store)
    }

    #[must_use]
    pub fn uploads(&self) -> Arc<UploadService> {
        Arc::clone(&self.uploads)
    }

    #[must_use]
    pub fn answers(&self) -> Arc<AnswerService> {
        Arc::clone(&self.answers)
    }
}
