use std::sync::Arc;

use services::{AnswerService, Clock, SessionStore, UploadService};

pub trait UiApp: Send + Sync {
    fn clock(&self) -> Clock;

    fn store(&self) -> Arc<SessionStore>;
    fn uploads(&self) -> Arc<UploadService>;
    fn answers(&self) -> Arc<AnswerService>;
}

#[derive(Clone)]
pub struct AppContext {
    clock: Clock,
    store: Arc<SessionStore>,
    uploads: Arc<UploadService>,
    answers: Arc<AnswerService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            clock: app.clock(),
            store: app.store(),
            uploads: app.uploads(),
            answers: app.answers(),
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

// Provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
