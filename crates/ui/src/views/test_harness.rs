use std::sync::Arc;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{
    AnswerService, ApiError, Clock, SessionStore, StudyApi, UploadService,
};
use storage::repository::InMemoryRepository;
use study_core::model::{Feedback, PdfDocument, Question, QuestionSet, SessionKey};
use study_core::time::fixed_now;

use crate::context::{UiApp, build_app_context};
use crate::views::{StudyView, UploadView};

/// Returns the same question set for every upload; validation always fails.
struct StaticApi {
    questions: QuestionSet,
}

#[async_trait]
impl StudyApi for StaticApi {
    async fn upload_document(&self, _document: &PdfDocument) -> Result<QuestionSet, ApiError> {
        Ok(self.questions.clone())
    }

    async fn validate_answer(
        &self,
        _question: &str,
        _context: &str,
        _answer: &str,
    ) -> Result<Feedback, ApiError> {
        Err(ApiError::RateLimited)
    }
}

#[derive(Clone)]
pub struct TestApp {
    clock: Clock,
    pub store: Arc<SessionStore>,
    pub uploads: Arc<UploadService>,
    answers: Arc<AnswerService>,
}

impl UiApp for TestApp {
    fn clock(&self) -> Clock {
        self.clock
    }

    fn store(&self) -> Arc<SessionStore> {
        Arc::clone(&self.store)
    }

    fn uploads(&self) -> Arc<UploadService> {
        Arc::clone(&self.uploads)
    }

    fn answers(&self) -> Arc<AnswerService> {
        Arc::clone(&self.answers)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Upload,
    Study,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    match use_context::<ViewKind>() {
        ViewKind::Upload => rsx! { UploadView {} },
        ViewKind::Study => rsx! { StudyView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub app: Arc<TestApp>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn question(text: &str) -> Question {
    Question {
        question: text.to_string(),
        category: "knowledge".to_string(),
        context: "France is a country in Europe.".to_string(),
        difficulty: "medium".to_string(),
        hint: "Think of the Eiffel Tower.".to_string(),
        key_points: vec!["Paris".to_string()],
    }
}

pub fn sample_questions() -> QuestionSet {
    QuestionSet::new(
        vec![question("What is the capital of France?")],
        vec![question("Why is Paris the capital?"), question("Describe the Seine.")],
        vec![question("Recall the capital of France.")],
        vec![],
    )
}

/// Build a harness; `with_questions` uploads the sample set first.
pub async fn setup_view_harness(
    view: ViewKind,
    repo: InMemoryRepository,
    with_questions: bool,
) -> ViewHarness {
    let clock = Clock::fixed(fixed_now());
    let api: Arc<dyn StudyApi> = Arc::new(StaticApi {
        questions: sample_questions(),
    });
    let store = Arc::new(
        SessionStore::open(Arc::new(repo), SessionKey::named("ui"), clock).await,
    );
    let uploads = Arc::new(UploadService::new(Arc::clone(&api)));
    if with_questions {
        uploads
            .upload_bytes("notes.pdf", b"%PDF-1.4 test".to_vec())
            .await
            .expect("seed questions");
    }

    let app = Arc::new(TestApp {
        clock,
        store,
        uploads,
        answers: Arc::new(AnswerService::new(api)),
    });

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app: Arc::clone(&app),
            view,
        },
    );

    ViewHarness { dom, app }
}
