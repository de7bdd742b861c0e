mod support;

use std::sync::Arc;

use services::{
    AnswerService, AppConfig, AppServices, ApiError, ProgressOverview, SessionPolicy,
    SessionStore, StudyViewController, StudyViewEvent, SubmitError, shortcut_event,
};
use storage::repository::{InMemoryRepository, KeyValueStore, Storage};
use study_core::model::{SessionKey, SessionSnapshot, StudyMode};
use study_core::time::fixed_clock;
use support::{FakeApi, GatedStore, feedback, question_set};

async fn open_store(repo: &InMemoryRepository) -> SessionStore {
    SessionStore::open(
        Arc::new(repo.clone()),
        SessionKey::named("flow"),
        fixed_clock(),
    )
    .await
}

#[tokio::test]
async fn passing_answer_counts_as_completed() {
    let repo = InMemoryRepository::new();
    let store = open_store(&repo).await;
    let api = Arc::new(FakeApi::default());
    api.push_validation(Ok(feedback(92, "Spot on.")));
    let answers = AnswerService::new(api.clone());

    let set = question_set();
    let (id, question) = set.identified(StudyMode::QuickReview).next().unwrap();
    store.set_answer(&id, "Paris").await;

    let outcome = answers.submit(&store, question, &id).await.unwrap();

    assert!(outcome.passed);
    assert_eq!(outcome.progress.attempted, 1);
    assert_eq!(outcome.progress.completed, 1);
    assert_eq!(outcome.progress.total_score, 92);
    assert_eq!(api.last_answer().as_deref(), Some("Paris"));
    assert_eq!(store.questions_answered(), 1);
    assert_eq!(store.feedback(&id).unwrap().score.value(), 92);
}

#[tokio::test(flavor = "current_thread")]
async fn submit_sends_the_latest_edit_while_writes_are_pending() {
    let gated = Arc::new(GatedStore::new());
    let store = Arc::new(
        SessionStore::open(gated.clone(), SessionKey::named("flow"), fixed_clock()).await,
    );
    let api = Arc::new(FakeApi::default());
    api.push_validation(Ok(feedback(90, "Good.")));
    let answers = AnswerService::new(api.clone());

    let set = question_set();
    let (id, question) = set.identified(StudyMode::QuickReview).next().unwrap();
    let question = question.clone();

    let mut edits = Vec::new();
    for text in ["Par", "Paris"] {
        let (store, id) = (store.clone(), id.clone());
        edits.push(tokio::spawn(async move { store.set_answer(&id, text).await }));
        tokio::task::yield_now().await;
    }
    let submit = tokio::spawn({
        let (store, id) = (store.clone(), id.clone());
        async move { answers.submit(&store, &question, &id).await }
    });
    tokio::task::yield_now().await;
    assert_eq!(api.validate_calls(), 0);

    gated.release();
    for edit in edits {
        edit.await.unwrap();
    }
    let outcome = submit.await.unwrap().unwrap();

    assert_eq!(api.last_answer().as_deref(), Some("Paris"));
    assert_eq!(outcome.progress.attempted, 1);
    assert_eq!(store.answer(&id).as_deref(), Some("Paris"));
}

#[tokio::test]
async fn resubmission_accumulates_and_keeps_latest_feedback() {
    let repo = InMemoryRepository::new();
    let store = open_store(&repo).await;
    let api = Arc::new(FakeApi::default());
    api.push_validation(Ok(feedback(60, "Partly right.")));
    api.push_validation(Ok(feedback(85, "Much better.")));
    let answers = AnswerService::new(api.clone());

    let set = question_set();
    let (id, question) = set.identified(StudyMode::DeepStudy).next().unwrap();

    store.set_answer(&id, "Because of trade").await;
    let first = answers.submit(&store, question, &id).await.unwrap();
    assert!(!first.passed);

    store.set_answer(&id, "Because of trade and the river").await;
    let second = answers.submit(&store, question, &id).await.unwrap();

    let progress = store.progress(StudyMode::DeepStudy);
    assert_eq!(progress.attempted, 2);
    assert_eq!(progress.completed, 1);
    assert_eq!(progress.total_score, 145);
    assert_eq!(second.progress, progress);
    assert_eq!(store.feedback(&id).unwrap().score.value(), 85);
    assert_eq!(store.questions_answered(), 2);
}

#[tokio::test]
async fn blank_answer_is_rejected_before_any_call() {
    let repo = InMemoryRepository::new();
    let store = open_store(&repo).await;
    let api = Arc::new(FakeApi::default());
    let answers = AnswerService::new(api.clone());

    let set = question_set();
    let (id, question) = set.identified(StudyMode::TestPrep).next().unwrap();

    let err = answers.submit(&store, question, &id).await.unwrap_err();
    assert!(matches!(err, SubmitError::EmptyAnswer));

    store.set_answer(&id, "   \n").await;
    let err = answers.submit(&store, question, &id).await.unwrap_err();
    assert!(matches!(err, SubmitError::EmptyAnswer));
    assert_eq!(api.validate_calls(), 0);
}

#[tokio::test]
async fn failed_validation_leaves_store_untouched() {
    let repo = InMemoryRepository::new();
    let store = open_store(&repo).await;
    let api = Arc::new(FakeApi::default());
    api.push_validation(Err(ApiError::RateLimited));
    let answers = AnswerService::new(api.clone());

    let set = question_set();
    let (id, question) = set.identified(StudyMode::Revision).next().unwrap();
    store.set_answer(&id, "Paris").await;
    let before = store.snapshot();

    let err = answers.submit(&store, question, &id).await.unwrap_err();

    assert_eq!(err.to_string(), "Failed to validate answer. Please try again.");
    assert!(matches!(err, SubmitError::Api(ApiError::RateLimited)));
    assert_eq!(store.snapshot(), before);
}

#[tokio::test]
async fn reentering_a_mode_starts_fresh_but_keeps_progress() {
    let repo = InMemoryRepository::new();
    let store = open_store(&repo).await;
    let api = Arc::new(FakeApi::default());
    api.push_validation(Ok(feedback(90, "Great.")));
    let answers = AnswerService::new(api.clone());
    let set = question_set();
    let mut view = StudyViewController::new();

    let (quick_id, quick_q) = set.identified(StudyMode::QuickReview).next().unwrap();
    let (deep_id, _) = set.identified(StudyMode::DeepStudy).next().unwrap();
    store.set_answer(&deep_id, "draft").await;

    view.mount(&store).await;
    let event = shortcut_event("q", true, false).unwrap();
    view.dispatch(&store, event).await;
    store.set_answer(&quick_id, "Paris").await;
    answers.submit(&store, quick_q, &quick_id).await.unwrap();

    view.dispatch(&store, StudyViewEvent::Shortcut(StudyMode::DeepStudy))
        .await;
    assert_eq!(store.answer(&deep_id), None);
    assert_eq!(store.answer(&quick_id).as_deref(), Some("Paris"));

    view.dispatch(&store, StudyViewEvent::SelectMode(StudyMode::QuickReview))
        .await;
    assert_eq!(store.answer(&quick_id), None);
    assert_eq!(store.feedback(&quick_id), None);
    assert_eq!(store.progress(StudyMode::QuickReview).completed, 1);
}

#[tokio::test]
async fn snapshot_survives_restart_under_same_key() {
    let repo = InMemoryRepository::new();
    let set = question_set();
    let (id, _) = set.identified(StudyMode::Revision).next().unwrap();
    {
        let store = open_store(&repo).await;
        store.set_answer(&id, "Paris").await;
        store.toggle_hint(&id).await;
        store.set_current_mode(Some(StudyMode::Revision)).await;
    }

    let raw = repo.get("brainifi_session_flow").await.unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["currentMode"], "REVISION");
    assert_eq!(value["hintsShown"][0], "knowledge_REVISION_0");
    assert_eq!(value["progressByMode"]["TEST_PREP"]["totalScore"], 0);

    let store = open_store(&repo).await;
    assert_eq!(store.answer(&id).as_deref(), Some("Paris"));
    assert!(store.is_hint_shown(&id));

    let mut view = StudyViewController::new();
    view.mount(&store).await;
    assert_eq!(store.current_mode(), None);
}

#[tokio::test]
async fn overview_tracks_submissions() {
    let repo = InMemoryRepository::new();
    let store = open_store(&repo).await;
    let api = Arc::new(FakeApi::default());
    for score in [80, 95, 100] {
        api.push_validation(Ok(feedback(score, "ok")));
    }
    let answers = AnswerService::new(api.clone());
    let set = question_set();
    let (id, question) = set.identified(StudyMode::QuickReview).next().unwrap();

    for _ in 0..3 {
        store.set_answer(&id, "Paris").await;
        answers.submit(&store, question, &id).await.unwrap();
    }

    let overview = ProgressOverview::from_snapshot(&store.snapshot());
    let quick = overview.row(StudyMode::QuickReview).unwrap();
    assert!(quick.is_complete);
    assert_eq!(quick.average_score, 92);
    assert_eq!(overview.questions_answered, 3);
    assert!(!overview.all_complete());
}

#[tokio::test]
async fn app_services_share_one_store() {
    let storage = Storage::in_memory();
    let mut config = AppConfig::default();
    config.session = SessionPolicy::Named("shared".into());
    let api = Arc::new(FakeApi::default());
    api.push_upload(Ok(question_set()));

    let services = AppServices::with_api(&config, &storage, fixed_clock(), api.clone()).await;
    services
        .uploads()
        .upload_bytes("notes.pdf", support::pdf_bytes())
        .await
        .unwrap();
    services.store().set_current_mode(Some(StudyMode::TestPrep)).await;

    assert_eq!(services.store().key().as_str(), "brainifi_session_shared");
    assert!(services.uploads().current().is_some());
    let keys = storage.session_keys().await.unwrap();
    assert_eq!(keys.len(), 1);

    let raw = storage.kv.get("brainifi_session_shared").await.unwrap().unwrap();
    let snapshot = SessionSnapshot::from_json(&raw).unwrap();
    assert_eq!(snapshot.current_mode, Some(StudyMode::TestPrep));
}
