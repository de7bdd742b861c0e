use dioxus::prelude::*;
use storage::repository::InMemoryRepository;
use study_core::model::{Feedback, QuestionId, Score, SessionSnapshot, StudyMode};

use super::QuestionCard;
use super::test_harness::{ViewKind, question, setup_view_harness};
use crate::vm::{QuestionCardVm, map_question_cards};

#[tokio::test(flavor = "current_thread")]
async fn upload_view_smoke_renders_form() {
    let mut harness = setup_view_harness(ViewKind::Upload, InMemoryRepository::new(), false).await;

    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Generate questions"), "missing button in {html}");
    assert!(html.contains("upload-path"), "missing path input in {html}");
    assert!(!html.contains("Continue with the current questions"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn upload_view_offers_resume_when_questions_exist() {
    let mut harness = setup_view_harness(ViewKind::Upload, InMemoryRepository::new(), true).await;

    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Continue with the current questions"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn study_view_without_questions_points_to_upload() {
    let mut harness = setup_view_harness(ViewKind::Study, InMemoryRepository::new(), false).await;

    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("No questions yet"), "{html}");
    assert!(html.contains("Upload a PDF"), "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn study_view_smoke_renders_mode_grid_and_progress() {
    let mut harness = setup_view_harness(ViewKind::Study, InMemoryRepository::new(), true).await;

    harness.rebuild();
    let html = harness.render();

    for title in ["Quick Review", "Deep Study", "Revision", "Test Prep"] {
        assert!(html.contains(title), "missing {title} in {html}");
    }
    assert!(html.contains("Ctrl+Q"), "missing shortcut label in {html}");
    assert!(html.contains("2 questions"), "missing deep study count in {html}");
    assert!(html.contains("Overall Progress"), "{html}");
    assert!(html.contains("0/3"), "missing quick review target in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn study_view_mount_discards_restored_mode() {
    let repo = InMemoryRepository::new();
    let mut snapshot = SessionSnapshot::default();
    snapshot.current_mode = Some(StudyMode::Revision);
    snapshot
        .progress_by_mode
        .get_mut(StudyMode::Revision)
        .record(Score::new(90).unwrap());
    storage::repository::KeyValueStore::set(
        &repo,
        "brainifi_session_ui",
        &snapshot.to_json().unwrap(),
    )
    .await
    .unwrap();

    let mut harness = setup_view_harness(ViewKind::Study, repo, true).await;
    assert_eq!(harness.app.store.current_mode(), Some(StudyMode::Revision));

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert_eq!(harness.app.store.current_mode(), None);
    assert!(html.contains("Choose your study mode"), "{html}");
    assert!(html.contains("1/5"), "restored progress missing in {html}");
}

#[derive(Props, Clone, PartialEq)]
struct CardHarnessProps {
    vm: QuestionCardVm,
    error: Option<String>,
}

#[component]
fn CardHarness(props: CardHarnessProps) -> Element {
    rsx! {
        QuestionCard {
            vm: props.vm.clone(),
            submitting: false,
            error: props.error.clone(),
            on_intent: |_| {},
            on_focus_change: |_| {},
        }
    }
}

fn card_vm(hint_shown: bool, feedback: Option<Feedback>) -> QuestionCardVm {
    let set = study_core::model::QuestionSet::new(
        vec![question("What is the capital of France?")],
        vec![],
        vec![],
        vec![],
    );
    let id = QuestionId::new("knowledge", StudyMode::QuickReview, 0);
    let mut snapshot = SessionSnapshot::default();
    snapshot.answers.insert(id.clone(), "Paris".into());
    if hint_shown {
        snapshot.hints_shown.insert(id.clone());
    }
    if let Some(feedback) = feedback {
        snapshot.feedback.insert(id, feedback);
    }
    map_question_cards(&set, StudyMode::QuickReview, &snapshot).remove(0)
}

fn render_card(vm: QuestionCardVm, error: Option<String>) -> String {
    let mut dom = VirtualDom::new_with_props(CardHarness, CardHarnessProps { vm, error });
    dom.rebuild_in_place();
    dioxus_ssr::render(&dom)
}

#[test]
fn question_card_hides_hint_until_toggled() {
    let hidden = render_card(card_vm(false, None), None);
    assert!(hidden.contains("Show hint"), "{hidden}");
    assert!(!hidden.contains("Eiffel Tower"), "{hidden}");

    let shown = render_card(card_vm(true, None), None);
    assert!(shown.contains("Hide hint"), "{shown}");
    assert!(shown.contains("Eiffel Tower"), "{shown}");
    assert!(!shown.contains("Key points"), "{shown}");
}

#[test]
fn question_card_renders_feedback_and_errors() {
    let feedback = Feedback {
        score: Score::new(92).unwrap(),
        feedback: "Spot on.".into(),
        strengths: vec!["Correct city".into()],
        improvements: vec![],
        tip: "Mention the river.".into(),
    };
    let html = render_card(
        card_vm(false, Some(feedback)),
        Some("Failed to validate answer. Please try again.".into()),
    );

    assert!(html.contains("92%"), "{html}");
    assert!(html.contains("score-pass"), "{html}");
    assert!(html.contains("Correct city"), "{html}");
    assert!(html.contains("Tip: Mention the river."), "{html}");
    assert!(html.contains("Failed to validate answer"), "{html}");
    assert!(!html.contains("To improve"), "{html}");
    assert!(html.contains("Key points"), "{html}");
    assert!(html.contains("key-points"), "{html}");
}
