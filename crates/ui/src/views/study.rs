use std::collections::BTreeMap;

use dioxus::document::eval;
use dioxus::prelude::*;
use dioxus_router::Link;

use services::{
    ModeChange, ProgressOverview, StudyViewController, StudyViewEvent, StudyViewState,
    shortcut_event,
};
use study_core::model::QuestionId;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ModeGrid, ProgressPanel, QuestionCard, StudyTimerView};
use crate::vm::{StudyIntent, map_mode_cards, map_progress, map_question_cards};

#[component]
pub fn StudyView() -> Element {
    let ctx = use_context::<AppContext>();
    let store = ctx.store();
    let clock = ctx.clock();
    let questions = ctx.uploads().current();

    // Bumped from the store after every mutation so the view re-renders.
    let revision = use_signal(|| store.revision());
    let controller = use_signal(StudyViewController::new);
    let mut typing = use_signal(|| false);
    let submitting = use_signal(|| None::<QuestionId>);
    let submit_errors = use_signal(BTreeMap::<QuestionId, String>::new);

    {
        let store = store.clone();
        use_hook(move || {
            spawn(async move {
                let mut controller = controller;
                let mut revision = revision;
                let mut fresh = StudyViewController::new();
                fresh.mount(&store).await;
                controller.set(fresh);
                revision.set(store.revision());
            })
        });
    }

    use_effect(move || {
        let _ = eval("document.getElementById('study-root')?.focus();");
    });

    let apply_change = {
        let store = store.clone();
        use_callback(move |change: ModeChange| {
            let store = store.clone();
            let mut revision = revision;
            let mut submit_errors = submit_errors;
            if matches!(change, ModeChange::Entered(_)) {
                submit_errors.write().clear();
            }
            spawn(async move {
                change.apply(&store).await;
                revision.set(store.revision());
            });
        })
    };

    let handle_event = use_callback(move |event: StudyViewEvent| {
        let mut controller = controller;
        let change = controller.write().handle(event);
        if let Some(change) = change {
            apply_change.call(change);
        }
    });

    let dispatch = {
        let store = store.clone();
        let answers = ctx.answers();
        let questions = questions.clone();
        use_callback(move |intent: StudyIntent| {
            let store = store.clone();
            let mut revision = revision;
            let mut submitting = submitting;
            let mut submit_errors = submit_errors;
            match intent {
                StudyIntent::SelectMode(mode) => handle_event.call(StudyViewEvent::SelectMode(mode)),
                StudyIntent::Back => handle_event.call(StudyViewEvent::Back),
                StudyIntent::EditAnswer(id, text) => {
                    spawn(async move {
                        store.set_answer(&id, text).await;
                        revision.set(store.revision());
                    });
                }
                StudyIntent::ToggleHint(id) => {
                    spawn(async move {
                        store.toggle_hint(&id).await;
                        revision.set(store.revision());
                    });
                }
                StudyIntent::Submit(id) => {
                    if submitting.read().as_ref() == Some(&id) {
                        return;
                    }
                    let Some(question) = questions
                        .as_ref()
                        .and_then(|set| set.get(id.mode()).get(id.index()).cloned())
                    else {
                        log::warn!("no question for {id}");
                        return;
                    };
                    let answers = answers.clone();
                    submitting.set(Some(id.clone()));
                    spawn(async move {
                        match answers.submit(&store, &question, &id).await {
                            Ok(_) => {
                                submit_errors.write().remove(&id);
                            }
                            Err(err) => {
                                submit_errors.write().insert(id.clone(), err.to_string());
                            }
                        }
                        submitting.set(None);
                        revision.set(store.revision());
                    });
                }
                StudyIntent::ResetMode(mode) => {
                    spawn(async move {
                        store.reset_mode_progress(mode).await;
                        revision.set(store.revision());
                    });
                }
                StudyIntent::ResetAll => {
                    spawn(async move {
                        store.reset_all_progress().await;
                        revision.set(store.revision());
                    });
                }
            }
        })
    };

    let on_key = use_callback(move |evt: KeyboardEvent| {
        let modifiers = evt.data.modifiers();
        let ctrl_or_meta =
            modifiers.contains(Modifiers::CONTROL) || modifiers.contains(Modifiers::META);
        let key = evt.data.key().to_string();
        if let Some(event) = shortcut_event(&key, ctrl_or_meta, typing()) {
            evt.prevent_default();
            handle_event.call(event);
        }
    });

    // Subscribe to store changes.
    let _ = revision();
    let snapshot = store.snapshot();
    let state = controller.read().state();
    let overview = ProgressOverview::from_snapshot(&snapshot);
    let progress = map_progress(&overview, state.mode());
    let persistence = store.persistence_status();

    let Some(questions) = questions else {
        return rsx! {
            div { class: "page study-page empty-state",
                h2 { "No questions yet" }
                p { "Upload a PDF to generate a study session." }
                Link { to: Route::Upload {}, "Upload a PDF" }
            }
        };
    };

    let body = match state {
        StudyViewState::Selecting => {
            let cards = map_mode_cards(&overview, |mode| questions.count(mode));
            rsx! {
                h2 { "Choose your study mode" }
                p { class: "muted", "Tip: Ctrl (or Cmd) + Q, D, R or T jumps straight into a mode." }
                ModeGrid { cards, on_select: move |mode| dispatch.call(StudyIntent::SelectMode(mode)) }
            }
        }
        StudyViewState::Active(mode) => {
            let meta = mode.meta();
            let cards = map_question_cards(&questions, mode, &snapshot);
            let submitting_id = submitting.read().clone();
            let errors = submit_errors.read().clone();
            rsx! {
                div { class: "mode-header",
                    button {
                        id: "study-back",
                        class: "link",
                        onclick: move |_| dispatch.call(StudyIntent::Back),
                        "← Back to modes"
                    }
                    h2 { "{meta.icon} {meta.title}" }
                    StudyTimerView { key: "{mode}", clock }
                }
                if cards.is_empty() {
                    p { class: "muted", "No questions were generated for this mode." }
                }
                for card in cards {
                    QuestionCard {
                        key: "{card.id}",
                        submitting: submitting_id.as_ref() == Some(&card.id),
                        error: errors.get(&card.id).cloned(),
                        vm: card.clone(),
                        on_intent: dispatch,
                        on_focus_change: move |focused| typing.set(focused),
                    }
                }
            }
        }
    };

    rsx! {
        div {
            class: "page study-page",
            id: "study-root",
            tabindex: "0",
            onkeydown: on_key,
            if let services::PersistenceStatus::Degraded { reason } = persistence {
                p { class: "warning", role: "status",
                    "Progress is not being saved on this device ({reason}). You can keep studying."
                }
            }
            div { class: "study-layout",
                section { class: "study-main", {body} }
                ProgressPanel { vm: progress, on_intent: dispatch }
            }
        }
    }
}
