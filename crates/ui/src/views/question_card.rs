use dioxus::prelude::*;

use crate::vm::{FeedbackVm, QuestionCardVm, StudyIntent};

#[component]
pub fn QuestionCard(
    vm: QuestionCardVm,
    submitting: bool,
    error: Option<String>,
    on_intent: EventHandler<StudyIntent>,
    on_focus_change: EventHandler<bool>,
) -> Element {
    let can_submit = !submitting && !vm.answer.trim().is_empty();
    let edit_id = vm.id.clone();
    let hint_id = vm.id.clone();
    let submit_id = vm.id.clone();

    rsx! {
        article { class: "question-card", id: "question-{vm.id}",
            header { class: "question-meta",
                span { class: "question-number", "Question {vm.number}" }
                span { class: "category", "{vm.category}" }
                span { class: vm.difficulty_class, "{vm.difficulty}" }
            }
            p { class: "question-text", "{vm.question}" }
            textarea {
                class: "answer-input",
                aria_label: "Your answer",
                placeholder: "Type your answer here…",
                value: "{vm.answer}",
                disabled: submitting,
                onfocus: move |_| on_focus_change.call(true),
                onblur: move |_| on_focus_change.call(false),
                oninput: move |evt| on_intent.call(StudyIntent::EditAnswer(edit_id.clone(), evt.value())),
            }
            div { class: "question-actions",
                button {
                    class: "hint-toggle",
                    onclick: move |_| on_intent.call(StudyIntent::ToggleHint(hint_id.clone())),
                    if vm.hint_shown { "Hide hint" } else { "Show hint" }
                }
                button {
                    class: "submit",
                    disabled: !can_submit,
                    onclick: move |_| on_intent.call(StudyIntent::Submit(submit_id.clone())),
                    if submitting { "Checking…" } else { "Check answer" }
                }
            }
            if vm.hint_shown {
                p { class: "hint", "💡 {vm.hint}" }
            }
            if let Some(error) = error {
                p { class: "error", role: "alert", "{error}" }
            }
            if let Some(feedback) = vm.feedback.clone() {
                FeedbackPanel { feedback }
                if !vm.key_points.is_empty() {
                    section { class: "key-points",
                        h4 { "Key points" }
                        ul {
                            for (idx, point) in vm.key_points.iter().enumerate() {
                                li { key: "{idx}", "{point}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn FeedbackPanel(feedback: FeedbackVm) -> Element {
    rsx! {
        section { class: "feedback",
            div { class: feedback.score_class(),
                "{feedback.score}%"
                if feedback.passed { " · Nailed it!" } else { " · Keep going" }
            }
            p { class: "feedback-summary", "{feedback.summary}" }
            if !feedback.strengths.is_empty() {
                h4 { "Strengths" }
                ul {
                    for (idx, item) in feedback.strengths.iter().enumerate() {
                        li { key: "{idx}", "{item}" }
                    }
                }
            }
            if !feedback.improvements.is_empty() {
                h4 { "To improve" }
                ul {
                    for (idx, item) in feedback.improvements.iter().enumerate() {
                        li { key: "{idx}", "{item}" }
                    }
                }
            }
            if let Some(tip) = feedback.tip.as_ref() {
                p { class: "tip", "Tip: {tip}" }
            }
        }
    }
}
