use dioxus::prelude::*;

use study_core::model::StudyMode;

use crate::vm::{ProgressVm, StudyIntent};

/// What a pending reset confirmation applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ResetTarget {
    Mode(StudyMode),
    All,
}

#[component]
pub fn ProgressPanel(vm: ProgressVm, on_intent: EventHandler<StudyIntent>) -> Element {
    let mut confirming = use_signal(|| None::<ResetTarget>);

    let confirm = move |_| {
        let intent = match confirming() {
            Some(ResetTarget::Mode(mode)) => StudyIntent::ResetMode(mode),
            Some(ResetTarget::All) => StudyIntent::ResetAll,
            None => return,
        };
        confirming.set(None);
        on_intent.call(intent);
    };
    let prompt = match confirming() {
        Some(ResetTarget::Mode(mode)) => Some(format!("Reset progress for {}?", mode.title())),
        Some(ResetTarget::All) => Some("Reset all progress?".to_string()),
        None => None,
    };

    rsx! {
        aside { class: "progress-panel",
            div { class: "progress-header",
                h3 { "Overall Progress" }
                button {
                    id: "reset-all",
                    class: "link danger",
                    onclick: move |_| confirming.set(Some(ResetTarget::All)),
                    "Reset All"
                }
            }
            div { class: "progress-bar",
                div { class: "progress-fill", style: "width: {vm.overall_percent}%" }
            }
            p { class: "muted", "{vm.overall_label}" }
            ul { class: "progress-rows",
                for row in vm.rows.clone() {
                    li { key: "{row.mode}", class: row.row_class(),
                        div { class: "progress-title",
                            span { "{row.title}" }
                            span { class: "muted", "{row.average_label}" }
                        }
                        span { class: "progress-count", "{row.count_label}" }
                        if row.is_complete {
                            span { class: "check", "✓" }
                        }
                        button {
                            class: "link danger",
                            onclick: move |_| confirming.set(Some(ResetTarget::Mode(row.mode))),
                            "Reset"
                        }
                    }
                }
            }
            if let Some(prompt) = prompt {
                div { class: "confirm", role: "alertdialog",
                    p { "{prompt}" }
                    button { id: "reset-confirm", class: "danger", onclick: confirm, "Reset" }
                    button { onclick: move |_| confirming.set(None), "Cancel" }
                }
            }
            p { class: "stats", "{vm.stats_label}" }
            if vm.all_complete {
                div { class: "achievement", "🏆 You're on fire! All modes completed!" }
            }
        }
    }
}
