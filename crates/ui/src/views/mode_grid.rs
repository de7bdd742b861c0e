use dioxus::prelude::*;

use study_core::model::StudyMode;

use crate::vm::ModeCardVm;

#[component]
pub fn ModeGrid(cards: Vec<ModeCardVm>, on_select: EventHandler<StudyMode>) -> Element {
    rsx! {
        div { class: "mode-grid",
            for card in cards {
                button {
                    key: "{card.mode}",
                    id: "mode-{card.mode}",
                    class: if card.is_complete { "mode-card complete" } else { "mode-card" },
                    onclick: move |_| on_select.call(card.mode),
                    span { class: "mode-icon", "{card.icon}" }
                    h3 { "{card.title}" }
                    p { class: "mode-description", "{card.description}" }
                    div { class: "mode-footer",
                        span { class: "mode-count", "{card.question_count} questions" }
                        span { class: "mode-progress", "{card.completed}/{card.target}" }
                        kbd { "{card.shortcut_label}" }
                    }
                }
            }
        }
    }
}
