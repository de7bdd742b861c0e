use std::time::Duration;

use dioxus::prelude::*;

use services::{Clock, StudyTimer, format_elapsed};

/// Elapsed time in the active mode; remount (via `key`) to restart.
#[component]
pub fn StudyTimerView(clock: Clock) -> Element {
    let mut timer = use_signal(|| StudyTimer::start(clock.now()));
    let mut now = use_signal(|| clock.now());

    use_future(move || async move {
        loop {
            tokio::time::sleep(Duration::from_secs(1)).await;
            now.set(clock.now());
        }
    });

    let elapsed = format_elapsed(timer.read().elapsed_secs(now()));
    let paused = timer.read().is_paused();

    rsx! {
        div { class: "study-timer",
            span { class: "clock", "⏱ {elapsed}" }
            button {
                class: "link",
                onclick: move |_| timer.write().toggle(clock.now()),
                if paused { "Resume" } else { "Pause" }
            }
        }
    }
}
