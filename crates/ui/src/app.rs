use dioxus::prelude::*;
use dioxus_router::Router;

use crate::routes::Route;

#[component]
pub fn App() -> Element {
    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }

        document::Title { "Brainifi" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| {
                    log::error!("render error: {errors:?}");
                    rsx! {
                        div { class: "fatal",
                            h1 { "Oops! Something went wrong" }
                            p { "Your progress is kept. Reload to pick up where you left off." }
                            button {
                                id: "reload",
                                onclick: move |_| errors.clear_errors(),
                                "Reload"
                            }
                        }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
