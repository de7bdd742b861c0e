use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{StudyView, UploadView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", UploadView)] Upload {},
        #[route("/study", StudyView)] Study {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            header { class: "topbar",
                h1 { "Brainifi" }
                nav {
                    Link { to: Route::Upload {}, "Upload" }
                    Link { to: Route::Study {}, "Study" }
                }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
