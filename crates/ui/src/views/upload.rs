use std::path::Path;

use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState};

async fn read_document(raw_path: &str) -> Result<(String, Vec<u8>), ViewError> {
    let raw_path = raw_path.trim();
    if raw_path.is_empty() {
        return Err(ViewError::new("Choose a PDF file first."));
    }
    let path = Path::new(raw_path);
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(raw_path)
        .to_string();
    let bytes = tokio::fs::read(path).await.map_err(|err| {
        log::warn!("could not read {}: {err}", path.display());
        ViewError::new(format!("Could not read {file_name}: {err}"))
    })?;
    Ok((file_name, bytes))
}

#[component]
pub fn UploadView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let uploads = ctx.uploads();
    let has_questions = uploads.current().is_some();

    let mut path = use_signal(String::new);
    let state = use_signal(|| ViewState::<usize>::Idle);

    let on_upload = use_callback(move |()| {
        let uploads = uploads.clone();
        let mut state = state;
        if state.read().is_loading() {
            return;
        }
        state.set(ViewState::Loading);
        let raw_path = path.read().clone();
        spawn(async move {
            let result = match read_document(&raw_path).await {
                Ok((file_name, bytes)) => uploads
                    .upload_bytes(file_name, bytes)
                    .await
                    .map(|set| set.total())
                    .map_err(|err| ViewError::new(err.to_string())),
                Err(err) => Err(err),
            };
            match result {
                Ok(total) => {
                    state.set(ViewState::Ready(total));
                    navigator.push(Route::Study {});
                }
                Err(err) => state.set(ViewState::Error(err)),
            }
        });
    });

    let loading = state.read().is_loading();
    let error = state.read().error().cloned();

    rsx! {
        div { class: "page upload-page",
            h2 { "Turn your notes into a study session" }
            p { class: "muted",
                "Pick a PDF (up to 10 MB). We'll generate questions for four study modes."
            }
            form {
                class: "upload-form",
                onsubmit: move |evt| {
                    evt.prevent_default();
                    on_upload.call(());
                },
                label { r#for: "upload-path", "PDF file" }
                input {
                    id: "upload-path",
                    r#type: "text",
                    placeholder: "/path/to/notes.pdf",
                    value: "{path}",
                    disabled: loading,
                    oninput: move |evt| path.set(evt.value()),
                }
                button {
                    id: "upload-submit",
                    r#type: "submit",
                    disabled: loading,
                    if loading { "Generating questions…" } else { "Generate questions" }
                }
            }
            if let Some(error) = error {
                p { class: "error", role: "alert", "{error}" }
            }
            if has_questions && !loading {
                p { class: "resume",
                    Link { to: Route::Study {}, "Continue with the current questions →" }
                }
            }
        }
    }
}
