use std::sync::Arc;

use client::{
    SelectedFile, TransferPhase, UploadDraft, UploadError, UploadTransferState, Visibility,
};
use dioxus::prelude::*;

use crate::context::{use_client, use_session, InputFilePicker};

const UPLOAD_CSS: Asset = asset!("/assets/styling/upload.css");

#[component]
pub fn UploadScreen() -> Element {
    let lang = crate::use_lang()();
    let toasts = crate::use_toasts();
    let client = use_client();
    let session = use_session();

    let picker = use_hook(InputFilePicker::default);
    let mut draft = use_signal(UploadDraft::default);
    // Progress ticks arrive from the transport's stream, off the UI thread.
    let transfer = use_signal_sync(UploadTransferState::default);

    let upload = use_hook({
        let picker = picker.clone();
        move || {
            let controller = client.upload(Arc::new(picker));
            controller.subscribe(Arc::new(move |state: &UploadTransferState| {
                let mut transfer = transfer;
                transfer.set(state.clone());
            }));
            controller
        }
    });

    if !session.is_signed_in() {
        return rsx! {
            div { class: "panel", p { class: "hint", {crate::t(lang, "common.signin_required")} } }
        };
    }

    let on_file = {
        let upload = upload.clone();
        move |evt: FormEvent| {
            let chosen = evt
                .files()
                .into_iter()
                .next()
                .map(|file| SelectedFile::from_path(file.path()));
            picker.offer(chosen);
            let upload = upload.clone();
            spawn(async move {
                match upload.select_file().await {
                    Ok(next) => draft.set(next),
                    Err(UploadError::FilePickerCancelled) => {}
                    Err(e) => toasts.error(crate::t(lang, "upload.failed"), Some(e.user_message())),
                }
            });
        }
    };

    let edit = {
        let upload = upload.clone();
        // Every form edit goes through the controller so its draft stays authoritative.
        move |change: Box<dyn FnOnce(&mut UploadDraft)>| draft.set(upload.edit_draft(change))
    };

    let on_submit = {
        let upload = upload.clone();
        move |_: MouseEvent| {
            let upload = upload.clone();
            let current = draft();
            spawn(async move {
                match upload.submit(current).await {
                    Ok(item) => {
                        tracing::info!("upload screen: published {}", item.id);
                        toasts.success(crate::t(lang, "upload.done"), Some(item.title));
                        draft.set(UploadDraft::default());
                        upload.acknowledge();
                    }
                    Err(e) => toasts.error(crate::t(lang, "upload.failed"), Some(e.user_message())),
                }
            });
        }
    };

    let state = transfer.cloned();
    let uploading = state.phase == TransferPhase::Uploading;
    let percent = format!("{:.0}%", state.progress);
    let form = draft();

    rsx! {
        document::Link { rel: "stylesheet", href: UPLOAD_CSS }

        div { class: "panel upload",
            h1 { {crate::t(lang, "upload.title")} }

            label { {crate::t(lang, "upload.file")} }
            input {
                r#type: "file",
                accept: "video/*,audio/*",
                disabled: uploading,
                onchange: on_file,
            }
            if let Some(file) = &form.file {
                p { class: "hint", "{file.name} ({file.mime_type})" }
            }

            label { {crate::t(lang, "upload.form.title")} }
            input {
                value: "{form.title}",
                disabled: uploading,
                oninput: {
                    let mut edit = edit.clone();
                    move |e: FormEvent| {
                        let value = e.value();
                        edit(Box::new(move |d: &mut UploadDraft| d.title = value));
                    }
                },
            }

            label { {crate::t(lang, "upload.form.description")} }
            textarea {
                value: "{form.description}",
                rows: 3,
                disabled: uploading,
                oninput: {
                    let mut edit = edit.clone();
                    move |e: FormEvent| {
                        let value = e.value();
                        edit(Box::new(move |d: &mut UploadDraft| d.description = value));
                    }
                },
            }

            label { {crate::t(lang, "upload.form.tags")} }
            input {
                value: "{form.tags}",
                disabled: uploading,
                oninput: {
                    let mut edit = edit.clone();
                    move |e: FormEvent| {
                        let value = e.value();
                        edit(Box::new(move |d: &mut UploadDraft| d.tags = value));
                    }
                },
            }

            label { {crate::t(lang, "upload.form.visibility")} }
            div { class: "visibility_options",
                for option in Visibility::ALL {
                    button {
                        key: "{option.as_str()}",
                        class: if form.visibility == option { "chip active" } else { "chip" },
                        disabled: uploading,
                        onclick: {
                            let mut edit = edit.clone();
                            move |_| edit(Box::new(move |d: &mut UploadDraft| d.visibility = option))
                        },
                        {crate::t(lang, &format!("visibility.{}", option.as_str()))}
                    }
                }
            }

            if uploading {
                div { class: "progress",
                    div { class: "progress_bar", style: "width: {percent}" }
                }
                p { class: "hint", {crate::t(lang, "upload.uploading")} " {percent}" }
            } else if let Some(message) = state.error.as_ref().filter(|_| state.phase == TransferPhase::Failed) {
                p { class: "error", "{message}" }
            }

            button {
                class: "btn primary",
                disabled: uploading || !form.is_submittable(),
                onclick: on_submit,
                {crate::t(lang, "upload.submit")}
            }
        }
    }
}
