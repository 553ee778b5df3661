use client::{Comment, PostOutcome};
use dioxus::prelude::*;

use crate::context::{use_client, use_session};

#[component]
pub fn CommentBox(content_id: String) -> Element {
    let lang = crate::use_lang()();
    let toasts = crate::use_toasts();
    let session = use_session();
    let client = use_client();
    let engagement = use_hook(move || client.engagement());

    let mut draft = use_signal(String::new);
    let mut posting = use_signal(|| false);
    let mut thread = use_signal(Vec::<Comment>::new);

    let engagement_for_list = engagement.clone();
    let content_for_list = content_id.clone();
    let mut comments = use_resource(move || {
        let engagement = engagement_for_list.clone();
        let content_id = content_for_list.clone();
        let mut thread = thread;
        async move {
            let items = engagement.fetch_comments(&content_id).await?;
            thread.set(items);
            Ok::<(), client::CommentError>(())
        }
    });

    use_effect(move || {
        if let Some(Err(e)) = &*comments.read() {
            toasts.error(crate::t(lang, "toast.load_comments"), Some(e.user_message()));
        }
    });

    let signed_in = session.is_signed_in();

    rsx! {
        div { class: "panel comment_box",
            h2 { {crate::t(lang, "comments.title")} }

            if signed_in {
                div { class: "comment_form",
                    textarea {
                        value: "{draft}",
                        oninput: move |e| draft.set(e.value()),
                        placeholder: crate::t(lang, "comments.placeholder"),
                        rows: 3,
                    }
                    button {
                        class: "btn primary",
                        disabled: posting() || draft().trim().is_empty(),
                        onclick: move |_| {
                            let engagement = engagement.clone();
                            let content_id = content_id.clone();
                            let text = draft();
                            spawn(async move {
                                posting.set(true);
                                match engagement.post_comment(&content_id, &text).await {
                                    Ok(PostOutcome::Posted(items)) => {
                                        draft.set(String::new());
                                        thread.set(items);
                                    }
                                    Ok(PostOutcome::PostedStale) => draft.set(String::new()),
                                    Ok(PostOutcome::Skipped) => {}
                                    Err(e) => toasts.error(
                                        crate::t(lang, "toast.error"),
                                        Some(e.user_message()),
                                    ),
                                }
                                posting.set(false);
                            });
                        },
                        {crate::t(lang, "comments.post")}
                    }
                }
            } else {
                p { class: "hint", {crate::t(lang, "comments.signin")} }
            }

            match &*comments.read() {
                None => rsx! {
                    p { class: "hint", {crate::t(lang, "common.loading")} }
                },
                Some(Err(_)) => rsx! {
                    button { class: "btn ghost", onclick: move |_| comments.restart(),
                        {crate::t(lang, "common.retry")}
                    }
                },
                Some(Ok(())) => rsx! {
                    if thread.read().is_empty() {
                        p { class: "hint", {crate::t(lang, "comments.empty")} }
                    }
                    for c in thread.read().iter() {
                        div { key: "{c.id}", class: "comment",
                            div { class: "comment_meta",
                                span { class: "comment_author", "{c.author_label()}" }
                                span { class: "hint", {c.created_at.format("%b %e, %Y").to_string()} }
                            }
                            p { class: "comment_text", "{c.text}" }
                        }
                    }
                },
            }
        }
    }
}
