use std::sync::Arc;

use client::{format, CheckoutSession, SUGGESTED_AMOUNTS};
use dioxus::prelude::*;

use crate::context::{use_client, WebviewRedirector};

#[component]
pub fn TipButton(creator_id: String) -> Element {
    let lang = crate::use_lang()();
    let toasts = crate::use_toasts();
    let client = use_client();

    // Written from the checkout completion callback, which must be Send.
    let mut open = use_signal_sync(|| false);
    let mut custom = use_signal(String::new);
    let mut pending = use_signal(|| false);

    let controller = use_hook(move || {
        client
            .checkout(Arc::new(WebviewRedirector))
            .with_completion(Arc::new(move |_: &CheckoutSession| {
                let mut open = open;
                open.set(false);
            }))
    });

    let request = move |amount: Option<f64>| {
        let controller = controller.clone();
        let creator_id = creator_id.clone();
        let raw = custom();
        spawn(async move {
            pending.set(true);
            let result = match amount {
                Some(amount) => controller.request_checkout(&creator_id, amount).await,
                None => controller.request_checkout_custom(&creator_id, &raw).await,
            };
            pending.set(false);
            match result {
                Ok(_) => {
                    custom.set(String::new());
                    toasts.info(crate::t(lang, "tip.redirecting"), None);
                }
                Err(e) => toasts.error(crate::t(lang, "toast.error"), Some(e.user_message())),
            }
        });
    };

    rsx! {
        button {
            class: "btn tip_button",
            onclick: move |_| open.set(true),
            "💸 "
            {crate::t(lang, "tip.button")}
        }

        if open() {
            div { class: "modal_backdrop",
                div { class: "modal", role: "dialog",
                    h3 { {crate::t(lang, "tip.title")} }
                    div { class: "tip_amounts",
                        for amount in SUGGESTED_AMOUNTS {
                            button {
                                key: "{amount}",
                                class: "btn tip_amount",
                                disabled: pending(),
                                onclick: {
                                    let request = request.clone();
                                    move |_| request(Some(amount))
                                },
                                {format::dollars(amount)}
                            }
                        }
                    }
                    div { class: "tip_custom",
                        input {
                            r#type: "number",
                            inputmode: "decimal",
                            min: "0",
                            step: "0.01",
                            placeholder: crate::t(lang, "tip.custom_ph"),
                            value: "{custom}",
                            oninput: move |e| custom.set(e.value()),
                        }
                        button {
                            class: "btn primary",
                            disabled: pending(),
                            onclick: {
                                let request = request.clone();
                                move |_| request(None)
                            },
                            {crate::t(lang, "tip.send")}
                        }
                    }
                    button {
                        class: "btn ghost",
                        onclick: move |_| open.set(false),
                        {crate::t(lang, "tip.cancel")}
                    }
                }
            }
        }
    }
}
