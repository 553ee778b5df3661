use dioxus::prelude::*;

/// Landing screen for the checkout provider's success/cancel redirects.
#[component]
pub fn TipResult(succeeded: bool) -> Element {
    let lang = crate::use_lang()();
    let (class, key) = if succeeded {
        ("panel tip_result success", "tip.success")
    } else {
        ("panel tip_result", "tip.cancelled")
    };

    rsx! {
        div { class,
            h2 { {crate::t(lang, key)} }
            Link { class: "btn primary", to: "/", {crate::t(lang, "common.back")} }
        }
    }
}
