use dioxus::prelude::*;

const THEME_CSS: Asset = asset!("/assets/styling/theme.css");
const COMPONENTS_CSS: Asset = asset!("/assets/styling/components.css");

/// Global look: palette and the shared component styles (cards, toasts, tip dialog).
#[component]
pub fn AppTheme() -> Element {
    rsx! {
        document::Meta { name: "viewport", content: "width=device-width, initial-scale=1, viewport-fit=cover" }
        document::Meta { name: "color-scheme", content: "dark" }
        document::Link { rel: "stylesheet", href: THEME_CSS }
        document::Link { rel: "stylesheet", href: COMPONENTS_CSS }
    }
}
