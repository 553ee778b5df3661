use std::sync::Arc;

use anyhow::Context;
use client::{AppMode, ClientConfig, ClientContext, SessionHandle};
use dioxus::prelude::*;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(MobileNavbar)]
    #[route("/")]
    Home {},
    #[route("/watch/:id")]
    Watch { id: String },
    #[route("/upload")]
    Upload {},
    #[route("/dashboard")]
    Dashboard {},
    #[route("/tip/success")]
    TipSuccess {},
    #[route("/tip/cancel")]
    TipCancel {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    install_panic_hook();
    init_tracing();

    let (context, session) = match bootstrap() {
        Ok(parts) => parts,
        Err(e) => {
            tracing::error!("startup failed: {e:#}");
            eprintln!("startup failed: {e:#}");
            std::process::exit(1);
        }
    };

    dioxus::LaunchBuilder::new()
        .with_context(context)
        .with_context(session)
        .launch(App);
}

fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Load configuration and build the shared client. The session starts empty;
/// the sign-in layer fills the handle.
fn bootstrap() -> anyhow::Result<(ClientContext, SessionHandle)> {
    client::config::load_dotenv();

    let config = ClientConfig::from_env().context("loading client configuration")?;
    log_runtime_config(&config);

    let session = SessionHandle::default();
    let context = ClientContext::from_config(config, Arc::new(session.clone()))
        .context("building HTTP transport")?;
    Ok((context, session))
}

fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("panic: {info}");
        eprintln!("panic: {info}");
    }));
}

fn log_runtime_config(config: &ClientConfig) {
    let endpoints = &config.endpoints;
    tracing::info!(
        "startup: mode={:?} content={} dashboard={} chat={} payments={}",
        config.mode,
        endpoints.content,
        endpoints.dashboard,
        endpoints.chat,
        endpoints.payments
    );
    tracing::info!("startup: app_origin={}", config.app_origin);

    if config.mode == AppMode::Production && endpoints.content.contains("localhost") {
        tracing::warn!("startup: BACKEND_URL points to localhost in production mode");
    }
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        ui::AppTheme {}
        ui::I18nProvider {
            ui::ToastProvider {
                Router::<Route> {}
            }
        }
    }
}

#[component]
fn MobileNavbar() -> Element {
    let lang_signal = ui::use_lang();
    let lang = lang_signal();
    let next_lang = match lang {
        ui::Lang::En => ui::Lang::Fr,
        ui::Lang::Fr => ui::Lang::En,
    };

    rsx! {
        nav { class: "app_nav",
            div { class: "app_nav_inner",
                Link { class: "brand", to: Route::Home {}, {ui::t(lang, "app.name")} }
                div { class: "nav_links",
                    Link { class: "nav_link", active_class: "active", to: Route::Home {},
                        {ui::t(lang, "nav.feed")}
                    }
                    Link { class: "nav_link", active_class: "active", to: Route::Upload {},
                        {ui::t(lang, "nav.upload")}
                    }
                    Link { class: "nav_link", active_class: "active", to: Route::Dashboard {},
                        {ui::t(lang, "nav.dashboard")}
                    }
                    button {
                        class: "btn ghost",
                        onclick: move |_| ui::set_lang(lang_signal, next_lang),
                        {ui::t(lang, "lang.toggle")}
                    }
                }
            }
        }
        main { class: "route_view", Outlet::<Route> {} }
    }
}

#[component]
fn Home() -> Element {
    rsx! { ui::HomeFeed {} }
}

#[component]
fn Watch(id: String) -> Element {
    rsx! { ui::Player { key: "{id}", content_id: id.clone() } }
}

#[component]
fn Upload() -> Element {
    rsx! { ui::UploadScreen {} }
}

#[component]
fn Dashboard() -> Element {
    rsx! { ui::DashboardScreen {} }
}

#[component]
fn TipSuccess() -> Element {
    rsx! { ui::TipResult { succeeded: true } }
}

#[component]
fn TipCancel() -> Element {
    rsx! { ui::TipResult { succeeded: false } }
}
