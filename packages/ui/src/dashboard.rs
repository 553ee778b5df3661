use client::format;
use dioxus::prelude::*;

use crate::context::{use_client, use_session};

const DASHBOARD_CSS: Asset = asset!("/assets/styling/dashboard.css");

#[component]
fn StatTile(label: String, value: String) -> Element {
    rsx! {
        div { class: "stat_tile",
            span { class: "stat_label", "{label}" }
            span { class: "stat_value", "{value}" }
        }
    }
}

#[component]
pub fn DashboardScreen() -> Element {
    let lang = crate::use_lang()();
    let toasts = crate::use_toasts();
    let client = use_client();
    let session = use_session();
    let feed = use_hook(move || client.feed());
    let signed_in = session.is_signed_in();

    let mut stats = use_resource(move || {
        let feed = feed.clone();
        async move { feed.fetch_own_dashboard_stats().await }
    });

    use_effect(move || {
        if let Some(Some(Err(e))) = &*stats.read() {
            tracing::debug!("dashboard: {}", e);
            toasts.error(crate::t(lang, "toast.load_dashboard"), None);
        }
    });

    if !signed_in {
        return rsx! {
            div { class: "panel", p { class: "hint", {crate::t(lang, "common.signin_required")} } }
        };
    }

    rsx! {
        document::Link { rel: "stylesheet", href: DASHBOARD_CSS }

        div { class: "dashboard",
            h1 { {crate::t(lang, "dashboard.title")} }

            match &*stats.read() {
                None => rsx! {
                    p { class: "hint", {crate::t(lang, "common.loading")} }
                },
                Some(None) | Some(Some(Err(_))) => rsx! {
                    button { class: "btn", onclick: move |_| stats.restart(),
                        {crate::t(lang, "common.retry")}
                    }
                },
                Some(Some(Ok(stats))) => {
                    let summary = stats.summary();
                    let average_tip = summary
                        .average_tip
                        .map(format::dollars)
                        .unwrap_or_else(|| "—".to_string());
                    rsx! {
                        div { class: "stat_grid",
                            StatTile {
                                label: crate::t(lang, "dashboard.views"),
                                value: format::thousands(stats.total_views),
                            }
                            StatTile {
                                label: crate::t(lang, "dashboard.watch_time"),
                                value: format::hours(summary.watch_hours),
                            }
                            StatTile {
                                label: crate::t(lang, "dashboard.tips"),
                                value: format::dollars(stats.total_tips),
                            }
                            StatTile {
                                label: crate::t(lang, "dashboard.comments"),
                                value: format::thousands(stats.total_comments),
                            }
                            StatTile {
                                label: crate::t(lang, "dashboard.content"),
                                value: format::thousands(stats.total_content),
                            }
                            StatTile {
                                label: crate::t(lang, "dashboard.avg_views"),
                                value: format!("{:.0}", summary.average_views_per_content),
                            }
                            StatTile {
                                label: crate::t(lang, "dashboard.engagement"),
                                value: format::percent(summary.engagement_rate),
                            }
                            StatTile {
                                label: crate::t(lang, "dashboard.avg_tip"),
                                value: average_tip,
                            }
                        }
                    }
                }
            }
        }
    }
}
