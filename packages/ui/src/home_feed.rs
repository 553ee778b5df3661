use client::{FeedQuery, FeedView, SearchResults};
use dioxus::prelude::*;

use crate::context::use_client;
use crate::VideoCard;

const FEED_CSS: Asset = asset!("/assets/styling/feed.css");

#[component]
pub fn HomeFeed() -> Element {
    let lang = crate::use_lang()();
    let toasts = crate::use_toasts();
    let client = use_client();
    let feed = use_hook(move || client.feed());

    let mut query = use_signal(FeedQuery::default);
    // Bumped by the refresh button; reset whenever the query changes.
    let mut refreshes = use_signal(|| 0_u32);
    let mut tag_input = use_signal(String::new);
    let mut search_input = use_signal(String::new);
    let mut search_results = use_signal(|| None::<SearchResults>);

    let feed_for_page = feed.clone();
    let mut page = use_resource(move || {
        let feed = feed_for_page.clone();
        let query = query();
        let refreshing = refreshes() > 0;
        async move {
            if refreshing {
                feed.refresh().await
            } else {
                feed.fetch_feed(&query).await
            }
        }
    });

    use_effect(move || {
        if let Some(Err(e)) = &*page.read() {
            tracing::debug!("home feed: {}", e);
            toasts.error(crate::t(lang, "toast.load_feed"), None);
        }
    });

    let apply_tags = move |_: FormEvent| {
        let tags = tag_input()
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        search_results.set(None);
        refreshes.set(0);
        query.set(FeedQuery {
            tags,
            ..FeedQuery::default()
        });
    };

    let run_search = move |_: MouseEvent| {
        let feed = feed.clone();
        let text = search_input();
        spawn(async move {
            if text.trim().is_empty() {
                search_results.set(None);
                return;
            }
            match feed.search(&text, 20, 0).await {
                Ok(results) => search_results.set(Some(results)),
                Err(_) => toasts.error(crate::t(lang, "toast.error"), None),
            }
        });
    };

    rsx! {
        document::Link { rel: "stylesheet", href: FEED_CSS }

        div { class: "feed",
            div { class: "feed_header",
                h1 { {crate::t(lang, "feed.title")} }
                button {
                    class: "btn ghost",
                    onclick: move |_| {
                        search_results.set(None);
                        refreshes.set(refreshes() + 1);
                    },
                    {crate::t(lang, "feed.refresh")}
                }
            }

            div { class: "feed_filters",
                input {
                    r#type: "search",
                    placeholder: crate::t(lang, "feed.search_ph"),
                    value: "{search_input}",
                    oninput: move |e| search_input.set(e.value()),
                }
                button { class: "btn", onclick: run_search, {crate::t(lang, "feed.search")} }
                input {
                    placeholder: crate::t(lang, "feed.tag_ph"),
                    value: "{tag_input}",
                    oninput: move |e| tag_input.set(e.value()),
                    onchange: apply_tags,
                }
            }

            if let Some(results) = search_results() {
                p { class: "hint", "{results.total} " {crate::t(lang, "feed.results")} }
                div { class: "feed_grid",
                    for item in results.results {
                        VideoCard { key: "{item.id}", item: item.clone() }
                    }
                }
            } else {
                match &*page.read() {
                    None => rsx! {
                        p { class: "hint", {crate::t(lang, "common.loading")} }
                    },
                    Some(Err(_)) => rsx! {
                        button { class: "btn", onclick: move |_| page.restart(),
                            {crate::t(lang, "common.retry")}
                        }
                    },
                    Some(Ok(FeedView::Empty)) => rsx! {
                        div { class: "feed_empty", {crate::t(lang, "feed.empty")} }
                    },
                    Some(Ok(FeedView::Items(items))) => rsx! {
                        div { class: "feed_grid",
                            for item in items.iter() {
                                VideoCard { key: "{item.id}", item: item.clone() }
                            }
                        }
                    },
                }
            }
        }
    }
}
