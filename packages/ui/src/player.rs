use client::{format, DeviceType, MediaKind};
use dioxus::prelude::*;

use crate::context::use_client;
use crate::{CommentBox, TipButton};

const PLAYER_CSS: Asset = asset!("/assets/styling/player.css");

#[component]
pub fn Player(content_id: String) -> Element {
    let lang = crate::use_lang()();
    let client = use_client();
    let feed = use_hook({
        let client = client.clone();
        move || client.feed()
    });
    let engagement = use_hook(move || client.engagement());

    let id_for_fetch = content_id.clone();
    let item = use_resource(move || {
        let feed = feed.clone();
        let id = id_for_fetch.clone();
        async move { feed.fetch_content(&id).await }
    });

    // One view event per mount; the task outlives the screen.
    let id_for_view = content_id.clone();
    use_hook(move || {
        let engagement = engagement.clone();
        spawn(async move {
            engagement.record_view(&id_for_view, DeviceType::Mobile);
        });
    });

    rsx! {
        document::Link { rel: "stylesheet", href: PLAYER_CSS }

        div { class: "player",
            Link { class: "btn ghost back_link", to: "/", {crate::t(lang, "common.back")} }

            match &*item.read() {
                None => rsx! {
                    p { class: "hint", {crate::t(lang, "common.loading")} }
                },
                Some(Err(e)) => rsx! {
                    p { class: "error",
                        if e.status == Some(404) {
                            {crate::t(lang, "player.not_found")}
                        } else {
                            {crate::t(lang, "toast.error")}
                        }
                    }
                },
                Some(Ok(item)) => {
                    let duration = format::duration(item.duration);
                    rsx! {
                        div { class: "player_media",
                            match (item.playback_url(), item.media_kind()) {
                                (None, _) => rsx! {
                                    p { class: "hint", {crate::t(lang, "player.no_source")} }
                                },
                                (Some(src), MediaKind::Video) => rsx! {
                                    video {
                                        class: "player_video",
                                        src: "{src}",
                                        poster: item.thumbnail_url.clone().unwrap_or_default(),
                                        controls: true,
                                        autoplay: true,
                                        playsinline: true,
                                    }
                                },
                                (Some(src), MediaKind::Audio) => rsx! {
                                    div { class: "player_audio",
                                        if let Some(thumb) = &item.thumbnail_url {
                                            img { src: "{thumb}", alt: "{item.title}" }
                                        }
                                        audio { src: "{src}", controls: true, autoplay: true }
                                    }
                                },
                            }
                        }

                        div { class: "player_info",
                            h1 { "{item.title}" }
                            if !duration.is_empty() {
                                span { class: "hint", "{duration}" }
                            }
                            if let Some(description) = &item.description {
                                p { class: "player_description", "{description}" }
                            }
                            if !item.tags.is_empty() {
                                div { class: "player_tags",
                                    for (i, tag) in item.tags.iter().enumerate() {
                                        span { key: "{i}", class: "tag", "#{tag}" }
                                    }
                                }
                            }
                            if let Some(creator_id) = &item.creator_id {
                                TipButton { creator_id: creator_id.clone() }
                            }
                        }

                        CommentBox { content_id: item.id.clone() }
                    }
                }
            }
        }
    }
}
