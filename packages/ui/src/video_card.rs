use client::{format, ContentItem, MediaKind};
use dioxus::prelude::*;

const CARD_TAGS: usize = 3;

fn card_tags(tags: &[String]) -> &[String] {
    &tags[..tags.len().min(CARD_TAGS)]
}

#[component]
pub fn VideoCard(item: ContentItem) -> Element {
    let duration = format::duration(item.duration);
    let placeholder = match item.media_kind() {
        MediaKind::Video => "🎬",
        MediaKind::Audio => "🎵",
    };

    rsx! {
        Link { class: "video_card", to: format!("/watch/{}", item.id),
            div { class: "video_card_thumb",
                if let Some(thumb) = item.thumbnail_url.as_ref().filter(|u| !u.is_empty()) {
                    img { src: "{thumb}", alt: "{item.title}", loading: "lazy" }
                } else {
                    div { class: "video_card_placeholder", "{placeholder}" }
                }
                if !duration.is_empty() {
                    span { class: "video_card_duration", "{duration}" }
                }
            }
            div { class: "video_card_body",
                h3 { class: "video_card_title", "{item.title}" }
                if let Some(description) = item.description.as_ref().filter(|d| !d.is_empty()) {
                    p { class: "video_card_description", "{description}" }
                }
                if !item.tags.is_empty() {
                    div { class: "video_card_tags",
                        for (i, tag) in card_tags(&item.tags).iter().enumerate() {
                            span { key: "{i}", class: "tag", "#{tag}" }
                        }
                    }
                }
            }
        }
    }
}
