use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    Unlisted,
    Private,
}

impl Visibility {
    pub const ALL: [Visibility; 3] = [Visibility::Public, Visibility::Unlisted, Visibility::Private];

    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Unlisted => "unlisted",
            Visibility::Private => "private",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Audio,
}

/// A published piece of content. Only the backend mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: String,
    #[serde(default)]
    pub creator_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub media_url: Option<String>,
    #[serde(default)]
    pub stream_url: Option<String>,
    #[serde(default)]
    pub visibility: Visibility,
    /// Seconds.
    #[serde(default)]
    pub duration: Option<u32>,
    pub created_at: DateTime<Utc>,
}

impl ContentItem {
    /// Stream URL when transcoded, otherwise the original upload.
    pub fn playback_url(&self) -> Option<&str> {
        self.stream_url
            .as_deref()
            .or(self.media_url.as_deref())
            .filter(|url| !url.is_empty())
    }

    /// Uploads land in per-kind buckets, so the URL tells video from audio.
    pub fn media_kind(&self) -> MediaKind {
        let is_video = [self.media_url.as_deref(), self.stream_url.as_deref()]
            .into_iter()
            .flatten()
            .any(|url| url.contains("video"));
        if is_video {
            MediaKind::Video
        } else {
            MediaKind::Audio
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentAuthor {
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub user_id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub user: Option<CommentAuthor>,
}

impl Comment {
    pub fn author_label(&self) -> &str {
        self.user
            .as_ref()
            .and_then(|u| u.email.as_deref())
            .filter(|email| !email.is_empty())
            .unwrap_or("Anonymous")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewComment<'a> {
    pub content_id: &'a str,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceType {
    Mobile,
    Desktop,
    Web,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewEvent {
    pub content_id: String,
    pub device_type: DeviceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckoutRequest {
    pub to_creator_id: String,
    pub amount: f64,
    pub currency: String,
    pub success_url: String,
    pub cancel_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    #[serde(default)]
    pub checkout_url: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Aggregate creator statistics; a read-only snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub total_views: u64,
    /// Seconds; summed from per-view durations, so usually fractional.
    #[serde(default)]
    pub total_watch_time: f64,
    #[serde(default)]
    pub total_tips: f64,
    #[serde(default)]
    pub total_comments: u64,
    #[serde(default)]
    pub total_content: u64,
    #[serde(default)]
    pub tip_count: Option<u64>,
}

impl DashboardStats {
    pub fn summary(&self) -> DashboardSummary {
        DashboardSummary {
            watch_hours: self.total_watch_time / 3600.0,
            average_views_per_content: if self.total_content > 0 {
                self.total_views as f64 / self.total_content as f64
            } else {
                0.0
            },
            engagement_rate: if self.total_views > 0 {
                self.total_comments as f64 / self.total_views as f64 * 100.0
            } else {
                0.0
            },
            average_tip: match self.tip_count {
                Some(count) if count > 0 => Some(self.total_tips / count as f64),
                _ => None,
            },
        }
    }
}

/// Figures derived from [`DashboardStats`]; never divides by zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashboardSummary {
    pub watch_hours: f64,
    pub average_views_per_content: f64,
    /// Percent of views that produced a comment.
    pub engagement_rate: f64,
    /// `None` when the backend does not report how many tips were received.
    pub average_tip: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedQuery {
    /// 1..=100, the backend's accepted range.
    pub limit: u32,
    pub offset: u32,
    pub visibility: Visibility,
    pub tags: Vec<String>,
}

impl Default for FeedQuery {
    fn default() -> Self {
        Self {
            limit: 20,
            offset: 0,
            visibility: Visibility::Public,
            tags: Vec::new(),
        }
    }
}

impl FeedQuery {
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = vec![
            ("limit".to_string(), self.limit.clamp(1, 100).to_string()),
            ("offset".to_string(), self.offset.to_string()),
            ("visibility".to_string(), self.visibility.as_str().to_string()),
        ];
        let tags: Vec<&str> = self
            .tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .collect();
        if !tags.is_empty() {
            query.push(("tags".to_string(), tags.join(",")));
        }
        query
    }

    /// The following page with the same filters.
    pub fn next_page(&self) -> Self {
        Self {
            offset: self.offset + self.limit,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub results: Vec<ContentItem>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub query: String,
}
