use std::sync::{Arc, Mutex, MutexGuard};

use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::error::CommentError;
use crate::session::SessionProvider;
use crate::transfer::{segment, Payload, PostOptions, Transport};
use crate::types::{Comment, DeviceType, NewComment, ViewEvent};

pub const COMMENT_PATH: &str = "/chat/comment";
pub const VIEW_PATH: &str = "/content/analytics/view";

pub fn comments_path(content_id: &str) -> String {
    format!("/chat/comments/{}", segment(content_id))
}

#[derive(Debug, Clone, PartialEq)]
pub enum PostOutcome {
    /// Posted; carries the re-fetched thread.
    Posted(Vec<Comment>),
    /// Posted, but the thread could not be re-fetched. [`EngagementController::thread`]
    /// still holds the previous one.
    PostedStale,
    /// Nothing sent: blank text or no session.
    Skipped,
}

#[derive(Debug, Default)]
struct Thread {
    content_id: Option<String>,
    comments: Vec<Comment>,
    generation: u64,
}

/// Comment thread and view tracking for the content currently on screen.
#[derive(Clone)]
pub struct EngagementController {
    transport: Arc<dyn Transport>,
    session: Arc<dyn SessionProvider>,
    thread: Arc<Mutex<Thread>>,
}

impl EngagementController {
    pub fn new(transport: Arc<dyn Transport>, session: Arc<dyn SessionProvider>) -> Self {
        Self {
            transport,
            session,
            thread: Arc::new(Mutex::new(Thread::default())),
        }
    }

    /// The last fetched thread, in server order.
    pub fn thread(&self) -> Vec<Comment> {
        self.lock().comments.clone()
    }

    /// Replace the held thread with the server's. A response that lands after a
    /// newer fetch was issued is returned to the caller but not stored.
    pub async fn fetch_comments(&self, content_id: &str) -> Result<Vec<Comment>, CommentError> {
        let generation = {
            let mut thread = self.lock();
            thread.generation += 1;
            thread.generation
        };
        debug!("engagement.fetch_comments: content={}", content_id);

        let comments: Vec<Comment> = self
            .transport
            .get(&comments_path(content_id), &[], None)
            .await
            .and_then(|body| body.json())
            .inspect_err(|e| error!("engagement.fetch_comments: content={} failed: {}", content_id, e))?;

        let mut thread = self.lock();
        if thread.generation == generation {
            thread.content_id = Some(content_id.to_string());
            thread.comments = comments.clone();
        } else {
            debug!("engagement.fetch_comments: dropped stale response");
        }
        Ok(comments)
    }

    pub async fn post_comment(
        &self,
        content_id: &str,
        text: &str,
    ) -> Result<PostOutcome, CommentError> {
        self.post_reply(content_id, text, None).await
    }

    pub async fn post_reply(
        &self,
        content_id: &str,
        text: &str,
        parent_id: Option<&str>,
    ) -> Result<PostOutcome, CommentError> {
        if text.trim().is_empty() {
            return Ok(PostOutcome::Skipped);
        }
        let Some(token) = self.session.access_token() else {
            debug!("engagement.post_comment: no session, skipped");
            return Ok(PostOutcome::Skipped);
        };

        let comment = NewComment {
            content_id,
            text,
            parent_id,
        };
        self.transport
            .post(COMMENT_PATH, Payload::json(&comment)?, PostOptions::auth(Some(token)))
            .await
            .inspect_err(|e| error!("engagement.post_comment: content={} failed: {}", content_id, e))?;
        info!("engagement.post_comment: posted on content={}", content_id);

        match self.fetch_comments(content_id).await {
            Ok(thread) => Ok(PostOutcome::Posted(thread)),
            Err(e) => {
                warn!("engagement.post_comment: content={} refetch failed: {}", content_id, e);
                Ok(PostOutcome::PostedStale)
            }
        }
    }

    /// Fire-and-forget view event. Failures are logged and never retried.
    pub fn record_view(&self, content_id: &str, device_type: DeviceType) -> JoinHandle<()> {
        self.record_view_event(ViewEvent {
            content_id: content_id.to_string(),
            device_type,
            duration: None,
            referrer: None,
        })
    }

    pub fn record_view_event(&self, event: ViewEvent) -> JoinHandle<()> {
        let transport = self.transport.clone();
        let token = self.session.access_token();
        tokio::spawn(async move {
            let payload = match Payload::json(&event) {
                Ok(payload) => payload,
                Err(e) => {
                    warn!("engagement.record_view: {}", e);
                    return;
                }
            };
            match transport.post(VIEW_PATH, payload, PostOptions::auth(token)).await {
                Ok(_) => debug!("engagement.record_view: content={}", event.content_id),
                Err(e) => warn!(
                    "engagement.record_view: content={} failed: {}",
                    event.content_id, e
                ),
            }
        })
    }

    fn lock(&self) -> MutexGuard<'_, Thread> {
        self.thread.lock().unwrap_or_else(|e| e.into_inner())
    }
}
