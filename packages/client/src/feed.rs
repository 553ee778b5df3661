use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, error, info};

use crate::error::TransferError;
use crate::session::SessionProvider;
use crate::transfer::{segment, Transport};
use crate::types::{ContentItem, DashboardStats, FeedQuery, SearchResults};

pub const FEED_PATH: &str = "/content/feed";
pub const SEARCH_PATH: &str = "/content/search";
pub const DASHBOARD_PATH: &str = "/creator/dashboard";

/// What the home screen renders. An empty page is an explicit state, not an
/// empty list.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedView {
    Empty,
    Items(Vec<ContentItem>),
}

impl FeedView {
    fn from_items(items: Vec<ContentItem>) -> Self {
        if items.is_empty() {
            FeedView::Empty
        } else {
            FeedView::Items(items)
        }
    }

    pub fn items(&self) -> &[ContentItem] {
        match self {
            FeedView::Empty => &[],
            FeedView::Items(items) => items,
        }
    }
}

#[derive(Debug, Default)]
struct State {
    last_query: Option<FeedQuery>,
    view: Option<FeedView>,
    generation: u64,
}

/// Read side of the platform: feed pages, single items, search and the creator
/// dashboard.
#[derive(Clone)]
pub struct FeedController {
    transport: Arc<dyn Transport>,
    session: Arc<dyn SessionProvider>,
    state: Arc<Mutex<State>>,
}

impl FeedController {
    pub fn new(transport: Arc<dyn Transport>, session: Arc<dyn SessionProvider>) -> Self {
        Self {
            transport,
            session,
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    /// The last stored feed page, if any.
    pub fn view(&self) -> Option<FeedView> {
        self.lock().view.clone()
    }

    pub async fn fetch_feed(&self, query: &FeedQuery) -> Result<FeedView, TransferError> {
        let generation = {
            let mut state = self.lock();
            state.generation += 1;
            state.last_query = Some(query.clone());
            state.generation
        };
        debug!(
            "feed.fetch_feed: limit={} offset={} visibility={}",
            query.limit,
            query.offset,
            query.visibility.as_str()
        );

        let items: Vec<ContentItem> = self
            .transport
            .get(FEED_PATH, &query.to_query(), None)
            .await
            .and_then(|body| body.json())
            .inspect_err(|e| error!("feed.fetch_feed: failed: {}", e))?;
        let view = FeedView::from_items(items);

        let mut state = self.lock();
        if state.generation == generation {
            state.view = Some(view.clone());
        } else {
            debug!("feed.fetch_feed: dropped stale response");
        }
        Ok(view)
    }

    /// Re-issue the last query (or the default first page) and replace the view.
    pub async fn refresh(&self) -> Result<FeedView, TransferError> {
        let query = self.lock().last_query.clone().unwrap_or_default();
        info!("feed.refresh: offset={}", query.offset);
        self.fetch_feed(&query).await
    }

    pub async fn fetch_content(&self, content_id: &str) -> Result<ContentItem, TransferError> {
        debug!("feed.fetch_content: id={}", content_id);
        self.transport
            .get(&format!("/content/{}", segment(content_id)), &[], None)
            .await
            .and_then(|body| body.json())
            .inspect_err(|e| error!("feed.fetch_content: id={} failed: {}", content_id, e))
    }

    pub async fn fetch_creator_content(
        &self,
        creator_id: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<ContentItem>, TransferError> {
        debug!("feed.fetch_creator_content: creator={}", creator_id);
        let query = [
            ("limit".to_string(), limit.clamp(1, 100).to_string()),
            ("offset".to_string(), offset.to_string()),
        ];
        self.transport
            .get(&format!("/content/creator/{}", segment(creator_id)), &query, None)
            .await
            .and_then(|body| body.json())
            .inspect_err(|e| error!("feed.fetch_creator_content: failed: {}", e))
    }

    /// Title/description search. A blank query short-circuits to no results.
    pub async fn search(
        &self,
        text: &str,
        limit: u32,
        offset: u32,
    ) -> Result<SearchResults, TransferError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(SearchResults {
                results: Vec::new(),
                total: 0,
                query: String::new(),
            });
        }
        debug!("feed.search: q={:?}", text);
        let query = [
            ("q".to_string(), text.to_string()),
            ("limit".to_string(), limit.clamp(1, 100).to_string()),
            ("offset".to_string(), offset.to_string()),
        ];
        self.transport
            .get(SEARCH_PATH, &query, None)
            .await
            .and_then(|body| body.json())
            .inspect_err(|e| error!("feed.search: failed: {}", e))
    }

    pub async fn fetch_dashboard_stats(&self) -> Result<DashboardStats, TransferError> {
        let token = self.session.access_token();
        debug!("feed.fetch_dashboard_stats: signed_in={}", token.is_some());
        self.transport
            .get(DASHBOARD_PATH, &[], token.as_deref())
            .await
            .and_then(|body| body.json())
            .inspect_err(|e| error!("feed.fetch_dashboard_stats: failed: {}", e))
    }

    /// Dashboard stats for the signed-in creator; `None` without a session, and
    /// nothing is sent.
    pub async fn fetch_own_dashboard_stats(&self) -> Option<Result<DashboardStats, TransferError>> {
        if self.session.access_token().is_none() {
            debug!("feed.fetch_dashboard_stats: no session, skipped");
            return None;
        }
        Some(self.fetch_dashboard_stats().await)
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}
