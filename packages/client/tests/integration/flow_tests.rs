use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use client::{
    AppMode, ClientConfig, ClientContext, DeviceType, FeedQuery, FeedView, FilePicker,
    PostOutcome, Redirector, SelectedFile, Session, SessionHandle, TransferPhase,
    UploadTransferState, Visibility,
};

use crate::backend::{item, TempMedia, TestBackend, GOOD_TOKEN};

fn context(backend: &TestBackend, session: Option<Session>) -> ClientContext {
    let url = backend.url.clone();
    let config = ClientConfig::from_lookup(AppMode::Production, |key| match key {
        "BACKEND_URL" | "DASHBOARD_URL" => Some(url.clone()),
        "APP_ORIGIN" => Some("https://app.test".to_string()),
        _ => None,
    })
    .expect("config");
    ClientContext::from_config(config, Arc::new(SessionHandle::new(session))).expect("context")
}

struct OneFile(Mutex<Option<SelectedFile>>);

#[async_trait]
impl FilePicker for OneFile {
    async fn pick(&self, _accept: &[&str]) -> Result<Option<SelectedFile>, String> {
        Ok(self.0.lock().unwrap().take())
    }
}

#[derive(Default)]
struct CapturedRedirect(Mutex<Option<String>>);

impl Redirector for CapturedRedirect {
    fn open(&self, url: &str) {
        *self.0.lock().unwrap() = Some(url.to_string());
    }
}

#[tokio::test]
async fn upload_flow_publishes_picked_file() {
    let backend = TestBackend::start().await;
    let media = TempMedia::create("mp3", 64 * 1024);
    let ctx = context(&backend, Some(Session::new(GOOD_TOKEN)));
    let picked = SelectedFile::from_path(&media.0);
    let upload = ctx.upload(Arc::new(OneFile(Mutex::new(Some(picked)))));

    let phases = Arc::new(Mutex::new(Vec::new()));
    let sink = phases.clone();
    upload.subscribe(Arc::new(move |s: &UploadTransferState| {
        sink.lock().unwrap().push((s.phase, s.progress));
    }));

    upload.select_file().await.expect("file picked");
    let draft = upload.edit_draft(|d| {
        d.title = "Night drive".into();
        d.tags = "synthwave, night".into();
        d.visibility = Visibility::Unlisted;
    });
    let published = upload.submit(draft).await.expect("upload");
    assert_eq!(published.title, "Night drive");
    assert_eq!(upload.draft(), None);

    let uploads = backend.state.uploads.lock().unwrap().clone();
    assert_eq!(uploads[0].file_len, 64 * 1024);
    assert_eq!(uploads[0].content_type.as_deref(), Some("audio/mpeg"));
    assert_eq!(uploads[0].fields.get("tags").map(String::as_str), Some("synthwave, night"));
    assert_eq!(uploads[0].fields.get("visibility").map(String::as_str), Some("unlisted"));

    let phases = phases.lock().unwrap().clone();
    assert_eq!(phases.last().map(|p| p.0), Some(TransferPhase::Succeeded));
    let progress: Vec<f32> = phases.iter().map(|p| p.1).collect();
    assert!(progress.windows(2).all(|w| w[0] <= w[1]));
}

#[tokio::test]
async fn rejected_upload_keeps_draft() {
    let backend = TestBackend::start().await;
    let media = TempMedia::create("mp4", 1024);
    let ctx = context(&backend, Some(Session::new("expired")));
    let upload = ctx.upload(Arc::new(OneFile(Mutex::new(Some(SelectedFile::from_path(
        &media.0,
    ))))));

    upload.select_file().await.unwrap();
    let draft = upload.edit_draft(|d| d.title = "Retry me".into());
    let err = upload.submit(draft.clone()).await.unwrap_err();

    assert_eq!(err.user_message(), "Failed to upload content");
    assert_eq!(upload.draft(), Some(draft));
    assert_eq!(upload.transfer_state().phase, TransferPhase::Failed);
}

#[tokio::test]
async fn comment_flow_refetches_after_posting() {
    let backend = TestBackend::start().await;
    let ctx = context(&backend, Some(Session::new(GOOD_TOKEN)));
    let engagement = ctx.engagement();

    assert!(engagement.fetch_comments("content-9").await.unwrap().is_empty());
    assert_eq!(
        engagement.post_comment("content-9", "   ").await.unwrap(),
        PostOutcome::Skipped
    );

    let PostOutcome::Posted(thread) = engagement
        .post_comment("content-9", "great track")
        .await
        .unwrap()
    else {
        panic!("expected the comment to be posted");
    };
    assert_eq!(thread.len(), 1);
    assert_eq!(thread[0].text, "great track");
    assert_eq!(thread[0].author_label(), "fan@example.com");
    assert_eq!(engagement.thread(), thread);
}

#[tokio::test]
async fn view_events_are_recorded_with_bearer() {
    let backend = TestBackend::start().await;
    let ctx = context(&backend, Some(Session::new(GOOD_TOKEN)));

    ctx.engagement()
        .record_view("content-3", DeviceType::Mobile)
        .await
        .unwrap();

    let views = backend.state.views.lock().unwrap().clone();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].0["content_id"], "content-3");
    assert_eq!(views[0].0["device_type"], "mobile");
    assert_eq!(views[0].1.as_deref(), Some(GOOD_TOKEN));
}

#[tokio::test]
async fn checkout_flow_redirects_to_provider() {
    let backend = TestBackend::start().await;
    let ctx = context(&backend, None);
    let redirect = Arc::new(CapturedRedirect::default());
    let checkout = ctx.checkout(redirect.clone());

    assert!(checkout.request_checkout_custom("creator-1", "").await.is_err());
    assert!(backend.state.checkouts.lock().unwrap().is_empty());

    let session = checkout.request_checkout("creator-1", 25.0).await.unwrap();
    assert_eq!(session.session_id.as_deref(), Some("cs_test_1"));
    assert_eq!(
        redirect.0.lock().unwrap().as_deref(),
        Some("https://checkout.test/session/cs_test_1")
    );

    let sent = backend.state.checkouts.lock().unwrap().clone();
    assert_eq!(sent[0]["success_url"], "https://app.test/tip/success");
    assert_eq!(sent[0]["currency"], "usd");
}

#[tokio::test]
async fn feed_and_dashboard_render_states() {
    let backend = TestBackend::start().await;
    let ctx = context(&backend, Some(Session::new(GOOD_TOKEN)));
    let feed = ctx.feed();

    assert_eq!(feed.fetch_feed(&FeedQuery::default()).await.unwrap(), FeedView::Empty);
    {
        let queries = backend.state.feed_queries.lock().unwrap();
        assert_eq!(queries[0].get("limit").map(String::as_str), Some("20"));
        assert_eq!(queries[0].get("offset").map(String::as_str), Some("0"));
        assert_eq!(queries[0].get("visibility").map(String::as_str), Some("public"));
    }

    backend.state.feed.lock().unwrap().push(item("a", "First"));
    let refreshed = feed.refresh().await.unwrap();
    assert_eq!(refreshed.items().len(), 1);

    let summary = feed.fetch_dashboard_stats().await.unwrap().summary();
    assert_eq!(summary.watch_hours, 1.5);
    assert_eq!(summary.average_views_per_content, 300.0);
    assert_eq!(summary.engagement_rate, 5.0);
    assert_eq!(summary.average_tip, Some(10.0));

    let missing = feed.fetch_content("missing").await.unwrap_err();
    assert_eq!(missing.status, Some(404));
}
