use std::sync::{Arc, Mutex};

use client::transfer::{FilePart, MultipartForm};
use client::{Endpoints, HttpTransport, Payload, PostOptions, ProgressFn, TransferErrorKind, Transport};

use crate::backend::{TempMedia, TestBackend, GOOD_TOKEN};

fn transport(url: &str) -> HttpTransport {
    HttpTransport::new(Endpoints::single(url), None).expect("build transport")
}

#[tokio::test]
async fn bearer_is_forwarded_and_rejections_surface_status() {
    let backend = TestBackend::start().await;
    let http = transport(&backend.url);

    let body = http
        .get("/creator/dashboard", &[], Some(GOOD_TOKEN))
        .await
        .expect("authorized dashboard");
    let stats: client::DashboardStats = body.json().expect("decode stats");
    assert_eq!(stats.total_views, 1200);
    assert_eq!(stats.tip_count, Some(3));

    let err = http
        .get("/creator/dashboard", &[], None)
        .await
        .expect_err("anonymous dashboard");
    assert_eq!(err.kind, TransferErrorKind::HttpStatus);
    assert_eq!(err.status, Some(401));
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn error_status_keeps_response_body() {
    let backend = TestBackend::start().await;
    let err = transport(&backend.url)
        .get("/content/missing", &[], None)
        .await
        .expect_err("missing content");
    assert_eq!(err.status, Some(404));
    assert_eq!(err.body.as_deref(), Some("content not found"));
}

#[tokio::test]
async fn query_parameters_reach_the_server() {
    let backend = TestBackend::start().await;
    let query = vec![
        ("limit".to_string(), "5".to_string()),
        ("tags".to_string(), "lofi,beats".to_string()),
    ];
    transport(&backend.url)
        .get("/content/feed", &query, None)
        .await
        .expect("feed");

    let seen = backend.state.feed_queries.lock().unwrap().clone();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].get("limit").map(String::as_str), Some("5"));
    assert_eq!(seen[0].get("tags").map(String::as_str), Some("lofi,beats"));
}

#[tokio::test]
async fn unreachable_host_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = transport(&format!("http://{addr}"))
        .get("/content/feed", &[], None)
        .await
        .expect_err("nothing listening");
    assert_eq!(err.kind, TransferErrorKind::Network);
}

#[tokio::test]
async fn multipart_upload_streams_file_and_reports_progress() {
    let backend = TestBackend::start().await;
    let media = TempMedia::create("mp4", 512 * 1024);

    let seen = Arc::new(Mutex::new(Vec::<f32>::new()));
    let sink = seen.clone();
    let on_progress: ProgressFn = Arc::new(move |p| sink.lock().unwrap().push(p));

    let form = MultipartForm::new()
        .file(FilePart {
            field: "file".into(),
            path: media.0.clone(),
            file_name: "clip.mp4".into(),
            mime_type: "video/mp4".into(),
        })
        .text("title", "Streamed")
        .text("visibility", "private");
    let body = transport(&backend.url)
        .post(
            "/content/upload",
            Payload::Multipart(form),
            PostOptions::auth(Some(GOOD_TOKEN.into())).with_progress(on_progress),
        )
        .await
        .expect("upload");
    let item: client::ContentItem = body.json().expect("decode item");
    assert_eq!(item.title, "Streamed");

    let uploads = backend.state.uploads.lock().unwrap().clone();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].file_len, 512 * 1024);
    assert_eq!(uploads[0].file_name.as_deref(), Some("clip.mp4"));
    assert_eq!(uploads[0].content_type.as_deref(), Some("video/mp4"));
    assert_eq!(uploads[0].fields.get("visibility").map(String::as_str), Some("private"));

    let progress = seen.lock().unwrap().clone();
    assert!(!progress.is_empty());
    assert!(progress.windows(2).all(|w| w[0] < w[1]));
    assert!(progress.iter().all(|p| (0.0..=100.0).contains(p)));
    assert_eq!(progress.last().copied(), Some(100.0));
}

#[tokio::test]
async fn missing_upload_file_fails_before_sending() {
    let backend = TestBackend::start().await;
    let form = MultipartForm::new().file(FilePart {
        field: "file".into(),
        path: std::env::temp_dir().join("definitely-not-here.mp4"),
        file_name: "gone.mp4".into(),
        mime_type: "video/mp4".into(),
    });

    let err = transport(&backend.url)
        .post(
            "/content/upload",
            Payload::Multipart(form),
            PostOptions::auth(Some(GOOD_TOKEN.into())),
        )
        .await
        .expect_err("missing file");
    assert_eq!(err.kind, TransferErrorKind::Network);
    assert!(backend.state.uploads.lock().unwrap().is_empty());
}
