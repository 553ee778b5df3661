use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::error::TransferError;

pub mod http;
pub mod progress;

pub use progress::ProgressReporter;

/// Upload progress sink, called with a percentage in `[0, 100]`.
pub type ProgressFn = Arc<dyn Fn(f32) + Send + Sync>;

/// Raw response body of a successful request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Body(pub Bytes);

impl Body {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, TransferError> {
        serde_json::from_slice(&self.0).map_err(|e| TransferError::decode(e.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&'static str> for Body {
    fn from(value: &'static str) -> Self {
        Body(Bytes::from_static(value.as_bytes()))
    }
}

impl From<serde_json::Value> for Body {
    fn from(value: serde_json::Value) -> Self {
        Body(Bytes::from(value.to_string()))
    }
}

/// A file streamed from disk as one multipart field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub field: String,
    pub path: PathBuf,
    pub file_name: String,
    pub mime_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    pub file: Option<FilePart>,
    pub fields: Vec<(String, String)>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, part: FilePart) -> Self {
        self.file = Some(part);
        self
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Request body; also decides the content kind on the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(serde_json::Value),
    Multipart(MultipartForm),
}

impl Payload {
    pub fn json<T: serde::Serialize>(value: &T) -> Result<Self, TransferError> {
        serde_json::to_value(value)
            .map(Payload::Json)
            .map_err(|e| TransferError::decode(e.to_string()))
    }

    pub fn content_kind(&self) -> &'static str {
        match self {
            Payload::Json(_) => "application/json",
            Payload::Multipart(_) => "multipart/form-data",
        }
    }
}

#[derive(Clone, Default)]
pub struct PostOptions {
    pub auth_token: Option<String>,
    pub on_progress: Option<ProgressFn>,
}

impl std::fmt::Debug for PostOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostOptions")
            .field("auth_token", &self.auth_token.as_ref().map(|_| "<redacted>"))
            .field("on_progress", &self.on_progress.is_some())
            .finish()
    }
}

impl PostOptions {
    pub fn auth(auth_token: Option<String>) -> Self {
        Self {
            auth_token,
            on_progress: None,
        }
    }

    pub fn with_progress(mut self, on_progress: ProgressFn) -> Self {
        self.on_progress = Some(on_progress);
        self
    }
}

/// Outbound HTTP seam used by every controller.
///
/// Implementations forward `auth_token` verbatim as a bearer credential and never
/// inspect it. Progress callbacks must stay within `[0, 100]`, never decrease and
/// never fire after the call returns.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(
        &self,
        path: &str,
        query: &[(String, String)],
        auth_token: Option<&str>,
    ) -> Result<Body, TransferError>;

    async fn post(
        &self,
        path: &str,
        payload: Payload,
        options: PostOptions,
    ) -> Result<Body, TransferError>;
}

/// Percent-encode a single path segment (ids are opaque strings).
pub fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
