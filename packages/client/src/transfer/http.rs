use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use futures::TryStreamExt;
use reqwest::header::AUTHORIZATION;
use reqwest::multipart;
use reqwest::{Client, RequestBuilder, Response};
use tokio_util::codec::{BytesCodec, FramedRead};

use super::{Body, FilePart, MultipartForm, Payload, PostOptions, ProgressReporter, Transport};
use crate::config::Endpoints;
use crate::error::TransferError;

/// reqwest-backed [`Transport`] talking to the configured service hosts.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    endpoints: Endpoints,
    http: Client,
}

impl HttpTransport {
    /// `timeout = None` keeps reqwest's default (no overall deadline).
    pub fn new(endpoints: Endpoints, timeout: Option<Duration>) -> Result<Self, TransferError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self { endpoints, http })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    fn authorized(request: RequestBuilder, auth_token: Option<&str>) -> RequestBuilder {
        if let Some(token) = auth_token {
            request.header(AUTHORIZATION, format!("Bearer {}", token))
        } else {
            request
        }
    }

    async fn handle_response(response: Response) -> Result<Body, TransferError> {
        let status = response.status();
        if status.is_success() {
            return Ok(Body(response.bytes().await?));
        }

        let body = response.text().await.unwrap_or_default();
        Err(TransferError::status(status.as_u16(), body))
    }

    async fn multipart_form(
        form: MultipartForm,
        progress: &ProgressReporter,
    ) -> Result<multipart::Form, TransferError> {
        let mut out = multipart::Form::new();
        if let Some(file) = form.file {
            out = out.part(file.field.clone(), Self::file_part(file, progress).await?);
        }
        for (name, value) in form.fields {
            out = out.text(name, value);
        }
        Ok(out)
    }

    /// Stream the file from disk, reporting bytes as reqwest pulls them.
    async fn file_part(
        file: FilePart,
        progress: &ProgressReporter,
    ) -> Result<multipart::Part, TransferError> {
        let path = strip_file_scheme(&file.path);
        let handle = tokio::fs::File::open(&path)
            .await
            .map_err(|e| TransferError::network(format!("open {}: {e}", path.display())))?;
        let total = handle
            .metadata()
            .await
            .map_err(|e| TransferError::network(format!("stat {}: {e}", path.display())))?
            .len();

        let reporter = progress.clone();
        let mut loaded: u64 = 0;
        let stream = FramedRead::new(handle, BytesCodec::new()).map_ok(move |chunk| {
            loaded += chunk.len() as u64;
            reporter.bytes(loaded, total);
            chunk.freeze()
        });

        multipart::Part::stream_with_length(reqwest::Body::wrap_stream(stream), total)
            .file_name(file.file_name)
            .mime_str(&file.mime_type)
            .map_err(|e| TransferError::network(format!("invalid mime type: {e}")))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(
        &self,
        path: &str,
        query: &[(String, String)],
        auth_token: Option<&str>,
    ) -> Result<Body, TransferError> {
        let url = self.endpoints.url_for(path);
        tracing::debug!("transfer.get: {}", url);

        let mut request = self.http.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = Self::authorized(request, auth_token).send().await?;
        Self::handle_response(response).await
    }

    async fn post(
        &self,
        path: &str,
        payload: Payload,
        options: PostOptions,
    ) -> Result<Body, TransferError> {
        let url = self.endpoints.url_for(path);
        tracing::debug!("transfer.post: {} ({})", url, payload.content_kind());

        let progress = ProgressReporter::new(options.on_progress);
        let result: Result<Body, TransferError> = async {
            let request = match payload {
                Payload::Json(value) => self.http.post(&url).json(&value),
                Payload::Multipart(form) => self
                    .http
                    .post(&url)
                    .multipart(Self::multipart_form(form, &progress).await?),
            };
            let response = Self::authorized(request, options.auth_token.as_deref())
                .send()
                .await?;
            Self::handle_response(response).await
        }
        .await;
        progress.settle();

        if let Err(e) = &result {
            tracing::debug!("transfer.post: {} failed: {}", url, e);
        }
        result
    }
}

fn strip_file_scheme(path: &Path) -> std::path::PathBuf {
    match path.to_str().and_then(|p| p.strip_prefix("file://")) {
        Some(stripped) => std::path::PathBuf::from(stripped),
        None => path.to_path_buf(),
    }
}
