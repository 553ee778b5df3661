use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::error::UploadError;
use crate::session::SessionProvider;
use crate::transfer::{FilePart, MultipartForm, Payload, PostOptions, ProgressFn, Transport};
use crate::types::{ContentItem, Visibility};

pub const UPLOAD_PATH: &str = "/content/upload";

/// Mime filters handed to the picker. The controller trusts the picker's filtering.
pub const ACCEPTED_MIME_TYPES: [&str; 2] = ["video/*", "audio/*"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub uri: String,
    pub mime_type: String,
    pub name: String,
}

impl SelectedFile {
    /// Describe a local file, guessing the mime type from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self {
            uri: path.to_string_lossy().into_owned(),
            mime_type,
            name,
        }
    }

    fn part(&self) -> FilePart {
        FilePart {
            field: "file".to_string(),
            path: PathBuf::from(&self.uri),
            file_name: self.name.clone(),
            mime_type: self.mime_type.clone(),
        }
    }
}

/// Platform file chooser.
#[async_trait]
pub trait FilePicker: Send + Sync {
    /// `Ok(None)` when the user dismissed the picker.
    async fn pick(&self, accept: &[&str]) -> Result<Option<SelectedFile>, String>;
}

/// Form state of one upload. Tags stay a raw comma-separated string; the backend
/// splits them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadDraft {
    pub file: Option<SelectedFile>,
    pub title: String,
    pub description: String,
    pub tags: String,
    pub visibility: Visibility,
}

impl UploadDraft {
    pub fn for_file(file: SelectedFile) -> Self {
        Self {
            file: Some(file),
            ..Self::default()
        }
    }

    pub fn is_submittable(&self) -> bool {
        self.validated_file().is_ok()
    }

    fn validated_file(&self) -> Result<&SelectedFile, UploadError> {
        let file = self
            .file
            .as_ref()
            .ok_or_else(|| UploadError::Validation("no file selected".to_string()))?;
        if self.title.trim().is_empty() {
            return Err(UploadError::Validation("title is required".to_string()));
        }
        Ok(file)
    }

    fn to_form(&self, file: &SelectedFile) -> MultipartForm {
        MultipartForm::new()
            .file(file.part())
            .text("title", self.title.clone())
            .text("description", self.description.clone())
            .text("tags", self.tags.clone())
            .text("visibility", self.visibility.as_str())
    }
}

/// Controller lifecycle for one draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStage {
    Idle,
    FileSelected,
    Validating,
    Uploading,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransferPhase {
    #[default]
    Idle,
    Uploading,
    Succeeded,
    Failed,
}

impl TransferPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransferPhase::Succeeded | TransferPhase::Failed)
    }
}

/// What the progress UI renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadTransferState {
    pub phase: TransferPhase,
    /// Percent in `[0, 100]`, non-decreasing while uploading.
    pub progress: f32,
    /// User-facing message of the last failure.
    pub error: Option<String>,
}

pub type TransferObserver = Arc<dyn Fn(&UploadTransferState) + Send + Sync>;

#[derive(Debug)]
struct Inner {
    stage: UploadStage,
    draft: Option<UploadDraft>,
    transfer: UploadTransferState,
    attempt: u64,
}

/// Drives file selection, validation and the multipart upload of one draft at a
/// time.
#[derive(Clone)]
pub struct UploadController {
    transport: Arc<dyn Transport>,
    session: Arc<dyn SessionProvider>,
    picker: Arc<dyn FilePicker>,
    inner: Arc<Mutex<Inner>>,
    observers: Arc<Mutex<Vec<TransferObserver>>>,
}

impl UploadController {
    pub fn new(
        transport: Arc<dyn Transport>,
        session: Arc<dyn SessionProvider>,
        picker: Arc<dyn FilePicker>,
    ) -> Self {
        Self {
            transport,
            session,
            picker,
            inner: Arc::new(Mutex::new(Inner {
                stage: UploadStage::Idle,
                draft: None,
                transfer: UploadTransferState::default(),
                attempt: 0,
            })),
            observers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Called with every transfer-state change, including progress ticks.
    pub fn subscribe(&self, observer: TransferObserver) {
        lock(&self.observers).push(observer);
    }

    pub fn stage(&self) -> UploadStage {
        lock(&self.inner).stage
    }

    pub fn draft(&self) -> Option<UploadDraft> {
        lock(&self.inner).draft.clone()
    }

    pub fn transfer_state(&self) -> UploadTransferState {
        lock(&self.inner).transfer.clone()
    }

    /// Apply a form edit. Creates an empty draft (no file yet) if needed.
    pub fn edit_draft<F>(&self, edit: F) -> UploadDraft
    where
        F: FnOnce(&mut UploadDraft),
    {
        let mut inner = lock(&self.inner);
        let draft = inner.draft.get_or_insert_with(UploadDraft::default);
        edit(draft);
        draft.clone()
    }

    pub async fn select_file(&self) -> Result<UploadDraft, UploadError> {
        if self.stage() == UploadStage::Uploading {
            return Err(UploadError::AlreadyInProgress);
        }

        let picked = self.picker.pick(&ACCEPTED_MIME_TYPES).await.map_err(|e| {
            error!("upload.select_file: picker failed: {}", e);
            UploadError::Picker(e)
        })?;
        let Some(file) = picked else {
            debug!("upload.select_file: cancelled");
            return Err(UploadError::FilePickerCancelled);
        };

        let mut inner = lock(&self.inner);
        if inner.stage == UploadStage::Uploading {
            return Err(UploadError::AlreadyInProgress);
        }
        info!(
            "upload.select_file: name={} mime={}",
            file.name, file.mime_type
        );
        let draft = inner.draft.get_or_insert_with(UploadDraft::default);
        draft.file = Some(file);
        let draft = draft.clone();
        inner.stage = UploadStage::FileSelected;
        Ok(draft)
    }

    /// Upload `draft`. Fails fast, without a network call, on a missing file or
    /// title, and when another submission of this controller is in flight.
    pub async fn submit(&self, draft: UploadDraft) -> Result<ContentItem, UploadError> {
        let (file, attempt, started) = {
            let mut inner = lock(&self.inner);
            if inner.stage == UploadStage::Uploading {
                warn!("upload.submit: rejected, upload already in progress");
                return Err(UploadError::AlreadyInProgress);
            }

            inner.stage = UploadStage::Validating;
            let file = match draft.validated_file().cloned() {
                Ok(file) => file,
                Err(e) => {
                    inner.stage = if draft.file.is_some() {
                        UploadStage::FileSelected
                    } else {
                        UploadStage::Idle
                    };
                    inner.draft = Some(draft);
                    debug!("upload.submit: {}", e);
                    return Err(e);
                }
            };

            inner.stage = UploadStage::Uploading;
            inner.attempt += 1;
            inner.draft = Some(draft.clone());
            inner.transfer = UploadTransferState {
                phase: TransferPhase::Uploading,
                progress: 0.0,
                error: None,
            };
            (file, inner.attempt, inner.transfer.clone())
        };
        self.notify(&started);

        let mut guard = InFlight {
            controller: self,
            attempt,
            settled: false,
        };

        info!(
            "upload.submit: attempt={} name={} visibility={}",
            attempt,
            file.name,
            draft.visibility.as_str()
        );
        let options = PostOptions::auth(self.session.access_token())
            .with_progress(self.progress_sink(attempt));
        let result = self
            .transport
            .post(UPLOAD_PATH, Payload::Multipart(draft.to_form(&file)), options)
            .await
            .and_then(|body| body.json::<ContentItem>());
        guard.settled = true;

        match result {
            Ok(item) => {
                let state = {
                    let mut inner = lock(&self.inner);
                    inner.stage = UploadStage::Succeeded;
                    inner.transfer.phase = TransferPhase::Succeeded;
                    inner.transfer.error = None;
                    let state = inner.transfer.clone();
                    inner.draft = None;
                    inner.stage = UploadStage::Idle;
                    state
                };
                info!("upload.submit: uploaded content id={}", item.id);
                self.notify(&state);
                Ok(item)
            }
            Err(e) => {
                let err = UploadError::Transfer(e);
                let state = {
                    let mut inner = lock(&self.inner);
                    inner.stage = UploadStage::Failed;
                    inner.transfer.phase = TransferPhase::Failed;
                    inner.transfer.error = Some(err.user_message());
                    let state = inner.transfer.clone();
                    inner.stage = UploadStage::FileSelected;
                    state
                };
                error!("upload.submit: attempt={} failed: {}", attempt, err);
                self.notify(&state);
                Err(err)
            }
        }
    }

    /// The UI has shown the terminal state; go back to idle.
    pub fn acknowledge(&self) {
        let state = {
            let mut inner = lock(&self.inner);
            if !inner.transfer.phase.is_terminal() {
                return;
            }
            inner.transfer = UploadTransferState::default();
            inner.transfer.clone()
        };
        self.notify(&state);
    }

    /// Drop the draft entirely (e.g. the user cleared the form).
    pub fn discard_draft(&self) {
        let mut inner = lock(&self.inner);
        if inner.stage == UploadStage::Uploading {
            return;
        }
        inner.draft = None;
        inner.stage = UploadStage::Idle;
    }

    fn progress_sink(&self, attempt: u64) -> ProgressFn {
        let inner = self.inner.clone();
        let observers = self.observers.clone();
        Arc::new(move |value: f32| {
            let state = {
                let mut inner = lock(&inner);
                let current = inner.attempt == attempt
                    && inner.transfer.phase == TransferPhase::Uploading;
                if !current || value < inner.transfer.progress {
                    return;
                }
                inner.transfer.progress = value.clamp(0.0, 100.0);
                inner.transfer.clone()
            };
            notify_all(&observers, &state);
        })
    }

    fn notify(&self, state: &UploadTransferState) {
        notify_all(&self.observers, state);
    }
}

/// Restores the controller if a submit future is dropped before settling, so an
/// abandoned screen does not leave the draft locked in `Uploading`.
struct InFlight<'a> {
    controller: &'a UploadController,
    attempt: u64,
    settled: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut inner = lock(&self.controller.inner);
        if inner.attempt == self.attempt && inner.stage == UploadStage::Uploading {
            debug!("upload.submit: attempt={} abandoned", self.attempt);
            inner.stage = UploadStage::FileSelected;
            inner.transfer = UploadTransferState::default();
        }
    }
}

fn notify_all(observers: &Mutex<Vec<TransferObserver>>, state: &UploadTransferState) {
    let observers = lock(observers).clone();
    for observer in observers {
        observer(state);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}
