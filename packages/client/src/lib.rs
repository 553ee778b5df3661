//! Client-side flows for the creator/fan content platform.
//!
//! Every screen talks to the backend through one of the flow controllers in this
//! crate. Controllers are constructed with an explicit [`Transport`] and
//! [`SessionProvider`] so the UI never reaches for ambient global state.

pub mod checkout;
pub mod config;
pub mod engagement;
pub mod error;
pub mod feed;
pub mod format;
pub mod session;
pub mod transfer;
pub mod types;
pub mod upload;

#[cfg(test)]
mod test_support;


pub use checkout::{CheckoutController, Redirector, TipAmount, SUGGESTED_AMOUNTS};
pub use config::{AppMode, ClientConfig, Endpoints};
pub use engagement::{EngagementController, PostOutcome};
pub use error::{CheckoutError, CommentError, ConfigError, TransferError, TransferErrorKind, UploadError};
pub use feed::{FeedController, FeedView};
pub use session::{Session, SessionHandle, SessionProvider};
pub use transfer::{http::HttpTransport, Body, Payload, PostOptions, ProgressFn, Transport};
pub use types::{
    CheckoutSession, Comment, ContentItem, DashboardStats, DashboardSummary, DeviceType,
    FeedQuery, MediaKind, SearchResults, Visibility,
};
pub use upload::{
    FilePicker, SelectedFile, TransferPhase, UploadController, UploadDraft, UploadStage,
    UploadTransferState,
};

use std::sync::Arc;

/// Everything a screen needs to build its controller.
///
/// Cheap to clone; the transport and session are shared.
#[derive(Clone)]
pub struct ClientContext {
    pub config: ClientConfig,
    pub transport: Arc<dyn Transport>,
    pub session: Arc<dyn SessionProvider>,
}

impl std::fmt::Debug for ClientContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ClientContext {
    /// Build the production context: reqwest transport over the configured hosts.
    pub fn from_config(
        config: ClientConfig,
        session: Arc<dyn SessionProvider>,
    ) -> Result<Self, TransferError> {
        let transport = HttpTransport::new(config.endpoints.clone(), config.request_timeout)?;
        Ok(Self {
            config,
            transport: Arc::new(transport),
            session,
        })
    }

    pub fn feed(&self) -> FeedController {
        FeedController::new(self.transport.clone(), self.session.clone())
    }

    pub fn engagement(&self) -> EngagementController {
        EngagementController::new(self.transport.clone(), self.session.clone())
    }

    pub fn checkout(&self, redirector: Arc<dyn Redirector>) -> CheckoutController {
        CheckoutController::new(
            self.transport.clone(),
            self.session.clone(),
            redirector,
            &self.config.app_origin,
        )
    }

    pub fn upload(&self, picker: Arc<dyn FilePicker>) -> UploadController {
        UploadController::new(self.transport.clone(), self.session.clone(), picker)
    }
}
