use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, error, info};

use crate::error::CheckoutError;
use crate::session::SessionProvider;
use crate::transfer::{Payload, PostOptions, Transport};
use crate::types::{CheckoutRequest, CheckoutSession};

pub const CHECKOUT_PATH: &str = "/payments/checkout";

/// Preset amounts offered by the tip dialog, in USD.
pub const SUGGESTED_AMOUNTS: [f64; 4] = [1.0, 5.0, 10.0, 25.0];

const CURRENCY: &str = "usd";

/// A positive, finite USD amount.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TipAmount(f64);

impl TipAmount {
    pub fn new(amount: f64) -> Result<Self, CheckoutError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(CheckoutError::InvalidAmount(amount.to_string()));
        }
        Ok(Self(amount))
    }

    /// Parse the custom amount field. Blank and non-numeric input is invalid.
    pub fn parse(raw: &str) -> Result<Self, CheckoutError> {
        let trimmed = raw.trim().trim_start_matches('$');
        let amount: f64 = trimmed
            .parse()
            .map_err(|_| CheckoutError::InvalidAmount(raw.to_string()))?;
        Self::new(amount)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for TipAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

/// Opens the provider's hosted checkout page outside the app.
pub trait Redirector: Send + Sync {
    fn open(&self, url: &str);
}

pub type CompletionFn = Arc<dyn Fn(&CheckoutSession) + Send + Sync>;

/// Turns a tip into a checkout session and hands the URL to the [`Redirector`].
///
/// Nothing is persisted between requests; the payment outcome arrives later on
/// the success/cancel routes.
#[derive(Clone)]
pub struct CheckoutController {
    transport: Arc<dyn Transport>,
    session: Arc<dyn SessionProvider>,
    redirector: Arc<dyn Redirector>,
    success_url: String,
    cancel_url: String,
    on_complete: Option<CompletionFn>,
    busy: Arc<AtomicBool>,
}

impl CheckoutController {
    pub fn new(
        transport: Arc<dyn Transport>,
        session: Arc<dyn SessionProvider>,
        redirector: Arc<dyn Redirector>,
        app_origin: &str,
    ) -> Self {
        let origin = app_origin.trim_end_matches('/');
        Self {
            transport,
            session,
            redirector,
            success_url: format!("{origin}/tip/success"),
            cancel_url: format!("{origin}/tip/cancel"),
            on_complete: None,
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Fired once a session is received, before the redirect (closes the dialog).
    pub fn with_completion(mut self, on_complete: CompletionFn) -> Self {
        self.on_complete = Some(on_complete);
        self
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    pub async fn request_checkout(
        &self,
        creator_id: &str,
        amount: f64,
    ) -> Result<CheckoutSession, CheckoutError> {
        let amount = TipAmount::new(amount).inspect_err(|e| debug!("checkout: {}", e))?;
        self.checkout(creator_id, amount).await
    }

    pub async fn request_checkout_custom(
        &self,
        creator_id: &str,
        raw_amount: &str,
    ) -> Result<CheckoutSession, CheckoutError> {
        let amount = TipAmount::parse(raw_amount).inspect_err(|e| debug!("checkout: {}", e))?;
        self.checkout(creator_id, amount).await
    }

    async fn checkout(
        &self,
        creator_id: &str,
        amount: TipAmount,
    ) -> Result<CheckoutSession, CheckoutError> {
        debug!("checkout: creator={} amount={}", creator_id, amount);
        let request = CheckoutRequest {
            to_creator_id: creator_id.to_string(),
            amount: amount.value(),
            currency: CURRENCY.to_string(),
            success_url: self.success_url.clone(),
            cancel_url: self.cancel_url.clone(),
        };

        self.busy.store(true, Ordering::SeqCst);
        let result = self.create_session(&request).await;
        self.busy.store(false, Ordering::SeqCst);

        let session = result.inspect_err(|e| {
            error!("checkout: creator={} failed: {}", creator_id, e);
        })?;

        info!(
            "checkout: session={} creator={}",
            session.session_id.as_deref().unwrap_or("-"),
            creator_id
        );
        if let Some(on_complete) = &self.on_complete {
            on_complete(&session);
        }
        self.redirector.open(&session.checkout_url);
        Ok(session)
    }

    async fn create_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, CheckoutError> {
        let options = PostOptions::auth(self.session.access_token());
        let body = self
            .transport
            .post(CHECKOUT_PATH, Payload::json(request)?, options)
            .await?;
        let session: CheckoutSession = body.json()?;
        if session.checkout_url.trim().is_empty() {
            return Err(CheckoutError::MissingCheckoutUrl);
        }
        Ok(session)
    }
}
