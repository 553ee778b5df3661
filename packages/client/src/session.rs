use std::sync::{Arc, RwLock};

/// An authenticated session as handed over by the sign-in layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub user_id: Option<String>,
}

impl Session {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            user_id: None,
        }
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

/// Read-only view of the current session.
///
/// Controllers only ever read the credential; refreshing or replacing it is the
/// sign-in layer's business.
pub trait SessionProvider: Send + Sync {
    fn session(&self) -> Option<Session>;

    fn access_token(&self) -> Option<String> {
        self.session().map(|s| s.access_token)
    }
}

/// Shared, writable session slot. The sign-in layer holds the handle and writes;
/// controllers receive it as `Arc<dyn SessionProvider>`.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionHandle {
    pub fn new(session: Option<Session>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(session)),
        }
    }

    pub fn set(&self, session: Option<Session>) {
        let mut slot = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *slot = session;
    }

    pub fn is_signed_in(&self) -> bool {
        self.session().is_some()
    }
}

impl SessionProvider for SessionHandle {
    fn session(&self) -> Option<Session> {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

/// A fixed session, handy for tests and one-shot tools.
impl SessionProvider for Option<Session> {
    fn session(&self) -> Option<Session> {
        self.clone()
    }
}
