use std::time::Duration;

use crate::error::ConfigError;

const LOCAL_CONTENT_URL: &str = "http://localhost:8004";
const LOCAL_DASHBOARD_URL: &str = "http://localhost:8007";
const LOCAL_APP_ORIGIN: &str = "http://localhost:8080";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Local,
    Production,
}

impl AppMode {
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("APP_MODE").unwrap_or_default())
    }

    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "local" => AppMode::Local,
            _ => AppMode::Production, // Default to production for safety
        }
    }
}

/// Base URLs of the backend services. Each request path is routed by its first
/// segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub content: String,
    pub dashboard: String,
    pub chat: String,
    pub payments: String,
}

impl Endpoints {
    /// All services behind one host.
    pub fn single(base_url: &str) -> Self {
        let base = normalize(base_url);
        Self {
            content: base.clone(),
            dashboard: base.clone(),
            chat: base.clone(),
            payments: base,
        }
    }

    pub fn base_for(&self, path: &str) -> &str {
        let first = path.trim_start_matches('/').split('/').next().unwrap_or_default();
        match first {
            "creator" => &self.dashboard,
            "chat" => &self.chat,
            "payments" => &self.payments,
            _ => &self.content,
        }
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_for(path), path.trim_start_matches('/'))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub mode: AppMode,
    pub endpoints: Endpoints,
    /// Origin used to build the tip success/cancel redirect targets.
    pub app_origin: String,
    /// `None` leaves the deadline to the HTTP stack.
    pub request_timeout: Option<Duration>,
}

impl ClientConfig {
    /// Load from process environment (after `.env`, see [`load_dotenv`]).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(AppMode::from_env(), |key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as missing.
    pub fn from_lookup<F>(mode: AppMode, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str, local_default: &str| match (get(key), mode) {
            (Some(v), _) => Ok(v),
            (None, AppMode::Local) => Ok(local_default.to_string()),
            (None, AppMode::Production) => Err(ConfigError::Missing(key)),
        };

        let content = normalize(&required("BACKEND_URL", LOCAL_CONTENT_URL)?);
        let dashboard = get("DASHBOARD_URL")
            .map(|v| normalize(&v))
            .unwrap_or_else(|| match mode {
                AppMode::Local => LOCAL_DASHBOARD_URL.to_string(),
                AppMode::Production => content.clone(),
            });
        let chat = get("CHAT_URL")
            .map(|v| normalize(&v))
            .unwrap_or_else(|| content.clone());
        let payments = get("PAYMENTS_URL")
            .map(|v| normalize(&v))
            .unwrap_or_else(|| content.clone());
        let app_origin = normalize(&required("APP_ORIGIN", LOCAL_APP_ORIGIN)?);

        let request_timeout = match get("HTTP_TIMEOUT_SECS") {
            None => None,
            Some(raw) => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or_else(|| ConfigError::Invalid {
                        key: "HTTP_TIMEOUT_SECS",
                        value: raw.clone(),
                    })?;
                Some(Duration::from_secs(secs))
            }
        };

        for (key, url) in [
            ("BACKEND_URL", &content),
            ("DASHBOARD_URL", &dashboard),
            ("CHAT_URL", &chat),
            ("PAYMENTS_URL", &payments),
            ("APP_ORIGIN", &app_origin),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Invalid {
                    key,
                    value: url.clone(),
                });
            }
        }

        Ok(Self {
            mode,
            endpoints: Endpoints {
                content,
                dashboard,
                chat,
                payments,
            },
            app_origin,
            request_timeout,
        })
    }

    /// Defaults for running against the local backend stack.
    pub fn local() -> Self {
        Self {
            mode: AppMode::Local,
            endpoints: Endpoints {
                content: LOCAL_CONTENT_URL.to_string(),
                dashboard: LOCAL_DASHBOARD_URL.to_string(),
                chat: LOCAL_CONTENT_URL.to_string(),
                payments: LOCAL_CONTENT_URL.to_string(),
            },
            app_origin: LOCAL_APP_ORIGIN.to_string(),
            request_timeout: None,
        }
    }
}

/// Best-effort `.env` loading; a missing file is not an error.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!("loaded env from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("failed to load .env: {e}"),
    }
}

fn normalize(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
