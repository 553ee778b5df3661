//! Error taxonomy shared by the flow controllers.
//!
//! Validation failures never reach the network. Transport failures collapse into
//! [`TransferError`] and are wrapped by the flow that issued the request. Every
//! user-facing error offers [`user_message`](UploadError::user_message) text that
//! hides raw transport detail.

use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferErrorKind {
    Network,
    HttpStatus,
    Timeout,
    /// A 2xx response whose body did not match the expected shape.
    Decode,
}

impl fmt::Display for TransferErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TransferErrorKind::Network => "network",
            TransferErrorKind::HttpStatus => "http-status",
            TransferErrorKind::Timeout => "timeout",
            TransferErrorKind::Decode => "decode",
        })
    }
}

/// A failed HTTP exchange.
#[derive(Debug, Clone, Error)]
#[error("{kind} error: {message}")]
pub struct TransferError {
    pub kind: TransferErrorKind,
    pub status: Option<u16>,
    pub body: Option<String>,
    message: String,
}

impl TransferError {
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            kind: TransferErrorKind::Network,
            status: None,
            body: None,
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            kind: TransferErrorKind::Timeout,
            status: None,
            body: None,
            message: message.into(),
        }
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        Self {
            kind: TransferErrorKind::HttpStatus,
            status: Some(status),
            message: format!("unexpected status {status}"),
            body: Some(body),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            kind: TransferErrorKind::Decode,
            status: None,
            body: None,
            message: message.into(),
        }
    }

    /// The server rejected the credential (or lack of one).
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status, Some(401) | Some(403))
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<reqwest::Error> for TransferError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransferError::timeout(err.to_string())
        } else if err.is_decode() {
            TransferError::decode(err.to_string())
        } else if let Some(status) = err.status() {
            TransferError::status(status.as_u16(), String::new())
        } else {
            TransferError::network(err.to_string())
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum UploadError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("an upload is already in progress")]
    AlreadyInProgress,

    #[error("file selection cancelled")]
    FilePickerCancelled,

    #[error("file picker failed: {0}")]
    Picker(String),

    #[error(transparent)]
    Transfer(#[from] TransferError),
}

impl UploadError {
    pub fn user_message(&self) -> String {
        match self {
            UploadError::Validation(_) => "Please select a file and enter a title".to_string(),
            UploadError::AlreadyInProgress => "An upload is already in progress".to_string(),
            UploadError::FilePickerCancelled => String::new(),
            UploadError::Picker(_) => "Failed to pick file".to_string(),
            UploadError::Transfer(_) => "Failed to upload content".to_string(),
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum CheckoutError {
    #[error("invalid tip amount: {0}")]
    InvalidAmount(String),

    #[error("checkout response did not include a checkout url")]
    MissingCheckoutUrl,

    #[error(transparent)]
    Transfer(#[from] TransferError),
}

impl CheckoutError {
    pub fn user_message(&self) -> String {
        match self {
            CheckoutError::InvalidAmount(_) => "Please enter a valid amount".to_string(),
            _ => "Failed to process tip. Please try again.".to_string(),
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum CommentError {
    #[error(transparent)]
    Transfer(#[from] TransferError),
}

impl CommentError {
    pub fn user_message(&self) -> String {
        "Failed to submit comment".to_string()
    }
}

#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("{0} must be set in production mode")]
    Missing(&'static str),

    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}
