//! Errors surfaced by backend operations

use thiserror::Error;

use crate::checkout::CheckoutError;

use super::upload::UploadError;

/// Every failure is scoped to the action that caused it; nothing is retried.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Rejected locally; no request was sent
    #[error(transparent)]
    Upload(#[from] UploadError),

    /// Rejected locally; no request was sent
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// Backend answered with a non-success status
    #[error("{message}")]
    Http { status: u16, message: String },

    /// Missing or expired session
    #[error("Your session has expired. Please sign in again.")]
    Unauthorized,

    /// Connection, TLS or body decoding failure
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}

impl ClientError {
    /// True when the error was raised before any request was made
    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Upload(_) | ClientError::Checkout(_))
    }

    /// HTTP status of a backend rejection
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            ClientError::Unauthorized => Some(401),
            _ => None,
        }
    }
}
