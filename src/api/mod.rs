//! Backend access
//!
//! The backend is a plain REST/JSON service. [`ApiClient`] is built with an
//! explicit [`Session`]; there is no ambient token lookup. Requests are not
//! retried and use the HTTP client's default timeouts. Dropping a returned
//! future cancels its request.

mod client;
mod error;
pub mod listing;
pub mod models;
pub mod upload;

pub use client::{ApiClient, Session};
pub use error::ClientError;
pub use listing::{merge_listing, AssetKind, ListingEntry};
pub use upload::{validate_upload, PreviewState, UploadError, UploadFile};
