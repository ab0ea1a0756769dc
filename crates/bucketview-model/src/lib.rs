//! Wire types and error taxonomy for BucketView.
//!
//! BucketView answers `GET /list-bucket-content/{path}` with the first-level
//! entries stored under `path` in a single object-storage bucket. This crate
//! holds the JSON payloads and the error categories shared by the HTTP layer
//! and the listing logic.

pub mod error;
pub mod output;

pub use error::{ListingError, ListingErrorCode};
pub use output::{ErrorOutput, HealthOutput, ListContentOutput};
