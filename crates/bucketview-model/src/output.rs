//! JSON response payloads.

use serde::{Deserialize, Serialize};

/// Successful listing: the first-level entries under a prefix.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListContentOutput {
    /// Listing entries in store order.
    pub content: Vec<String>,
}

/// Error payload: `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorOutput {
    /// Human-readable error message.
    pub error: String,
}

/// Health probe payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthOutput {
    /// Always `"running"` while the process is serving.
    pub status: String,
    /// The bucket this instance lists.
    pub bucket: String,
}

impl HealthOutput {
    /// Health payload for a serving instance.
    #[must_use]
    pub fn running(bucket: impl Into<String>) -> Self {
        Self {
            status: "running".to_owned(),
            bucket: bucket.into(),
        }
    }
}
