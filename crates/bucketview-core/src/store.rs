//! The object-store boundary.
//!
//! [`ObjectStore`] is the single upstream operation the service consumes:
//! list object keys by prefix, first page only. The production
//! implementation is [`S3ObjectStore`](crate::s3::S3ObjectStore); tests
//! substitute in-memory fakes.

use std::fmt::Debug;

use crate::error::StoreError;

/// One page of object keys as returned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyPage {
    /// Full object keys, in store order.
    pub keys: Vec<String>,
    /// Whether the store holds more keys than this page carries.
    pub truncated: bool,
}

/// Read-only, list-by-prefix view of a single bucket.
///
/// The trait uses `#[async_trait]` so it can be held as
/// `Arc<dyn ObjectStore>`.
#[async_trait::async_trait]
pub trait ObjectStore: Debug + Send + Sync {
    /// Bucket this store lists.
    fn bucket(&self) -> &str;

    /// Issue exactly one list call for keys starting with `prefix`.
    ///
    /// No continuation token is followed; a truncated listing is reported
    /// through [`KeyPage::truncated`].
    async fn list_keys(&self, prefix: &str) -> Result<KeyPage, StoreError>;
}
