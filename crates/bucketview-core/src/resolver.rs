//! The listing resolver.
//!
//! Turns one page of object keys into the first-level entries under a
//! prefix. See [`first_level_entry`] for how a single key is reduced.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::warn;

use crate::config::ListingMode;
use crate::error::StoreError;
use crate::path::first_level_entry;
use crate::store::ObjectStore;

/// Resolves a normalized prefix to its first-level entries.
#[derive(Debug, Clone)]
pub struct ListingResolver {
    store: Arc<dyn ObjectStore>,
    mode: ListingMode,
}

impl ListingResolver {
    /// Create a resolver over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn ObjectStore>, mode: ListingMode) -> Self {
        Self { store, mode }
    }

    /// Bucket the underlying store lists.
    #[must_use]
    pub fn bucket(&self) -> &str {
        self.store.bucket()
    }

    /// Query the store once and derive the entries under `prefix`.
    ///
    /// `prefix` must already be normalized. Entries come back in store
    /// order. A truncated page is logged, never followed.
    pub async fn resolve(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let page = self.store.list_keys(prefix).await?;

        if page.truncated {
            warn!(
                bucket = self.store.bucket(),
                prefix,
                returned = page.keys.len(),
                "listing truncated, only the first page is reported",
            );
        }

        Ok(derive_entries(&page.keys, prefix, self.mode))
    }
}

/// Reduce object keys to first-level entries under `prefix`.
#[must_use]
pub fn derive_entries(keys: &[String], prefix: &str, mode: ListingMode) -> Vec<String> {
    let entries = keys.iter().filter_map(|key| first_level_entry(key, prefix));

    match mode {
        ListingMode::Raw => entries.map(ToOwned::to_owned).collect(),
        ListingMode::Unique => {
            let mut seen = HashSet::new();
            entries
                .filter(|entry| seen.insert(*entry))
                .map(ToOwned::to_owned)
                .collect()
        }
    }
}
