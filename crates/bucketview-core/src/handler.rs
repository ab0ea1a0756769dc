//! Handler bridging the HTTP layer to the listing resolver.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bucketview_http::dispatch::ListingHandler;
use bucketview_model::error::ListingError;
use bucketview_model::output::ListContentOutput;
use tracing::{debug, warn};

use crate::config::ListingMode;
use crate::path::normalize_prefix;
use crate::resolver::ListingResolver;
use crate::store::ObjectStore;

/// Handler that serves `/list-bucket-content` requests from an
/// [`ObjectStore`].
#[derive(Debug, Clone)]
pub struct BucketViewHandler {
    resolver: ListingResolver,
}

impl BucketViewHandler {
    /// Create a new handler over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn ObjectStore>, mode: ListingMode) -> Self {
        Self {
            resolver: ListingResolver::new(store, mode),
        }
    }

    /// Bucket this handler lists.
    #[must_use]
    pub fn bucket(&self) -> &str {
        self.resolver.bucket()
    }
}

impl ListingHandler for BucketViewHandler {
    fn list_content(
        &self,
        path: String,
    ) -> Pin<Box<dyn Future<Output = Result<ListContentOutput, ListingError>> + Send>> {
        let resolver = self.resolver.clone();
        Box::pin(async move { list_content(&resolver, &path).await })
    }
}

async fn list_content(
    resolver: &ListingResolver,
    path: &str,
) -> Result<ListContentOutput, ListingError> {
    let prefix = normalize_prefix(path);

    let content = resolver.resolve(prefix).await.map_err(|err| {
        warn!(
            bucket = resolver.bucket(),
            prefix,
            category = err.category(),
            error = %err,
            "store listing failed",
        );
        ListingError::from(err)
    })?;

    if content.is_empty() {
        debug!(prefix, "no entries under prefix");
        return Err(ListingError::no_content(prefix));
    }

    debug!(prefix, entries = content.len(), "listed entries");
    Ok(ListContentOutput { content })
}
