//! Listing handler trait and dispatch.

use std::future::Future;
use std::pin::Pin;

use bucketview_model::error::ListingError;
use bucketview_model::output::ListContentOutput;

/// Trait that the listing business logic must implement.
///
/// The handler receives the decoded path parameter exactly as it appeared
/// in the URL (leading/trailing separators included) and is responsible for
/// normalizing it, querying the store, and classifying the outcome.
pub trait ListingHandler: Send + Sync + 'static {
    /// List the first-level entries under `path`.
    fn list_content(
        &self,
        path: String,
    ) -> Pin<Box<dyn Future<Output = Result<ListContentOutput, ListingError>> + Send>>;
}

/// Dispatch a listing request to the handler.
pub async fn dispatch_listing<H: ListingHandler>(
    handler: &H,
    path: String,
    request_id: &str,
) -> Result<ListContentOutput, ListingError> {
    tracing::debug!(path = %path, request_id, "dispatching listing request");
    handler.list_content(path).await
}
