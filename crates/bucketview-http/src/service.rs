//! The BucketView HTTP service implementing hyper's `Service` trait.
//!
//! [`BucketViewHttpService`] runs each request through:
//!
//! 1. Route resolution ([`resolve_route`])
//! 2. Static answers for the welcome and health routes
//! 3. Dispatch of listing requests to the [`ListingHandler`]
//! 4. JSON serialization of the result or error
//! 5. Common response headers (`x-request-id`, `server`)
//!
//! The request body is never read. hyper drops the response body for
//! `HEAD` requests on its own.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bucketview_model::output::HealthOutput;
use hyper::body::Incoming;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::body::BucketViewResponseBody;
use crate::dispatch::{ListingHandler, dispatch_listing};
use crate::response::{error_to_response, json_response, text_response};
use crate::router::{Route, resolve_route};

/// Default welcome text served on `GET /`.
pub const WELCOME_MESSAGE: &str = "Welcome to the S3 Bucket Content Viewer!";

/// Configuration for the HTTP service.
#[derive(Debug, Clone)]
pub struct BucketViewHttpConfig {
    /// Bucket name reported by the health route.
    pub bucket: String,
    /// Text served on `GET /`.
    pub welcome_message: String,
}

impl Default for BucketViewHttpConfig {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            welcome_message: WELCOME_MESSAGE.to_owned(),
        }
    }
}

/// Hyper `Service` for the listing API.
#[derive(Debug)]
pub struct BucketViewHttpService<H: ListingHandler> {
    handler: Arc<H>,
    config: Arc<BucketViewHttpConfig>,
}

impl<H: ListingHandler> BucketViewHttpService<H> {
    /// Create a new service around a shared handler.
    pub fn new(handler: Arc<H>, config: BucketViewHttpConfig) -> Self {
        Self {
            handler,
            config: Arc::new(config),
        }
    }
}

impl<H: ListingHandler> Clone for BucketViewHttpService<H> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
            config: Arc::clone(&self.config),
        }
    }
}

impl<H: ListingHandler> hyper::service::Service<http::Request<Incoming>>
    for BucketViewHttpService<H>
{
    type Response = http::Response<BucketViewResponseBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<Incoming>) -> Self::Future {
        let handler = Arc::clone(&self.handler);
        let config = Arc::clone(&self.config);
        let request_id = Uuid::new_v4().to_string();

        Box::pin(async move {
            let response = process_request(
                req.method(),
                req.uri(),
                handler.as_ref(),
                &config,
                &request_id,
            )
            .await;
            Ok(add_common_headers(response, &request_id))
        })
    }
}

/// Process a single request. Only the method and URI are inspected.
async fn process_request<H: ListingHandler>(
    method: &http::Method,
    uri: &http::Uri,
    handler: &H,
    config: &BucketViewHttpConfig,
    request_id: &str,
) -> http::Response<BucketViewResponseBody> {
    debug!(%method, %uri, request_id, "processing request");

    let route = match resolve_route(method, uri.path()) {
        Ok(route) => route,
        Err(err) => {
            warn!(%method, %uri, error = %err, request_id, "failed to route request");
            return error_to_response(&err);
        }
    };

    debug!(route = route.as_str(), request_id, "resolved route");

    match route {
        Route::Welcome => text_response(&config.welcome_message),
        Route::Health => json_response(
            http::StatusCode::OK,
            &HealthOutput::running(config.bucket.as_str()),
        ),
        Route::ListContent { path } => {
            info!(path = %path, request_id, "routed listing request");
            match dispatch_listing(handler, path, request_id).await {
                Ok(output) => json_response(http::StatusCode::OK, &output),
                Err(err) => {
                    if err.status_code.is_server_error() {
                        warn!(code = %err.code, error = %err.message, request_id, "listing failed");
                    } else {
                        debug!(code = %err.code, error = %err.message, request_id, "listing rejected");
                    }
                    error_to_response(&err)
                }
            }
        }
    }
}

/// Add common response headers to every response.
fn add_common_headers(
    mut response: http::Response<BucketViewResponseBody>,
    request_id: &str,
) -> http::Response<BucketViewResponseBody> {
    let headers = response.headers_mut();

    if let Ok(hv) = http::HeaderValue::from_str(request_id) {
        headers.entry("x-request-id").or_insert(hv);
    }
    headers.insert("server", http::HeaderValue::from_static("BucketView"));

    response
}
