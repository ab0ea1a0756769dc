//! JSON and text response formatting.

use bucketview_model::error::{ListingError, ListingErrorCode};
use bucketview_model::output::ErrorOutput;
use serde::Serialize;
use tracing::error;

use crate::body::BucketViewResponseBody;
use crate::router::ALLOWED_METHODS;

/// Content type for JSON responses.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Content type for the welcome message.
pub const CONTENT_TYPE_TEXT: &str = "text/plain; charset=utf-8";

/// Serialize a [`ListingError`] into its JSON body.
///
/// ```json
/// { "error": "No content found for path 'docs'" }
/// ```
#[must_use]
pub fn error_to_json(error: &ListingError) -> Vec<u8> {
    let output = ErrorOutput {
        error: error.message.clone(),
    };
    serde_json::to_vec(&output).expect("JSON serialization of error cannot fail")
}

/// Convert a [`ListingError`] into a complete HTTP error response.
#[must_use]
pub fn error_to_response(error: &ListingError) -> http::Response<BucketViewResponseBody> {
    let mut builder = http::Response::builder()
        .status(error.status_code)
        .header("content-type", CONTENT_TYPE_JSON);

    if error.code == ListingErrorCode::MethodNotAllowed {
        builder = builder.header("allow", ALLOWED_METHODS);
    }

    builder
        .body(BucketViewResponseBody::from_json(error_to_json(error)))
        .expect("valid error response")
}

/// Build a JSON response with the given status.
#[must_use]
pub fn json_response<T: Serialize>(
    status: http::StatusCode,
    value: &T,
) -> http::Response<BucketViewResponseBody> {
    let json = match serde_json::to_vec(value) {
        Ok(json) => json,
        Err(e) => {
            error!(error = %e, "failed to serialize response body");
            return error_to_response(&ListingError::internal_error(format!(
                "Failed to serialize response: {e}"
            )));
        }
    };

    http::Response::builder()
        .status(status)
        .header("content-type", CONTENT_TYPE_JSON)
        .body(BucketViewResponseBody::from_json(json))
        .expect("valid JSON response")
}

/// Build a `200 OK` plain-text response.
#[must_use]
pub fn text_response(text: &str) -> http::Response<BucketViewResponseBody> {
    http::Response::builder()
        .status(http::StatusCode::OK)
        .header("content-type", CONTENT_TYPE_TEXT)
        .body(BucketViewResponseBody::from_string(text))
        .expect("valid text response")
}
