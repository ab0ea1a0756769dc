//! Listing error types.
//!
//! Every failure the service reports is rendered as a JSON object with a
//! single `error` field. [`ListingError`] carries the message together with
//! the HTTP status it maps to, so the HTTP layer never has to re-classify.

use std::fmt;

/// Error categories the service can report to a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum ListingErrorCode {
    /// The listing under the requested prefix was empty.
    NotFound,
    /// No upstream credentials could be resolved.
    MissingCredentials,
    /// Upstream credentials were found but are incomplete or unusable.
    IncompleteCredentials,
    /// The configured bucket does not exist.
    NoSuchBucket,
    /// The store rejected the request for lack of permission.
    AccessDenied,
    /// Any other client-side error code reported by the store.
    ClientError,
    /// The upstream call did not finish within the configured timeout.
    UpstreamTimeout,
    /// The request path did not match any route.
    RouteNotFound,
    /// The route exists but not for this HTTP method.
    MethodNotAllowed,
    /// Catch-all for unexpected failures.
    #[default]
    InternalError,
}

impl ListingErrorCode {
    /// Returns the error code as a string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "NotFound",
            Self::MissingCredentials => "MissingCredentials",
            Self::IncompleteCredentials => "IncompleteCredentials",
            Self::NoSuchBucket => "NoSuchBucket",
            Self::AccessDenied => "AccessDenied",
            Self::ClientError => "ClientError",
            Self::UpstreamTimeout => "UpstreamTimeout",
            Self::RouteNotFound => "RouteNotFound",
            Self::MethodNotAllowed => "MethodNotAllowed",
            Self::InternalError => "InternalError",
        }
    }

    /// Returns the HTTP status code for this error category.
    #[must_use]
    pub fn default_status_code(&self) -> http::StatusCode {
        match self {
            Self::NotFound | Self::NoSuchBucket | Self::RouteNotFound => {
                http::StatusCode::NOT_FOUND
            }
            Self::MissingCredentials | Self::IncompleteCredentials | Self::AccessDenied => {
                http::StatusCode::FORBIDDEN
            }
            Self::ClientError => http::StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed => http::StatusCode::METHOD_NOT_ALLOWED,
            Self::UpstreamTimeout => http::StatusCode::GATEWAY_TIMEOUT,
            Self::InternalError => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Map an upstream client error code onto a category.
    ///
    /// `NoSuchBucket` and `AccessDenied` get their own categories, every
    /// other code becomes a generic [`ListingErrorCode::ClientError`].
    #[must_use]
    pub fn from_store_code(code: &str) -> Self {
        match code {
            "NoSuchBucket" => Self::NoSuchBucket,
            "AccessDenied" => Self::AccessDenied,
            _ => Self::ClientError,
        }
    }
}

impl fmt::Display for ListingErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error ready to be rendered as an HTTP response.
#[derive(Debug)]
pub struct ListingError {
    /// The error category.
    pub code: ListingErrorCode,
    /// Human-readable message placed in the `error` field.
    pub message: String,
    /// HTTP status code of the response.
    pub status_code: http::StatusCode,
    /// Underlying cause, if any. Never serialized.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for ListingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ListingError({}): {}", self.code, self.message)
    }
}

impl std::error::Error for ListingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl ListingError {
    /// Create an error with a custom message.
    #[must_use]
    pub fn with_message(code: ListingErrorCode, message: impl Into<String>) -> Self {
        Self {
            status_code: code.default_status_code(),
            message: message.into(),
            code,
            source: None,
        }
    }

    /// Attach an underlying cause.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // -- Convenience constructors --

    /// The prefix resolved to an empty listing.
    #[must_use]
    pub fn no_content(prefix: &str) -> Self {
        Self::with_message(
            ListingErrorCode::NotFound,
            format!("No content found for path '{prefix}'"),
        )
    }

    /// No credentials were available to sign the upstream request.
    #[must_use]
    pub fn missing_credentials() -> Self {
        Self::with_message(
            ListingErrorCode::MissingCredentials,
            "AWS credentials are missing",
        )
    }

    /// Credentials were found but could not be used.
    #[must_use]
    pub fn incomplete_credentials() -> Self {
        Self::with_message(
            ListingErrorCode::IncompleteCredentials,
            "Incomplete AWS credentials",
        )
    }

    /// The store answered with a client-side error code.
    #[must_use]
    pub fn store_client_error(code: &str, message: Option<&str>) -> Self {
        let text = match message {
            Some(m) if !m.is_empty() => format!("{code}: {m}"),
            _ => code.to_owned(),
        };
        Self::with_message(ListingErrorCode::from_store_code(code), text)
    }

    /// The upstream call timed out.
    #[must_use]
    pub fn upstream_timeout(detail: impl fmt::Display) -> Self {
        Self::with_message(
            ListingErrorCode::UpstreamTimeout,
            format!("Upstream storage request timed out: {detail}"),
        )
    }

    /// No route matches the request path.
    #[must_use]
    pub fn route_not_found(path: &str) -> Self {
        Self::with_message(
            ListingErrorCode::RouteNotFound,
            format!("No route for path '{path}'"),
        )
    }

    /// The route does not accept this method.
    #[must_use]
    pub fn method_not_allowed(method: &http::Method) -> Self {
        Self::with_message(
            ListingErrorCode::MethodNotAllowed,
            format!("Method {method} is not allowed"),
        )
    }

    /// Unexpected failure; the detail is passed through to the caller.
    #[must_use]
    pub fn internal_error(detail: impl Into<String>) -> Self {
        Self::with_message(ListingErrorCode::InternalError, detail)
    }
}
