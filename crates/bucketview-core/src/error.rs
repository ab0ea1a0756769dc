//! Object-store error taxonomy.

use bucketview_model::error::ListingError;

/// Failure of a single upstream list call, by category.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No credentials could be resolved by the provider chain.
    #[error("no credentials could be resolved")]
    MissingCredentials,

    /// Credentials were found but are incomplete or invalid.
    #[error("credentials are incomplete: {detail}")]
    IncompleteCredentials {
        /// Provider-reported reason.
        detail: String,
    },

    /// The store rejected the request with a machine-readable code.
    #[error("store returned error code {code}")]
    Client {
        /// Store error code, e.g. `NoSuchBucket`.
        code: String,
        /// Store-provided message, if any.
        message: Option<String>,
    },

    /// The call did not complete within the configured timeout.
    #[error("upstream request timed out: {detail}")]
    Timeout {
        /// What timed out.
        detail: String,
    },

    /// Anything else: transport failures, unparseable responses.
    #[error("{detail}")]
    Unexpected {
        /// Full error context.
        detail: String,
    },
}

impl StoreError {
    /// Short category name used in log events.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            Self::MissingCredentials => "missing_credentials",
            Self::IncompleteCredentials { .. } => "incomplete_credentials",
            Self::Client { .. } => "client",
            Self::Timeout { .. } => "timeout",
            Self::Unexpected { .. } => "unexpected",
        }
    }
}

impl From<StoreError> for ListingError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::MissingCredentials => Self::missing_credentials(),
            StoreError::IncompleteCredentials { .. } => Self::incomplete_credentials().with_source(err),
            StoreError::Client { code, message } => {
                Self::store_client_error(&code, message.as_deref())
            }
            StoreError::Timeout { detail } => Self::upstream_timeout(detail),
            StoreError::Unexpected { detail } => Self::internal_error(detail),
        }
    }
}
