//! Amazon S3 implementation of [`ObjectStore`].
//!
//! Wraps an `aws_sdk_s3::Client` and translates SDK failures into
//! [`StoreError`] categories:
//!
//! ```text
//! CredentialsError::CredentialsNotLoaded          -> MissingCredentials
//!   (half a key pair in the environment)          -> IncompleteCredentials
//! CredentialsError::InvalidConfiguration/Provider -> IncompleteCredentials
//! CredentialsError::ProviderTimedOut              -> Timeout
//! SdkError::TimeoutError, connect timeouts        -> Timeout
//! SdkError::ServiceError with a code              -> Client { code }
//! everything else                                 -> Unexpected
//! ```
//!
//! Credential failures surface from the SDK as dispatch failures, so the
//! whole source chain is searched for a [`CredentialsError`].
//!
//! The default chain reports a half-set environment key pair (an access key
//! without its secret, or the reverse) as `CredentialsNotLoaded`, the same
//! as no credentials at all. A not-loaded failure is therefore checked
//! against the environment and reported as incomplete when one half of the
//! pair is present.

use std::error::Error as StdError;

use aws_config::BehaviorVersion;
use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_credential_types::provider::error::CredentialsError;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Error;
use tracing::{debug, info};

use crate::config::BucketViewConfig;
use crate::error::StoreError;
use crate::store::{KeyPage, ObjectStore};

/// [`ObjectStore`] backed by `ListObjectsV2`.
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    /// Wrap an existing client.
    #[must_use]
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Build a client from the default provider chain, applying the
    /// region, endpoint, timeout and retry settings from `config`.
    pub async fn from_config(config: &BucketViewConfig) -> Self {
        let timeouts = TimeoutConfig::builder()
            .operation_timeout(config.upstream_timeout())
            .connect_timeout(config.upstream_connect_timeout())
            .build();

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .timeout_config(timeouts)
            .retry_config(RetryConfig::standard().with_max_attempts(config.upstream_max_attempts));

        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.force_path_style)
            .build();

        info!(
            bucket = %config.bucket_name,
            region = ?sdk_config.region(),
            endpoint = ?config.endpoint_url,
            force_path_style = config.force_path_style,
            "initialized S3 client",
        );

        Self::new(Client::from_conf(s3_config), config.bucket_name.clone())
    }
}

#[async_trait::async_trait]
impl ObjectStore for S3ObjectStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn list_keys(&self, prefix: &str) -> Result<KeyPage, StoreError> {
        debug!(bucket = %self.bucket, prefix, "listing objects");

        let output = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(prefix)
            .send()
            .await
            .map_err(|e| classify_sdk_error(&e, &env_var))?;

        let keys = output
            .contents()
            .iter()
            .filter_map(|object| object.key())
            .map(ToOwned::to_owned)
            .collect();

        Ok(KeyPage {
            keys,
            truncated: output.is_truncated().unwrap_or(false),
        })
    }
}

/// Variable lookup used to inspect the process environment.
type EnvLookup = dyn Fn(&str) -> Option<String>;

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Classify a failed `ListObjectsV2` call.
fn classify_sdk_error(err: &SdkError<ListObjectsV2Error>, env: &EnvLookup) -> StoreError {
    if let Some(cred_err) = find_credentials_error(err, env) {
        return cred_err;
    }

    if let Some(service_err) = err.as_service_error() {
        return classify_service_error(service_err);
    }

    match err {
        SdkError::TimeoutError(_) => StoreError::Timeout {
            detail: DisplayErrorContext(err).to_string(),
        },
        SdkError::DispatchFailure(failure) if failure.is_timeout() => StoreError::Timeout {
            detail: DisplayErrorContext(err).to_string(),
        },
        _ => StoreError::Unexpected {
            detail: DisplayErrorContext(err).to_string(),
        },
    }
}

/// Classify an error response returned by the store.
fn classify_service_error(err: &ListObjectsV2Error) -> StoreError {
    let code = match (err.code(), err) {
        (Some(code), _) => code,
        (None, ListObjectsV2Error::NoSuchBucket(_)) => "NoSuchBucket",
        (None, _) => {
            return StoreError::Unexpected {
                detail: DisplayErrorContext(err).to_string(),
            };
        }
    };

    StoreError::Client {
        code: code.to_owned(),
        message: err.message().map(ToOwned::to_owned),
    }
}

/// Walk the source chain looking for a credentials provider failure.
fn find_credentials_error(
    err: &(dyn StdError + 'static),
    env: &EnvLookup,
) -> Option<StoreError> {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(cred_err) = e.downcast_ref::<CredentialsError>() {
            return Some(classify_credentials_error(cred_err, env));
        }
        current = e.source();
    }
    None
}

fn classify_credentials_error(err: &CredentialsError, env: &EnvLookup) -> StoreError {
    match err {
        CredentialsError::CredentialsNotLoaded(_) => match partial_env_credentials(env) {
            Some(detail) => StoreError::IncompleteCredentials { detail },
            None => StoreError::MissingCredentials,
        },
        CredentialsError::InvalidConfiguration(_) | CredentialsError::ProviderError(_) => {
            StoreError::IncompleteCredentials {
                detail: DisplayErrorContext(err).to_string(),
            }
        }
        CredentialsError::ProviderTimedOut(_) => StoreError::Timeout {
            detail: DisplayErrorContext(err).to_string(),
        },
        _ => StoreError::Unexpected {
            detail: DisplayErrorContext(err).to_string(),
        },
    }
}

/// Describe a static key pair that is only half present in the environment.
///
/// Mirrors the variables the SDK's environment provider reads:
/// `AWS_ACCESS_KEY_ID` and `AWS_SECRET_ACCESS_KEY` (or `SECRET_ACCESS_KEY`).
/// Empty values count as unset.
fn partial_env_credentials(env: &EnvLookup) -> Option<String> {
    let set = |key: &str| env(key).is_some_and(|v| !v.trim().is_empty());

    let access_key = set("AWS_ACCESS_KEY_ID");
    let secret_key = set("AWS_SECRET_ACCESS_KEY") || set("SECRET_ACCESS_KEY");

    match (access_key, secret_key) {
        (true, false) => {
            Some("AWS_ACCESS_KEY_ID is set but AWS_SECRET_ACCESS_KEY is not".to_owned())
        }
        (false, true) => {
            Some("AWS_SECRET_ACCESS_KEY is set but AWS_ACCESS_KEY_ID is not".to_owned())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use aws_sdk_s3::error::ErrorMetadata;
    use aws_sdk_s3::types::error::NoSuchBucket;

    use super::*;

    /// Stands in for the SDK's dispatch failure wrapping.
    #[derive(Debug, thiserror::Error)]
    #[error("dispatch failure")]
    struct Dispatch(#[source] CredentialsError);

    fn generic(code: &str, message: &str) -> ListObjectsV2Error {
        ListObjectsV2Error::generic(ErrorMetadata::builder().code(code).message(message).build())
    }

    fn env_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    /// What the default chain reports when no provider yields credentials.
    fn chain_not_loaded() -> Dispatch {
        Dispatch(CredentialsError::not_loaded("no credentials found in chain"))
    }

    #[test]
    fn test_should_classify_missing_credentials() {
        assert!(matches!(
            find_credentials_error(&chain_not_loaded(), &no_env),
            Some(StoreError::MissingCredentials)
        ));
    }

    #[test]
    fn test_should_classify_access_key_without_secret_as_incomplete() {
        let env = env_from(&[("AWS_ACCESS_KEY_ID", "AKIDTEST")]);
        let Some(StoreError::IncompleteCredentials { detail }) =
            find_credentials_error(&chain_not_loaded(), &env)
        else {
            panic!("expected incomplete credentials");
        };
        assert!(detail.contains("AWS_SECRET_ACCESS_KEY"));
    }

    #[test]
    fn test_should_classify_secret_without_access_key_as_incomplete() {
        let env = env_from(&[("SECRET_ACCESS_KEY", "secret")]);
        assert!(matches!(
            find_credentials_error(&chain_not_loaded(), &env),
            Some(StoreError::IncompleteCredentials { .. })
        ));
    }

    #[test]
    fn test_should_keep_missing_for_empty_or_complete_env_pairs() {
        let empty = env_from(&[("AWS_ACCESS_KEY_ID", ""), ("AWS_SECRET_ACCESS_KEY", " ")]);
        assert!(matches!(
            find_credentials_error(&chain_not_loaded(), &empty),
            Some(StoreError::MissingCredentials)
        ));

        let complete = env_from(&[
            ("AWS_ACCESS_KEY_ID", "AKIDTEST"),
            ("AWS_SECRET_ACCESS_KEY", "secret"),
        ]);
        assert!(matches!(
            find_credentials_error(&chain_not_loaded(), &complete),
            Some(StoreError::MissingCredentials)
        ));
    }

    #[test]
    fn test_should_classify_incomplete_credentials() {
        let err = Dispatch(CredentialsError::invalid_configuration(
            "AWS_SECRET_ACCESS_KEY is not set",
        ));
        assert!(matches!(
            find_credentials_error(&err, &no_env),
            Some(StoreError::IncompleteCredentials { .. })
        ));

        let err = Dispatch(CredentialsError::provider_error("profile is missing a secret key"));
        assert!(matches!(
            find_credentials_error(&err, &no_env),
            Some(StoreError::IncompleteCredentials { .. })
        ));
    }

    #[test]
    fn test_should_classify_provider_timeout() {
        let err = Dispatch(CredentialsError::provider_timed_out(Duration::from_secs(5)));
        assert!(matches!(
            find_credentials_error(&err, &no_env),
            Some(StoreError::Timeout { .. })
        ));
    }

    #[test]
    fn test_should_find_nothing_without_credentials_error() {
        let err = std::io::Error::other("connection refused");
        assert!(find_credentials_error(&err, &no_env).is_none());
    }

    #[test]
    fn test_should_classify_service_error_codes() {
        let StoreError::Client { code, message } =
            classify_service_error(&generic("AccessDenied", "Access Denied"))
        else {
            panic!("expected client error");
        };
        assert_eq!(code, "AccessDenied");
        assert_eq!(message.as_deref(), Some("Access Denied"));

        let StoreError::Client { code, .. } =
            classify_service_error(&generic("InvalidBucketName", "bad name"))
        else {
            panic!("expected client error");
        };
        assert_eq!(code, "InvalidBucketName");
    }

    #[test]
    fn test_should_classify_modeled_no_such_bucket() {
        let err = ListObjectsV2Error::NoSuchBucket(NoSuchBucket::builder().build());
        let StoreError::Client { code, .. } = classify_service_error(&err) else {
            panic!("expected client error");
        };
        assert_eq!(code, "NoSuchBucket");
    }

    #[test]
    fn test_should_classify_sdk_timeout() {
        let err: SdkError<ListObjectsV2Error> = SdkError::timeout_error("operation timed out");
        assert!(matches!(
            classify_sdk_error(&err, &no_env),
            StoreError::Timeout { .. }
        ));
    }

    #[test]
    fn test_should_classify_construction_failure_as_unexpected() {
        let err: SdkError<ListObjectsV2Error> = SdkError::construction_failure("missing bucket");
        assert!(matches!(
            classify_sdk_error(&err, &no_env),
            StoreError::Unexpected { .. }
        ));
    }
}
