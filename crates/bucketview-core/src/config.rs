//! Service configuration.
//!
//! Provides [`BucketViewConfig`], loaded once at startup from environment
//! variables and immutable afterwards.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Bucket listed when `BUCKET_NAME` is unset.
pub const DEFAULT_BUCKET: &str = "python-app-terraform";

/// How duplicate first-level entries are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingMode {
    /// One entry per object key; entries repeat when several keys share a
    /// first segment.
    #[default]
    Raw,
    /// Each entry reported once, in order of first appearance.
    Unique,
}

impl FromStr for ListingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" => Ok(Self::Raw),
            "unique" | "dedup" => Ok(Self::Unique),
            other => Err(format!("unknown listing mode: {other}")),
        }
    }
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// BucketView configuration.
///
/// # Examples
///
/// ```
/// use bucketview_core::config::{BucketViewConfig, ListingMode};
///
/// let config = BucketViewConfig::builder()
///     .bucket_name("my-bucket".into())
///     .listing_mode(ListingMode::Unique)
///     .build();
/// assert_eq!(config.gateway_listen, "0.0.0.0:5000");
/// assert_eq!(config.upstream_max_attempts, 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct BucketViewConfig {
    /// Bind address (e.g. `"0.0.0.0:5000"`).
    #[builder(default = String::from("0.0.0.0:5000"))]
    pub gateway_listen: String,

    /// The single bucket this instance lists.
    #[builder(default = String::from(DEFAULT_BUCKET))]
    pub bucket_name: String,

    /// Region override; the SDK provider chain decides when unset.
    #[builder(default)]
    pub region: Option<String>,

    /// Custom endpoint for S3-compatible stores.
    #[builder(default)]
    pub endpoint_url: Option<String>,

    /// Use path-style bucket addressing.
    #[builder(default = false)]
    pub force_path_style: bool,

    /// Upper bound on a single upstream list call, in milliseconds.
    #[builder(default = 10_000)]
    pub upstream_timeout_ms: u64,

    /// Upper bound on establishing an upstream connection, in milliseconds.
    #[builder(default = 3_000)]
    pub upstream_connect_timeout_ms: u64,

    /// Total attempts per upstream call; `1` disables retries.
    #[builder(default = 1)]
    pub upstream_max_attempts: u32,

    /// Duplicate-entry policy.
    #[builder(default)]
    pub listing_mode: ListingMode,

    /// Log level filter (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,

    /// Log output format.
    #[builder(default)]
    pub log_format: LogFormat,
}

impl Default for BucketViewConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl BucketViewConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `GATEWAY_LISTEN` | `0.0.0.0:5000` |
    /// | `BUCKET_NAME` | `python-app-terraform` |
    /// | `AWS_REGION` / `DEFAULT_REGION` | *(SDK chain)* |
    /// | `S3_ENDPOINT_URL` | *(unset)* |
    /// | `S3_FORCE_PATH_STYLE` | `false` |
    /// | `UPSTREAM_TIMEOUT_MS` | `10000` |
    /// | `UPSTREAM_CONNECT_TIMEOUT_MS` | `3000` |
    /// | `UPSTREAM_MAX_ATTEMPTS` | `1` |
    /// | `LISTING_MODE` | `raw` |
    /// | `LOG_LEVEL` | `info` |
    /// | `LOG_FORMAT` | `text` |
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Unparseable values keep their defaults.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(v) = lookup("GATEWAY_LISTEN") {
            config.gateway_listen = v;
        }
        if let Some(v) = lookup("BUCKET_NAME").filter(|v| !v.is_empty()) {
            config.bucket_name = v;
        }
        if let Some(v) = lookup("AWS_REGION")
            .or_else(|| lookup("DEFAULT_REGION"))
            .filter(|v| !v.is_empty())
        {
            config.region = Some(v);
        }
        if let Some(v) = lookup("S3_ENDPOINT_URL").filter(|v| !v.is_empty()) {
            config.endpoint_url = Some(v);
        }
        if let Some(v) = lookup("S3_FORCE_PATH_STYLE") {
            config.force_path_style = parse_bool(&v);
        }
        if let Some(n) = lookup("UPSTREAM_TIMEOUT_MS").and_then(|v| v.parse().ok()) {
            config.upstream_timeout_ms = n;
        }
        if let Some(n) = lookup("UPSTREAM_CONNECT_TIMEOUT_MS").and_then(|v| v.parse().ok()) {
            config.upstream_connect_timeout_ms = n;
        }
        if let Some(n) = lookup("UPSTREAM_MAX_ATTEMPTS")
            .and_then(|v| v.parse().ok())
            .filter(|n: &u32| *n > 0)
        {
            config.upstream_max_attempts = n;
        }
        if let Some(v) = lookup("LISTING_MODE") {
            match v.parse() {
                Ok(mode) => config.listing_mode = mode,
                Err(e) => tracing::warn!(error = %e, "ignoring LISTING_MODE, using raw"),
            }
        }
        if let Some(v) = lookup("LOG_LEVEL") {
            config.log_level = v;
        }
        if let Some(v) = lookup("LOG_FORMAT") {
            config.log_format = if v.eq_ignore_ascii_case("json") {
                LogFormat::Json
            } else {
                LogFormat::Text
            };
        }

        config
    }

    /// Per-operation upstream timeout.
    #[must_use]
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_millis(self.upstream_timeout_ms)
    }

    /// Upstream connect timeout.
    #[must_use]
    pub fn upstream_connect_timeout(&self) -> Duration {
        Duration::from_millis(self.upstream_connect_timeout_ms)
    }
}

/// Parse a string as a boolean, accepting `"1"`, `"true"` and `"yes"` (case-insensitive).
fn parse_bool(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("yes")
}
