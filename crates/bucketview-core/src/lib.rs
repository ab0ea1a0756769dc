//! BucketView listing logic.
//!
//! Resolves a caller-supplied path to the first-level entries stored under
//! it in a single bucket:
//!
//! - [`config`]: environment-driven [`BucketViewConfig`](config::BucketViewConfig)
//! - [`path`]: prefix normalization and entry derivation
//! - [`store`]: the [`ObjectStore`](store::ObjectStore) boundary, with
//!   [`s3`] as the production implementation
//! - [`resolver`]: one store query turned into entries
//! - [`handler`]: the [`ListingHandler`](bucketview_http::ListingHandler)
//!   served by the HTTP layer

pub mod config;
pub mod error;
pub mod handler;
pub mod path;
pub mod resolver;
pub mod s3;
pub mod store;

pub use config::{BucketViewConfig, ListingMode, LogFormat};
pub use error::StoreError;
pub use handler::BucketViewHandler;
pub use resolver::ListingResolver;
pub use s3::S3ObjectStore;
pub use store::{KeyPage, ObjectStore};
