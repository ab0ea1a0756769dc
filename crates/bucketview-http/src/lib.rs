//! HTTP layer for BucketView.
//!
//! - **Router** ([`router`]): maps method and path to a [`router::Route`]
//! - **Handler trait** ([`dispatch`]): the boundary between HTTP and the listing logic
//! - **Service** ([`service`]): hyper `Service` running the request pipeline
//! - **Response helpers** ([`response`]): JSON and text response formatting

pub mod body;
pub mod dispatch;
pub mod response;
pub mod router;
pub mod service;

pub use body::BucketViewResponseBody;
pub use dispatch::ListingHandler;
pub use service::{BucketViewHttpConfig, BucketViewHttpService};
