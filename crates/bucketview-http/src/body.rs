//! Response body type for BucketView.
//!
//! Every response the service produces is small and known up front: a JSON
//! document or the welcome text. The body is therefore a single buffered
//! chunk, yielded as one data frame.

use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use http_body::{Body, Frame, SizeHint};
use http_body_util::Full;

/// Buffered response body.
#[derive(Debug)]
pub struct BucketViewResponseBody(Full<Bytes>);

impl BucketViewResponseBody {
    /// Body holding UTF-8 text.
    #[must_use]
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(Full::new(Bytes::from(s.into())))
    }

    /// Body holding serialized JSON.
    #[must_use]
    pub fn from_json(json: Vec<u8>) -> Self {
        Self(Full::new(Bytes::from(json)))
    }
}

impl Body for BucketViewResponseBody {
    type Data = Bytes;
    type Error = std::convert::Infallible;

    fn poll_frame(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        Pin::new(&mut self.0).poll_frame(cx)
    }

    fn is_end_stream(&self) -> bool {
        self.0.is_end_stream()
    }

    fn size_hint(&self) -> SizeHint {
        self.0.size_hint()
    }
}
