//! Request routing.
//!
//! The service exposes three routes:
//!
//! ```text
//! GET /                                  welcome text
//! GET /health | /_health                 health probe
//! GET /list-bucket-content[/{path...}]   listing under `path`
//! ```
//!
//! `HEAD` is accepted wherever `GET` is. The listing path is handed on
//! percent-decoded but otherwise untouched; prefix normalization belongs to
//! the listing handler.

use http::Method;
use percent_encoding::percent_decode_str;

use bucketview_model::error::ListingError;

/// Path of the listing route, without the trailing separator.
pub const LIST_CONTENT_PATH: &str = "/list-bucket-content";

/// Value of the `Allow` header sent with `405` responses.
pub const ALLOWED_METHODS: &str = "GET, HEAD";

/// A resolved route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `GET /`.
    Welcome,
    /// `GET /health` and `GET /_health`.
    Health,
    /// `GET /list-bucket-content/{path}` with the decoded, raw `path`.
    ListContent {
        /// Decoded path parameter; empty for the bucket root.
        path: String,
    },
}

impl Route {
    /// Short name used in log events.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Welcome => "Welcome",
            Self::Health => "Health",
            Self::ListContent { .. } => "ListContent",
        }
    }
}

/// Resolve a route from the request method and URI path.
///
/// Unknown paths yield `RouteNotFound` regardless of method. Known paths
/// reached with anything other than `GET`/`HEAD` yield `MethodNotAllowed`.
pub fn resolve_route(method: &Method, path: &str) -> Result<Route, ListingError> {
    let route = match_path(path).ok_or_else(|| ListingError::route_not_found(path))?;

    if *method != Method::GET && *method != Method::HEAD {
        return Err(ListingError::method_not_allowed(method));
    }

    Ok(route)
}

fn match_path(path: &str) -> Option<Route> {
    match path {
        "/" | "" => return Some(Route::Welcome),
        "/health" | "/_health" => return Some(Route::Health),
        _ => {}
    }

    let rest = path.strip_prefix(LIST_CONTENT_PATH)?;
    if rest.is_empty() {
        return Some(Route::ListContent {
            path: String::new(),
        });
    }

    // Reject `/list-bucket-contentXYZ`.
    let raw = rest.strip_prefix('/')?;
    Some(Route::ListContent {
        path: decode_path(raw),
    })
}

/// Percent-decode a path parameter, replacing invalid UTF-8 sequences.
fn decode_path(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}
