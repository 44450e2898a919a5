//! # Matcher Module
//!
//! Request-to-route resolution.
//!
//! ## Overview
//!
//! Matching is a three-stage pipeline so a potentially huge backing store
//! never has to be scanned per request:
//!
//! 1. **Retrieval** - a route provider returns a candidate collection for
//!    the request (cheap, storage-optimized, imprecise).
//! 2. **Filtering** - an ordered list of [`RouteFilter`]s narrows the
//!    collection in memory (cheap, still imprecise). A filter may also
//!    short-circuit the whole match with a specific failure.
//! 3. **Final matching** - exactly one [`FinalMatcher`] selects one route
//!    (expensive, precise: full regex compilation of each candidate).
//!
//! [`NestedMatcher`] orchestrates the stages. [`RegexFinalMatcher`] is the
//! built-in final stage; [`CollectionUrlMatcher`] offers the same precision
//! over a fixed collection for setups without a backing store.
//!
//! A successful match produces a [`RouteMatch`]: an ordered field map with a
//! handful of reserved keys (`_route`, `_route_object`, `_controller`,
//! `_content`, `_locale`) plus open extension fields added by enhancers.

mod filter;
mod final_matcher;
mod nested;
mod pattern;
mod result;
mod url_matcher;

pub use filter::MethodRouteFilter;
pub use final_matcher::RegexFinalMatcher;
pub use nested::NestedMatcher;
pub use result::{
    ParamValue, RouteMatch, CONTENT_FIELD, CONTROLLER_FIELD, LOCALE_FIELD, MAX_INLINE_FIELDS,
    ROUTE_NAME_FIELD, ROUTE_OBJECT_FIELD,
};
pub use url_matcher::CollectionUrlMatcher;

use crate::context::Request;
use crate::error::MatchError;
use crate::route::RouteCollection;

/// Matcher that resolves a plain URL path.
pub trait UrlMatcher: Send + Sync {
    /// Resolve a request path to a match result.
    fn match_path(&self, path: &str) -> Result<RouteMatch, MatchError>;
}

/// Matcher that needs the full request (method, scheme, attributes).
pub trait RequestMatcher: Send + Sync {
    /// Resolve a request to a match result.
    fn match_request(&self, request: &Request) -> Result<RouteMatch, MatchError>;
}

/// In-memory narrowing step of the nested pipeline.
///
/// Receives the current candidate collection and returns a (possibly
/// smaller) one, or fails to short-circuit the whole match with a failure
/// more specific than what the final matcher would report.
pub trait RouteFilter: Send + Sync {
    fn filter(
        &self,
        collection: RouteCollection,
        request: &Request,
    ) -> Result<RouteCollection, MatchError>;
}

/// Final, precise stage of the nested pipeline.
///
/// Must select exactly one route from the remaining collection and return
/// its match result, or fail with not-found / method-not-allowed.
pub trait FinalMatcher: Send + Sync {
    fn final_match(
        &self,
        collection: RouteCollection,
        request: &Request,
    ) -> Result<RouteMatch, MatchError>;
}
