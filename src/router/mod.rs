//! # Router Module
//!
//! The uniform router contract and its two implementations.
//!
//! ## Overview
//!
//! Anything that can resolve requests to match results and targets to URLs
//! satisfies the [`Router`] trait. [`DynamicRouter`] assembles one router
//! out of a matcher, a generator, listeners and the enhancer pipeline.
//! [`ChainRouter`] composes any number of routers by priority, falling
//! over on recoverable misses and aborting on genuine failures.
//!
//! ## Architecture
//!
//! ```text
//! ChainRouter.match_url(url)
//!   └─ routers by descending priority
//!        ├─ DynamicRouter.match_url
//!        │    ├─ pre-match listeners, URI pre-filter
//!        │    ├─ matcher (UrlMatcher | RequestMatcher → NestedMatcher)
//!        │    └─ enhancer pipeline
//!        └─ (next router on NotFound / MethodNotAllowed)
//! ```

mod chain;
mod dynamic;

pub use chain::ChainRouter;
pub use dynamic::DynamicRouter;

use crate::context::{Request, RequestContext};
use crate::error::{GenerateError, MatchError};
use crate::generator::{GenerateParams, RouteTarget, UrlReference};
use crate::matcher::RouteMatch;
use crate::route::{RouteCollection, Routes};
use std::path::Path;
use std::sync::Arc;

/// The uniform router contract.
///
/// A router either returns a plausible match result or fails with one of
/// the documented error kinds, never a partial result alongside a failure.
pub trait Router: Send + Sync {
    /// Resolve a URL string.
    fn match_url(&self, url: &str) -> Result<RouteMatch, MatchError>;

    /// Resolve a full request. Takes precedence over
    /// [`match_url`](Router::match_url) in a chain when the router reports
    /// [`needs_request`](Router::needs_request).
    fn match_request(&self, request: &Request) -> Result<RouteMatch, MatchError> {
        self.match_url(request.path())
    }

    /// Whether this router needs full-request matching. A chain builds a
    /// request from the URL only when some member reports `true`.
    fn needs_request(&self) -> bool {
        false
    }

    /// Generate a URL for a target.
    fn generate(
        &self,
        target: &RouteTarget,
        params: &GenerateParams,
        reference: UrlReference,
    ) -> Result<String, GenerateError>;

    /// Whether this router understands the target; non-name targets are
    /// skipped by a chain when a router does not declare support.
    fn supports_target(&self, target: &RouteTarget) -> bool {
        target.is_name()
    }

    /// Hint describing why generation could fail for the target.
    fn route_debug_message(&self, target: &RouteTarget, _params: &GenerateParams) -> String {
        format!("{target:?} could not be generated")
    }

    /// Push the request context shared across the chain.
    fn set_context(&self, context: RequestContext);

    /// Current request context.
    fn context(&self) -> RequestContext;

    /// All routes known to this router.
    fn route_collection(&self) -> Arc<dyn Routes> {
        Arc::new(RouteCollection::new())
    }

    /// Warm internal caches. No-op by default.
    fn warm_up(&self, _cache_dir: &Path) {}
}
