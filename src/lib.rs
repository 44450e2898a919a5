//! # ChainRouter
//!
//! **ChainRouter** is a pluggable URL routing engine: given an incoming
//! request path it resolves which handler (and associated data) should
//! process it, trying multiple independent routing strategies in priority
//! order; given a target (a route name, a route object, or a content
//! object) it performs the inverse operation and produces a URL.
//!
//! ## Overview
//!
//! The crate is a library boundary, not a service boundary: it defines the
//! decision logic that picks a route and the inverse logic that builds a
//! URL. Persistence backends, controller dispatch and HTTP transports are
//! external collaborators reached through narrow traits.
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - **[`router`]** - The uniform [`Router`](router::Router) contract,
//!   the priority-ordered [`ChainRouter`](router::ChainRouter) and the
//!   [`DynamicRouter`](router::DynamicRouter) building block
//! - **[`matcher`]** - The three-stage
//!   [`NestedMatcher`](matcher::NestedMatcher) pipeline (candidate
//!   retrieval, filtering, final regex selection) and the match-result map
//! - **[`candidates`]** - Candidate path generation: one URL becomes a
//!   bounded list of lookup keys a storage backend can query directly
//! - **[`generator`]** - Content-aware URL generation with locale
//!   negotiation and the low-level URL builder
//! - **[`enhancer`]** - Ordered, pure post-match transformations of the
//!   match result
//! - **[`route`]** - Routes and the collection contract, including lazy and
//!   paged adapters that never materialize the backing store
//! - **[`provider`]** - Route provider collaborator traits and the
//!   in-memory reference provider
//! - **[`content`]** - Content object and content repository collaborator
//!   traits
//! - **[`context`]** - The request value and the shared request context
//! - **[`events`]** - Pre-match / pre-generate hooks
//! - **[`config`]** - Environment-based runtime configuration
//! - **[`error`]** - The recoverable-vs-fatal failure taxonomy
//!
//! ## Matching Flow
//!
//! ```text
//! ChainRouter.match_url(url)
//!   routers by descending priority
//!     DynamicRouter
//!       pre-match listeners → uri pre-filter
//!       NestedMatcher
//!         provider.route_collection_for_request   (cheap, storage-side)
//!         route filters, priority-ordered          (cheap, in-memory)
//!         final matcher, full regex compilation    (precise)
//!       enhancer pipeline                          (additive fields)
//!     next router on NotFound / MethodNotAllowed
//!     abort on any other failure
//! ```
//!
//! A `MethodNotAllowed` seen along the way is remembered and preferred over
//! a bare `NotFound` as the chain's terminal error, because "found but
//! wrong method" is strictly more informative.
//!
//! ## Quick Start
//!
//! ```rust
//! use chainrouter::candidates::Candidates;
//! use chainrouter::context::Request;
//! use chainrouter::generator::{ContentAwareGenerator, RouteTarget, UrlReference};
//! use chainrouter::matcher::{NestedMatcher, RegexFinalMatcher};
//! use chainrouter::provider::{InMemoryRouteProvider, RouteProvider};
//! use chainrouter::route::Route;
//! use chainrouter::router::{ChainRouter, DynamicRouter, Router};
//! use std::sync::Arc;
//!
//! // A provider plays the role of the storage backend.
//! let provider = Arc::new(InMemoryRouteProvider::new(Candidates::new(Vec::new(), 20)));
//! provider.add_route(
//!     "user_show",
//!     Route::new("/users/{id}").with_default("_controller", "user_controller"),
//! );
//!
//! // One dynamic router: nested matching + content-aware generation.
//! let matcher = Arc::new(NestedMatcher::new(
//!     Arc::clone(&provider) as Arc<dyn RouteProvider>,
//!     Arc::new(RegexFinalMatcher::new()),
//! ));
//! let generator = Arc::new(ContentAwareGenerator::new(
//!     Arc::clone(&provider) as Arc<dyn RouteProvider>,
//! ));
//! let router = DynamicRouter::with_request_matcher(matcher, generator);
//!
//! // Chain it (more routers could be added with other priorities).
//! let chain = ChainRouter::new();
//! chain.add(Arc::new(router), 0);
//!
//! let result = chain.match_request(&Request::new("/users/42")).unwrap();
//! assert_eq!(result.route_name(), Some("user_show"));
//! assert_eq!(result.get_str("id"), Some("42"));
//! assert_eq!(result.get_str("_controller"), Some("user_controller"));
//!
//! let url = chain
//!     .generate(
//!         &RouteTarget::name("user_show"),
//!         &[("id".to_string(), "42".to_string())].into_iter().collect(),
//!         UrlReference::AbsolutePath,
//!     )
//!     .unwrap();
//! assert_eq!(url, "/users/42");
//! ```
//!
//! ## Error Model
//!
//! Expected misses are data, not panics: matching returns
//! [`MatchError::NotFound`](error::MatchError) or
//! [`MatchError::MethodNotAllowed`](error::MatchError), both of which a
//! chain treats as "try the next strategy". Anything else
//! (a backend being unreachable, a misconfigured matcher) is a
//! [`MatchError::Failure`](error::MatchError) and aborts the whole chain,
//! because retrying an alternative cannot fix systemic breakage.

pub mod candidates;
pub mod config;
pub mod content;
pub mod context;
pub mod enhancer;
pub mod error;
pub mod events;
pub mod generator;
pub mod matcher;
pub mod priority;
pub mod provider;
pub mod route;
pub mod router;

pub use candidates::Candidates;
pub use config::RouterConfig;
pub use content::{ContentRepository, RouteReferrer};
pub use context::{Request, RequestContext};
pub use error::{GenerateError, MatchError};
pub use generator::{GenerateParams, RouteTarget, UrlGenerator, UrlReference};
pub use matcher::{ParamValue, RouteMatch};
pub use route::{Route, RouteCollection, Routes};
pub use router::{ChainRouter, DynamicRouter, Router};
