//! # Generator Module
//!
//! URL generation, the inverse of matching.
//!
//! ## Overview
//!
//! Generation resolves a [`RouteTarget`] (a route name, a route object, or
//! a content object) to a concrete route, then renders a URL from the
//! route's pattern, the supplied parameters and the request context.
//!
//! [`ContentAwareGenerator`] is the full resolver with locale negotiation;
//! the low-level rendering lives in [`build_url`] and is shared by any
//! generator implementation.

mod content;
mod url;

pub use content::ContentAwareGenerator;
pub use url::build_url;

use crate::content::RouteReferrer;
use crate::context::RequestContext;
use crate::error::GenerateError;
use crate::route::Route;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// The kind of URL reference to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UrlReference {
    /// `/base/path` (default)
    #[default]
    AbsolutePath,
    /// `scheme://host[:port]/base/path`
    AbsoluteUrl,
    /// Path relative to the context's current path (`../sibling`)
    RelativePath,
    /// `//host[:port]/base/path`
    NetworkPath,
}

/// What to generate a URL for.
///
/// `Name` is the plain-string case every router understands; the other two
/// variants are the non-string identifiers a router must declare support
/// for via `supports_target`.
#[derive(Clone)]
pub enum RouteTarget {
    /// A route name to resolve through a provider
    Name(String),
    /// An explicit route object
    Route(Arc<Route>),
    /// A content object exposing its candidate routes
    Content(Arc<dyn RouteReferrer>),
}

impl RouteTarget {
    /// Convenience constructor for named targets
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        RouteTarget::Name(name.into())
    }

    #[must_use]
    pub fn is_name(&self) -> bool {
        matches!(self, RouteTarget::Name(_))
    }
}

impl fmt::Debug for RouteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteTarget::Name(name) => write!(f, "Name({name:?})"),
            RouteTarget::Route(route) => write!(f, "Route({:?})", route.path()),
            RouteTarget::Content(content) => {
                write!(f, "Content({:?})", content.content_id().unwrap_or_default())
            }
        }
    }
}

/// Parameters supplied to URL generation.
///
/// A `BTreeMap` keeps query-string rendering deterministic.
pub type GenerateParams = BTreeMap<String, String>;

/// Inverse resolution: target → URL.
pub trait UrlGenerator: Send + Sync {
    /// Generate a URL for the target.
    fn generate(
        &self,
        target: &RouteTarget,
        params: &GenerateParams,
        reference: UrlReference,
        context: &RequestContext,
    ) -> Result<String, GenerateError>;

    /// Whether this generator understands the target.
    ///
    /// The default only accepts plain names; generators that can resolve
    /// route or content objects override this.
    fn supports_target(&self, target: &RouteTarget) -> bool {
        target.is_name()
    }

    /// Human-readable hint describing why generation for the target could
    /// fail; aggregated by the chain router into its final error.
    fn route_debug_message(&self, target: &RouteTarget, _params: &GenerateParams) -> String {
        match target {
            RouteTarget::Name(name) => format!("route '{name}' not found"),
            RouteTarget::Route(route) => format!("route with pattern '{}'", route.path()),
            RouteTarget::Content(content) => format!(
                "content '{}'",
                content.content_id().unwrap_or_else(|| "unknown".to_string())
            ),
        }
    }
}
