//! # Enhancer Module
//!
//! Post-match transformations of the match-result field map.
//!
//! ## Overview
//!
//! An enhancer receives the field map of a successful match together with
//! the request and returns an updated map. Enhancers run in priority order
//! after the matcher has selected a route, and they add fields strictly
//! additively: an enhancer must not remove fields other consumers depend
//! on. Every built-in except [`ContentRepositoryEnhancer`] is pure with
//! respect to its configuration; that one resolves an id through an
//! external repository, and repository failures abort the match rather
//! than being swallowed.
//!
//! ## Built-ins
//!
//! - [`FieldPresenceEnhancer`] - fixed value if target unset (and optional
//!   source field present)
//! - [`FieldMapEnhancer`] - target looked up from a source value in a
//!   static map
//! - [`FieldByTypeEnhancer`] - target chosen by the first matching
//!   predicate over the source content object
//! - [`RouteContentEnhancer`] - copies the matched route's content
//!   reference into a target field
//! - [`ContentRepositoryEnhancer`] - resolves a source id field through a
//!   [`ContentRepository`](crate::content::ContentRepository)
//! - [`ConditionalEnhancer`] - scopes an enhancer to requests matching a
//!   condition

mod by_type;
mod conditional;
mod content;
mod field;

pub use by_type::{FieldByTypeEnhancer, TypePredicate};
pub use conditional::{ConditionalEnhancer, RequestCondition, RequestConditionSpec};
pub use content::{ContentRepositoryEnhancer, RouteContentEnhancer};
pub use field::{FieldMapEnhancer, FieldPresenceEnhancer};

use crate::context::Request;
use crate::error::MatchError;
use crate::matcher::RouteMatch;

/// One step of the post-match pipeline.
///
/// Takes the current field map by value and returns the (possibly updated)
/// map. Implementations must be additive and idempotent for fields that are
/// already set.
pub trait RouteEnhancer: Send + Sync {
    fn enhance(&self, defaults: RouteMatch, request: &Request) -> Result<RouteMatch, MatchError>;
}
