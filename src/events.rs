//! Router event hooks.
//!
//! A [`RouterListener`] observes matching and may intercept generation.
//! Pre-match observers only inspect the request; pre-generate listeners
//! receive the mutable [`GenerateIntent`] and may rewrite the target, the
//! parameters and the reference type before the generator runs: the hook
//! that lets out-of-band logic (e.g. canonicalization) intercept generation
//! without wrapping the router.

use crate::context::Request;
use crate::generator::{GenerateParams, RouteTarget, UrlReference};

/// The mutable input of one generation call, as seen by pre-generate
/// listeners.
#[derive(Debug, Clone)]
pub struct GenerateIntent {
    pub target: RouteTarget,
    pub params: GenerateParams,
    pub reference: UrlReference,
}

/// Observer/interceptor hooks dispatched by a dynamic router.
pub trait RouterListener: Send + Sync {
    /// Called before matching; observers may inspect, not intercept.
    fn on_pre_match(&self, _request: &Request) {}

    /// Called before generation; may rewrite the intent.
    fn on_pre_generate(&self, _intent: &mut GenerateIntent) {}
}
