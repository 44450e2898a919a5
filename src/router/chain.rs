//! Priority-ordered router chain.

use super::Router;
use crate::context::{Request, RequestContext};
use crate::error::{GenerateError, MatchError};
use crate::generator::{GenerateParams, RouteTarget, UrlReference};
use crate::matcher::RouteMatch;
use crate::priority::PriorityList;
use crate::route::{ChainRouteCollection, Routes};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use tracing::{debug, info};

/// Composes any number of routers by priority, implementing fallback
/// matching and generation.
///
/// Matching tries each router in descending priority order. A
/// `NotFound` moves on to the next router; a `MethodNotAllowed` is
/// remembered and also moves on; if nothing succeeds, the remembered
/// method-not-allowed is raised in preference to a bare miss, since "found
/// but wrong method" is the more informative failure. Any other error
/// aborts the chain immediately.
///
/// Generation tries each router the same way, skipping routers that do not
/// declare support for non-name targets, and aggregates every failed
/// router's debug hint into the final error.
///
/// The context set with [`set_context`](Router::set_context) is pushed to
/// child routers at read time, so routers added after the context was set
/// still receive it before their first use.
pub struct ChainRouter {
    routers: PriorityList<Arc<dyn Router>>,
    context: RwLock<Option<RequestContext>>,
    context_stale: AtomicBool,
}

impl ChainRouter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            routers: PriorityList::new(),
            context: RwLock::new(None),
            context_stale: AtomicBool::new(false),
        }
    }

    /// Add a router with a priority. Higher priorities are tried first;
    /// equal priorities keep their registration order.
    pub fn add(&self, router: Arc<dyn Router>, priority: i32) {
        self.routers.add(router, priority);
        self.context_stale.store(true, Ordering::Release);
    }

    /// Priority-sorted routers, context propagated.
    ///
    /// The sorted view reflects every `add` that happened before this call,
    /// and any pending context is (re)pushed to all members here (not at
    /// `set_context` time) so late-added routers are covered.
    #[must_use]
    pub fn all(&self) -> Arc<Vec<Arc<dyn Router>>> {
        let view = self.routers.sorted();
        if self.context_stale.swap(false, Ordering::AcqRel) {
            let context = self
                .context
                .read()
                .expect("chain context lock poisoned")
                .clone();
            if let Some(context) = context {
                for router in view.iter() {
                    router.set_context(context.clone());
                }
            }
        }
        view
    }

    fn do_match(&self, url: &str, request: Option<&Request>) -> Result<RouteMatch, MatchError> {
        let routers = self.all();
        let mut method_not_allowed: Option<MatchError> = None;

        // Build a request from the URL only if some member needs one and
        // the caller did not supply it.
        let built;
        let request = if request.is_none() && routers.iter().any(|r| r.needs_request()) {
            built = Request::from_url(url)?;
            Some(&built)
        } else {
            request
        };

        for (position, router) in routers.iter().enumerate() {
            let result = match request {
                Some(request) => router.match_request(request),
                None => router.match_url(url),
            };
            match result {
                Ok(matched) => {
                    info!(
                        url = %url,
                        router_position = position,
                        route_name = matched.route_name().unwrap_or(""),
                        "Chain router matched"
                    );
                    return Ok(matched);
                }
                Err(MatchError::NotFound(reason)) => {
                    debug!(
                        url = %url,
                        router_position = position,
                        reason = %reason,
                        "Router did not match, trying next"
                    );
                }
                Err(err @ MatchError::MethodNotAllowed { .. }) => {
                    debug!(
                        url = %url,
                        router_position = position,
                        "Router matched path but not method, trying next"
                    );
                    method_not_allowed = Some(err);
                }
                Err(err) => return Err(err),
            }
        }

        Err(method_not_allowed.unwrap_or_else(|| {
            MatchError::NotFound(format!("none of the chained routers matched '{url}'"))
        }))
    }
}

impl Default for ChainRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl Router for ChainRouter {
    fn match_url(&self, url: &str) -> Result<RouteMatch, MatchError> {
        self.do_match(url, None)
    }

    fn match_request(&self, request: &Request) -> Result<RouteMatch, MatchError> {
        self.do_match(request.path(), Some(request))
    }

    fn needs_request(&self) -> bool {
        self.all().iter().any(|router| router.needs_request())
    }

    fn generate(
        &self,
        target: &RouteTarget,
        params: &GenerateParams,
        reference: UrlReference,
    ) -> Result<String, GenerateError> {
        let mut hints: Vec<String> = Vec::new();

        for router in self.all().iter() {
            if !target.is_name() && !router.supports_target(target) {
                continue;
            }
            match router.generate(target, params, reference) {
                Ok(url) => return Ok(url),
                Err(GenerateError::NotFound(_)) => {
                    let hint = router.route_debug_message(target, params);
                    if !hints.contains(&hint) {
                        hints.push(hint);
                    }
                }
                Err(err) => return Err(err),
            }
        }

        Err(GenerateError::NotFound(format!(
            "none of the chained routers were able to generate the route: {}",
            hints.join(", ")
        )))
    }

    fn supports_target(&self, target: &RouteTarget) -> bool {
        self.all()
            .iter()
            .any(|router| router.supports_target(target))
    }

    fn set_context(&self, context: RequestContext) {
        *self.context.write().expect("chain context lock poisoned") = Some(context);
        self.context_stale.store(true, Ordering::Release);
    }

    fn context(&self) -> RequestContext {
        self.context
            .read()
            .expect("chain context lock poisoned")
            .clone()
            .unwrap_or_default()
    }

    fn route_collection(&self) -> Arc<dyn Routes> {
        let mut chain = ChainRouteCollection::new();
        for router in self.all().iter() {
            chain.push(router.route_collection());
        }
        Arc::new(chain)
    }

    fn warm_up(&self, cache_dir: &Path) {
        for router in self.all().iter() {
            router.warm_up(cache_dir);
        }
    }
}
