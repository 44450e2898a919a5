//! Route provider collaborator traits and the in-memory reference provider.
//!
//! A provider is the boundary to whatever owns the routes, usually a
//! storage backend. The matching side asks it for a *candidate collection*
//! per request (cheap, storage-optimized, imprecise; precision comes later
//! in the matcher pipeline); the generation side asks it for routes by name.

use crate::candidates::Candidates;
use crate::context::Request;
use crate::error::{GenerateError, MatchError};
use crate::route::{Route, RouteCollection, Routes};
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Source of routes, usually backed by storage.
///
/// `route_collection_for_request` may fail with a not-found to short-circuit
/// matching with a more specific message, but must not fail for any other
/// reason except genuine backend errors (which abort the chain).
pub trait RouteProvider: Send + Sync {
    /// Candidate routes for one request, most specific first
    fn route_collection_for_request(&self, request: &Request)
        -> Result<RouteCollection, MatchError>;

    /// Route registered under `name`
    fn route_by_name(&self, name: &str) -> Result<Arc<Route>, GenerateError>;

    /// Routes for the given names, or all routes when `names` is `None`
    fn routes_by_names(
        &self,
        names: Option<&[String]>,
    ) -> anyhow::Result<Vec<(String, Arc<Route>)>>;
}

/// Provider that can serve its routes in batches.
pub trait PagedRouteProvider: RouteProvider {
    /// Up to `length` routes starting at `offset`, in stable order
    fn routes_paged(&self, offset: usize, length: usize)
        -> anyhow::Result<Vec<(String, Arc<Route>)>>;

    /// Total number of routes
    fn routes_count(&self) -> anyhow::Result<usize>;
}

/// In-memory reference provider.
///
/// Stores routes in insertion order and answers
/// `route_collection_for_request` by intersecting each route's static prefix
/// with the candidate prefixes of the request path, which is the narrowing a
/// storage backend would do with an `IN` query over the candidate list.
pub struct InMemoryRouteProvider {
    routes: RwLock<RouteCollection>,
    candidates: Candidates,
}

impl InMemoryRouteProvider {
    #[must_use]
    pub fn new(candidates: Candidates) -> Self {
        Self {
            routes: RwLock::new(RouteCollection::new()),
            candidates,
        }
    }

    /// Register a route under a name.
    pub fn add_route(&self, name: impl Into<String>, route: Route) {
        self.routes
            .write()
            .expect("route store lock poisoned")
            .add(name, Arc::new(route));
    }
}

impl RouteProvider for InMemoryRouteProvider {
    fn route_collection_for_request(
        &self,
        request: &Request,
    ) -> Result<RouteCollection, MatchError> {
        let candidates = self.candidates.candidates(request.path());
        let routes = self.routes.read().expect("route store lock poisoned");

        let mut collection = RouteCollection::new();
        for (name, route) in routes.iter() {
            if candidates.iter().any(|c| c == route.static_prefix()) {
                collection.add(name, route);
            }
        }

        debug!(
            path = %request.path(),
            candidate_count = candidates.len(),
            route_count = collection.len(),
            "Candidate collection retrieved"
        );

        Ok(collection)
    }

    fn route_by_name(&self, name: &str) -> Result<Arc<Route>, GenerateError> {
        self.routes
            .read()
            .expect("route store lock poisoned")
            .get(name)
            .ok_or_else(|| GenerateError::NotFound(format!("no route named '{name}'")))
    }

    fn routes_by_names(
        &self,
        names: Option<&[String]>,
    ) -> anyhow::Result<Vec<(String, Arc<Route>)>> {
        let routes = self.routes.read().expect("route store lock poisoned");
        match names {
            None => Ok(routes.iter().collect()),
            Some(names) => Ok(names
                .iter()
                .filter_map(|n| routes.get(n).map(|r| (n.clone(), r)))
                .collect()),
        }
    }
}

impl PagedRouteProvider for InMemoryRouteProvider {
    fn routes_paged(
        &self,
        offset: usize,
        length: usize,
    ) -> anyhow::Result<Vec<(String, Arc<Route>)>> {
        let routes = self.routes.read().expect("route store lock poisoned");
        Ok(routes.iter().skip(offset).take(length).collect())
    }

    fn routes_count(&self) -> anyhow::Result<usize> {
        Ok(self.routes.read().expect("route store lock poisoned").len())
    }
}
