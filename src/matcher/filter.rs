//! Built-in route filters.

use super::RouteFilter;
use crate::context::Request;
use crate::error::MatchError;
use crate::route::{RouteCollection, Routes};
use http::Method;
use tracing::debug;

/// Drops candidate routes whose declared methods exclude the request method.
///
/// When the filter would empty a non-empty collection it short-circuits the
/// whole match with method-not-allowed carrying the union of methods the
/// candidate set would have accepted, which is more informative than letting the
/// final matcher report a bare miss.
#[derive(Debug, Clone, Default)]
pub struct MethodRouteFilter;

impl MethodRouteFilter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RouteFilter for MethodRouteFilter {
    fn filter(
        &self,
        collection: RouteCollection,
        request: &Request,
    ) -> Result<RouteCollection, MatchError> {
        if collection.is_empty() {
            return Ok(collection);
        }

        let mut kept = RouteCollection::new();
        let mut allowed: Vec<Method> = Vec::new();

        for (name, route) in collection.iter() {
            if route.methods().is_empty() || route.methods().contains(request.method()) {
                kept.add(name, route);
            } else {
                for method in route.methods() {
                    if !allowed.contains(method) {
                        allowed.push(method.clone());
                    }
                }
            }
        }

        if kept.is_empty() {
            debug!(
                method = %request.method(),
                path = %request.path(),
                "All candidate routes rejected the request method"
            );
            return Err(MatchError::MethodNotAllowed { allowed });
        }

        Ok(kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::Route;
    use std::sync::Arc;

    #[test]
    fn test_keeps_matching_and_unrestricted_routes() {
        let mut collection = RouteCollection::new();
        collection.add("any", Arc::new(Route::new("/a")));
        collection.add(
            "get_only",
            Arc::new(Route::new("/b").with_methods(vec![Method::GET])),
        );
        collection.add(
            "post_only",
            Arc::new(Route::new("/c").with_methods(vec![Method::POST])),
        );

        let kept = MethodRouteFilter::new()
            .filter(collection, &Request::new("/x"))
            .unwrap();
        assert_eq!(kept.names(), vec!["any", "get_only"]);
    }

    #[test]
    fn test_emptying_collection_short_circuits() {
        let mut collection = RouteCollection::new();
        collection.add(
            "post_only",
            Arc::new(Route::new("/c").with_methods(vec![Method::POST])),
        );
        collection.add(
            "put_only",
            Arc::new(Route::new("/d").with_methods(vec![Method::PUT])),
        );

        let err = MethodRouteFilter::new()
            .filter(collection, &Request::new("/x"))
            .unwrap_err();
        match err {
            MatchError::MethodNotAllowed { allowed } => {
                assert_eq!(allowed, vec![Method::POST, Method::PUT]);
            }
            other => panic!("expected MethodNotAllowed, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_input_passes_through() {
        let kept = MethodRouteFilter::new()
            .filter(RouteCollection::new(), &Request::new("/x"))
            .unwrap();
        assert!(kept.is_empty());
    }
}
