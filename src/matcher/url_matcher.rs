//! URL matcher over a fixed route collection.

use super::{FinalMatcher, RegexFinalMatcher, RouteMatch, UrlMatcher};
use crate::context::{Request, RequestContext};
use crate::error::MatchError;
use crate::route::RouteCollection;
use std::sync::RwLock;

/// [`UrlMatcher`] for setups without a backing store: all routes live in one
/// in-memory collection and every match runs the precise final stage over
/// it directly.
///
/// The HTTP method for path-only matching comes from the configured request
/// context (URL strings carry no method).
pub struct CollectionUrlMatcher {
    routes: RouteCollection,
    context: RwLock<RequestContext>,
    final_matcher: RegexFinalMatcher,
}

impl CollectionUrlMatcher {
    #[must_use]
    pub fn new(routes: RouteCollection) -> Self {
        Self {
            routes,
            context: RwLock::new(RequestContext::default()),
            final_matcher: RegexFinalMatcher::new(),
        }
    }

    pub fn set_context(&self, context: RequestContext) {
        *self.context.write().expect("context lock poisoned") = context;
    }
}

impl UrlMatcher for CollectionUrlMatcher {
    fn match_path(&self, path: &str) -> Result<RouteMatch, MatchError> {
        let method = self
            .context
            .read()
            .expect("context lock poisoned")
            .method()
            .clone();
        let request = Request::new(path).with_method(method);
        self.final_matcher
            .final_match(self.routes.clone(), &request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::Route;
    use http::Method;
    use std::sync::Arc;

    #[test]
    fn test_match_path_uses_context_method() {
        let mut routes = RouteCollection::new();
        routes.add(
            "create",
            Arc::new(Route::new("/items").with_methods(vec![Method::POST])),
        );
        let matcher = CollectionUrlMatcher::new(routes);

        assert!(matches!(
            matcher.match_path("/items"),
            Err(MatchError::MethodNotAllowed { .. })
        ));

        matcher.set_context(RequestContext::new().with_method(Method::POST));
        let result = matcher.match_path("/items").unwrap();
        assert_eq!(result.route_name(), Some("create"));
    }
}
