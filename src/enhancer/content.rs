//! Content-related enhancers.

use super::RouteEnhancer;
use crate::content::ContentRepository;
use crate::context::Request;
use crate::error::MatchError;
use crate::matcher::{ParamValue, RouteMatch, CONTENT_FIELD, ROUTE_OBJECT_FIELD};
use std::sync::Arc;
use tracing::debug;

/// Copies the matched route's associated content reference into a target
/// field, when the target is unset and the match carries a route object
/// that exposes content.
#[derive(Debug, Clone)]
pub struct RouteContentEnhancer {
    route_field: String,
    target: String,
}

impl RouteContentEnhancer {
    /// Enhancer reading the default reserved fields
    /// (`_route_object` → `_content`).
    #[must_use]
    pub fn new() -> Self {
        Self::with_fields(ROUTE_OBJECT_FIELD, CONTENT_FIELD)
    }

    #[must_use]
    pub fn with_fields(route_field: &str, target: &str) -> Self {
        Self {
            route_field: route_field.to_string(),
            target: target.to_string(),
        }
    }
}

impl Default for RouteContentEnhancer {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteEnhancer for RouteContentEnhancer {
    fn enhance(&self, mut defaults: RouteMatch, _request: &Request) -> Result<RouteMatch, MatchError> {
        if defaults.contains(&self.target) {
            return Ok(defaults);
        }
        let content = defaults
            .get(&self.route_field)
            .and_then(|v| v.as_route())
            .and_then(|route| route.content())
            .map(Arc::clone);
        if let Some(content) = content {
            defaults.set(self.target.as_str(), ParamValue::Content(content));
        }
        Ok(defaults)
    }
}

/// Resolves a source id field through a content repository and stores the
/// resulting content object in a target field.
///
/// The only enhancer that performs I/O. Repository failures propagate and
/// abort the match; an unreachable backend is not a "route does not apply"
/// condition. An id that resolves to nothing leaves the map unchanged.
pub struct ContentRepositoryEnhancer {
    repository: Arc<dyn ContentRepository>,
    source: String,
    target: String,
}

impl ContentRepositoryEnhancer {
    #[must_use]
    pub fn new(repository: Arc<dyn ContentRepository>, source: &str, target: &str) -> Self {
        Self {
            repository,
            source: source.to_string(),
            target: target.to_string(),
        }
    }
}

impl RouteEnhancer for ContentRepositoryEnhancer {
    fn enhance(&self, mut defaults: RouteMatch, _request: &Request) -> Result<RouteMatch, MatchError> {
        if defaults.contains(&self.target) {
            return Ok(defaults);
        }
        let Some(id) = defaults.get_str(&self.source).map(|s| s.to_string()) else {
            return Ok(defaults);
        };
        match self.repository.find_by_id(&id)? {
            Some(content) => {
                defaults.set(self.target.as_str(), ParamValue::Content(content));
            }
            None => {
                debug!(content_id = %id, "Content id resolved to nothing");
            }
        }
        Ok(defaults)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::RouteReferrer;
    use crate::route::Route;
    use anyhow::anyhow;

    struct Page;

    impl RouteReferrer for Page {
        fn routes(&self) -> Vec<Arc<Route>> {
            Vec::new()
        }
    }

    #[test]
    fn test_route_content_copied() {
        let content: Arc<dyn RouteReferrer> = Arc::new(Page);
        let route = Arc::new(Route::new("/page").with_content(Arc::clone(&content)));
        let mut defaults = RouteMatch::new();
        defaults.set(ROUTE_OBJECT_FIELD, ParamValue::Route(route));

        let result = RouteContentEnhancer::new()
            .enhance(defaults, &Request::new("/page"))
            .unwrap();
        assert!(Arc::ptr_eq(result.content().unwrap(), &content));
    }

    #[test]
    fn test_route_without_content_is_noop() {
        let mut defaults = RouteMatch::new();
        defaults.set(ROUTE_OBJECT_FIELD, ParamValue::Route(Arc::new(Route::new("/p"))));
        let result = RouteContentEnhancer::new()
            .enhance(defaults, &Request::new("/p"))
            .unwrap();
        assert!(!result.contains(CONTENT_FIELD));
    }

    struct StubRepository {
        known: Option<&'static str>,
        fail: bool,
    }

    impl ContentRepository for StubRepository {
        fn find_by_id(&self, id: &str) -> anyhow::Result<Option<Arc<dyn RouteReferrer>>> {
            if self.fail {
                return Err(anyhow!("backend down"));
            }
            Ok(self
                .known
                .filter(|k| *k == id)
                .map(|_| Arc::new(Page) as Arc<dyn RouteReferrer>))
        }
    }

    #[test]
    fn test_repository_resolves_id() {
        let enhancer = ContentRepositoryEnhancer::new(
            Arc::new(StubRepository {
                known: Some("page/1"),
                fail: false,
            }),
            "content_id",
            CONTENT_FIELD,
        );
        let mut defaults = RouteMatch::new();
        defaults.set("content_id", "page/1");
        let result = enhancer.enhance(defaults, &Request::new("/")).unwrap();
        assert!(result.content().is_some());
    }

    #[test]
    fn test_repository_miss_is_noop() {
        let enhancer = ContentRepositoryEnhancer::new(
            Arc::new(StubRepository {
                known: None,
                fail: false,
            }),
            "content_id",
            CONTENT_FIELD,
        );
        let mut defaults = RouteMatch::new();
        defaults.set("content_id", "page/404");
        let result = enhancer.enhance(defaults, &Request::new("/")).unwrap();
        assert!(!result.contains(CONTENT_FIELD));
    }

    #[test]
    fn test_repository_failure_propagates() {
        let enhancer = ContentRepositoryEnhancer::new(
            Arc::new(StubRepository {
                known: None,
                fail: true,
            }),
            "content_id",
            CONTENT_FIELD,
        );
        let mut defaults = RouteMatch::new();
        defaults.set("content_id", "page/1");
        let err = enhancer.enhance(defaults, &Request::new("/")).unwrap_err();
        assert!(matches!(err, MatchError::Failure(_)));
    }
}
