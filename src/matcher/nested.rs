//! The three-stage nested matcher.

use super::{FinalMatcher, RequestMatcher, RouteFilter, RouteMatch};
use crate::context::Request;
use crate::error::MatchError;
use crate::priority::PriorityList;
use crate::provider::RouteProvider;
use crate::route::Routes;
use std::sync::Arc;
use tracing::debug;

/// Matcher that resolves a request against a possibly huge backing store in
/// three stages: candidate retrieval (provider), in-memory filtering
/// (priority-ordered [`RouteFilter`]s), and final selection (one
/// [`FinalMatcher`]).
///
/// Separating cheap-and-imprecise retrieval from cheap-and-imprecise
/// filtering from expensive-and-precise final matching lets a large store
/// scale without scanning all of its routes per request.
pub struct NestedMatcher {
    provider: Arc<dyn RouteProvider>,
    filters: PriorityList<Arc<dyn RouteFilter>>,
    final_matcher: Arc<dyn FinalMatcher>,
}

impl NestedMatcher {
    #[must_use]
    pub fn new(provider: Arc<dyn RouteProvider>, final_matcher: Arc<dyn FinalMatcher>) -> Self {
        Self {
            provider,
            filters: PriorityList::new(),
            final_matcher,
        }
    }

    /// Register a filter. Higher priorities run first; equal priorities run
    /// in registration order.
    pub fn add_filter(&self, filter: Arc<dyn RouteFilter>, priority: i32) {
        self.filters.add(filter, priority);
    }
}

impl RequestMatcher for NestedMatcher {
    fn match_request(&self, request: &Request) -> Result<RouteMatch, MatchError> {
        let mut collection = self.provider.route_collection_for_request(request)?;
        if collection.is_empty() {
            return Err(MatchError::NotFound(format!(
                "no candidate routes for path '{}'",
                request.path()
            )));
        }

        debug!(
            path = %request.path(),
            candidate_count = collection.len(),
            filter_count = self.filters.len(),
            "Candidate collection entering filter stage"
        );

        for filter in self.filters.sorted().iter() {
            collection = filter.filter(collection, request)?;
        }

        self.final_matcher.final_match(collection, request)
    }
}
