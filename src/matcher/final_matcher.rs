//! Built-in regex final matcher.

use super::pattern;
use super::result::{ParamValue, RouteMatch, ROUTE_NAME_FIELD, ROUTE_OBJECT_FIELD};
use super::FinalMatcher;
use crate::context::Request;
use crate::error::MatchError;
use crate::route::{RouteCollection, Routes};
use http::Method;
use std::sync::Arc;
use tracing::{debug, info};

/// Selects one route from a candidate collection by full regex matching.
///
/// Candidates are tried in collection (insertion) order and the first route
/// whose compiled pattern matches the request path wins. A path match with
/// the wrong HTTP method is remembered so exhaustion reports
/// method-not-allowed with the union of acceptable methods instead of a
/// bare miss.
#[derive(Debug, Clone, Default)]
pub struct RegexFinalMatcher;

impl RegexFinalMatcher {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl FinalMatcher for RegexFinalMatcher {
    fn final_match(
        &self,
        collection: RouteCollection,
        request: &Request,
    ) -> Result<RouteMatch, MatchError> {
        let mut allowed: Vec<Method> = Vec::new();

        for (name, route) in collection.iter() {
            // Scheme restriction: skip when the request scheme is known and excluded
            if !route.schemes().is_empty() {
                if let Some(scheme) = request.scheme() {
                    if !route.schemes().iter().any(|s| s == scheme) {
                        continue;
                    }
                }
            }

            let regex = pattern::compile(&route)?;
            let Some(caps) = regex.captures(request.path()) else {
                continue;
            };

            if !route.methods().is_empty() && !route.methods().contains(request.method()) {
                for method in route.methods() {
                    if !allowed.contains(method) {
                        allowed.push(method.clone());
                    }
                }
                continue;
            }

            let mut result = RouteMatch::new();
            result.set(ROUTE_NAME_FIELD, name.as_str());
            result.set(ROUTE_OBJECT_FIELD, ParamValue::Route(Arc::clone(&route)));
            for (key, value) in route.defaults() {
                result.set(key.as_str(), value.as_str());
            }
            for var in route.variables() {
                if let Some(m) = caps.name(var) {
                    result.set(var, m.as_str());
                }
            }

            info!(
                method = %request.method(),
                path = %request.path(),
                route_name = %name,
                route_pattern = %route.path(),
                "Route matched"
            );

            return Ok(result);
        }

        if allowed.is_empty() {
            debug!(
                method = %request.method(),
                path = %request.path(),
                candidate_count = collection.len(),
                "No candidate route matched"
            );
            Err(MatchError::NotFound(format!(
                "no route matches path '{}'",
                request.path()
            )))
        } else {
            Err(MatchError::MethodNotAllowed { allowed })
        }
    }
}
