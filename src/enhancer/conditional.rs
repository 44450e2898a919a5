//! Conditionally scoped enhancers.

use super::RouteEnhancer;
use crate::context::Request;
use crate::error::MatchError;
use crate::matcher::RouteMatch;
use http::Method;
use regex::Regex;
use std::sync::Arc;

/// Predicate deciding whether an enhancer applies to a request.
pub trait RequestCondition: Send + Sync {
    fn matches(&self, request: &Request) -> bool;
}

/// Declarative request condition: all configured checks must pass.
#[derive(Default)]
pub struct RequestConditionSpec {
    methods: Vec<Method>,
    path: Option<Regex>,
    host: Option<String>,
}

impl RequestConditionSpec {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to the given methods
    #[must_use]
    pub fn with_methods(mut self, methods: Vec<Method>) -> Self {
        self.methods = methods;
        self
    }

    /// Restrict to paths matching a regex
    pub fn with_path(mut self, pattern: &str) -> Result<Self, MatchError> {
        let regex = Regex::new(pattern).map_err(|e| {
            MatchError::Failure(anyhow::anyhow!("invalid condition path pattern: {e}"))
        })?;
        self.path = Some(regex);
        Ok(self)
    }

    /// Restrict to an exact host
    #[must_use]
    pub fn with_host(mut self, host: &str) -> Self {
        self.host = Some(host.to_string());
        self
    }
}

impl RequestCondition for RequestConditionSpec {
    fn matches(&self, request: &Request) -> bool {
        if !self.methods.is_empty() && !self.methods.contains(request.method()) {
            return false;
        }
        if let Some(path) = &self.path {
            if !path.is_match(request.path()) {
                return false;
            }
        }
        if let Some(host) = &self.host {
            if request.host() != Some(host.as_str()) {
                return false;
            }
        }
        true
    }
}

/// Applies the enhancer of the first `(condition, enhancer)` pair whose
/// condition matches the request; pairs are evaluated in registration
/// order and at most one enhancer runs.
pub struct ConditionalEnhancer {
    entries: Vec<(Arc<dyn RequestCondition>, Arc<dyn RouteEnhancer>)>,
}

impl ConditionalEnhancer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_entry(
        mut self,
        condition: Arc<dyn RequestCondition>,
        enhancer: Arc<dyn RouteEnhancer>,
    ) -> Self {
        self.entries.push((condition, enhancer));
        self
    }
}

impl Default for ConditionalEnhancer {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteEnhancer for ConditionalEnhancer {
    fn enhance(&self, defaults: RouteMatch, request: &Request) -> Result<RouteMatch, MatchError> {
        for (condition, enhancer) in &self.entries {
            if condition.matches(request) {
                return enhancer.enhance(defaults, request);
            }
        }
        Ok(defaults)
    }
}
