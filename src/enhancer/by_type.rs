//! Type-dispatching field enhancer.

use super::RouteEnhancer;
use crate::content::RouteReferrer;
use crate::context::Request;
use crate::error::MatchError;
use crate::matcher::RouteMatch;
use std::sync::Arc;

/// Predicate over a content object, standing in for an "is instance of"
/// check. A predicate deciding on a supertype/tag keeps matching for
/// wrapped or more specific content implementations.
pub type TypePredicate = Arc<dyn Fn(&dyn RouteReferrer) -> bool + Send + Sync>;

/// Sets a target field based on the runtime type of the content object in a
/// source field, via an ordered list of `(predicate, value)` entries
/// evaluated linearly. First match wins.
///
/// No-op when the target is already set or the source field is absent or
/// not a content value.
pub struct FieldByTypeEnhancer {
    source: String,
    target: String,
    entries: Vec<(TypePredicate, String)>,
}

impl FieldByTypeEnhancer {
    #[must_use]
    pub fn new(source: &str, target: &str) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
            entries: Vec::new(),
        }
    }

    /// Append a `(predicate, value)` entry. Entries are evaluated in the
    /// order they were added.
    #[must_use]
    pub fn with_entry(
        mut self,
        predicate: impl Fn(&dyn RouteReferrer) -> bool + Send + Sync + 'static,
        value: &str,
    ) -> Self {
        self.entries.push((Arc::new(predicate), value.to_string()));
        self
    }
}

impl RouteEnhancer for FieldByTypeEnhancer {
    fn enhance(&self, mut defaults: RouteMatch, _request: &Request) -> Result<RouteMatch, MatchError> {
        if defaults.contains(&self.target) {
            return Ok(defaults);
        }
        let Some(content) = defaults.get(&self.source).and_then(|v| v.as_content()) else {
            return Ok(defaults);
        };

        let matched = self
            .entries
            .iter()
            .find(|(predicate, _)| predicate(content.as_ref()))
            .map(|(_, value)| value.clone());

        if let Some(value) = matched {
            defaults.set(self.target.as_str(), value);
        }
        Ok(defaults)
    }
}
