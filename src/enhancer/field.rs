//! Field-presence and field-map enhancers.

use super::RouteEnhancer;
use crate::context::Request;
use crate::error::MatchError;
use crate::matcher::RouteMatch;
use std::collections::HashMap;

/// Sets a target field to a fixed value when the target is not already set
/// and an optional source field is present.
///
/// With no source configured the value is set unconditionally (unless the
/// target already exists). Typical use: default a `_controller` whenever a
/// `_content` was resolved.
#[derive(Debug, Clone)]
pub struct FieldPresenceEnhancer {
    source: Option<String>,
    target: String,
    value: String,
}

impl FieldPresenceEnhancer {
    #[must_use]
    pub fn new(source: Option<&str>, target: &str, value: &str) -> Self {
        Self {
            source: source.map(|s| s.to_string()),
            target: target.to_string(),
            value: value.to_string(),
        }
    }
}

impl RouteEnhancer for FieldPresenceEnhancer {
    fn enhance(&self, mut defaults: RouteMatch, _request: &Request) -> Result<RouteMatch, MatchError> {
        if defaults.contains(&self.target) {
            return Ok(defaults);
        }
        if let Some(source) = &self.source {
            if !defaults.contains(source) {
                return Ok(defaults);
            }
        }
        defaults.set(self.target.as_str(), self.value.as_str());
        Ok(defaults)
    }
}

/// Sets a target field by looking up the string value of a source field in
/// a static map. No-op when the target is already set or the source value
/// has no mapping.
#[derive(Debug, Clone)]
pub struct FieldMapEnhancer {
    source: String,
    target: String,
    map: HashMap<String, String>,
}

impl FieldMapEnhancer {
    #[must_use]
    pub fn new(source: &str, target: &str, map: HashMap<String, String>) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
            map,
        }
    }
}

impl RouteEnhancer for FieldMapEnhancer {
    fn enhance(&self, mut defaults: RouteMatch, _request: &Request) -> Result<RouteMatch, MatchError> {
        if defaults.contains(&self.target) {
            return Ok(defaults);
        }
        let Some(source_value) = defaults.get_str(&self.source) else {
            return Ok(defaults);
        };
        if let Some(mapped) = self.map.get(source_value) {
            let mapped = mapped.clone();
            defaults.set(self.target.as_str(), mapped);
        }
        Ok(defaults)
    }
}
