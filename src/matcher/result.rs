//! The match result: an ordered field map with reserved keys.

use crate::content::RouteReferrer;
use crate::route::Route;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// Matched route name
pub const ROUTE_NAME_FIELD: &str = "_route";
/// Matched route object
pub const ROUTE_OBJECT_FIELD: &str = "_route_object";
/// Controller / handler identifier consumed by the dispatch layer
pub const CONTROLLER_FIELD: &str = "_controller";
/// Content object resolved for the matched route
pub const CONTENT_FIELD: &str = "_content";
/// Negotiated locale
pub const LOCALE_FIELD: &str = "_locale";

/// Maximum number of match-result fields before heap allocation.
/// Most matches carry a handful of fields (route name, route object,
/// controller, a couple of path variables).
pub const MAX_INLINE_FIELDS: usize = 8;

/// One value in a match result.
///
/// The matching layer produces `String` values (defaults and extracted path
/// variables) plus the reserved route object; enhancers may add any variant.
#[derive(Clone)]
pub enum ParamValue {
    String(String),
    Json(serde_json::Value),
    Route(Arc<Route>),
    Content(Arc<dyn RouteReferrer>),
}

impl ParamValue {
    /// String form, for `String` values
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_route(&self) -> Option<&Arc<Route>> {
        match self {
            ParamValue::Route(r) => Some(r),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_content(&self) -> Option<&Arc<dyn RouteReferrer>> {
        match self {
            ParamValue::Content(c) => Some(c),
            _ => None,
        }
    }
}

impl fmt::Debug for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::String(s) => write!(f, "String({s:?})"),
            ParamValue::Json(v) => write!(f, "Json({v})"),
            ParamValue::Route(r) => write!(f, "Route({:?})", r.path()),
            ParamValue::Content(c) => {
                write!(f, "Content({:?})", c.content_id().unwrap_or_default())
            }
        }
    }
}

impl PartialEq for ParamValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ParamValue::String(a), ParamValue::String(b)) => a == b,
            (ParamValue::Json(a), ParamValue::Json(b)) => a == b,
            (ParamValue::Route(a), ParamValue::Route(b)) => Arc::ptr_eq(a, b),
            (ParamValue::Content(a), ParamValue::Content(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::String(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::String(value)
    }
}

/// Ordered string-keyed map produced by a successful match.
///
/// Field order is insertion order; setting an existing field replaces its
/// value in place. The matching layer owns the reserved fields
/// ([`ROUTE_NAME_FIELD`], [`ROUTE_OBJECT_FIELD`]); everything else is open
/// to enhancers, which add fields strictly additively.
#[derive(Clone, Default)]
pub struct RouteMatch {
    entries: SmallVec<[(String, ParamValue); MAX_INLINE_FIELDS]>,
}

impl RouteMatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a field by name
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    /// Get a field's string value by name
    #[inline]
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|v| v.as_str())
    }

    /// Whether a field is set
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == name)
    }

    /// Set a field, replacing an existing value in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Iterate fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Matched route name ([`ROUTE_NAME_FIELD`])
    #[must_use]
    pub fn route_name(&self) -> Option<&str> {
        self.get_str(ROUTE_NAME_FIELD)
    }

    /// Matched route object ([`ROUTE_OBJECT_FIELD`])
    #[must_use]
    pub fn route(&self) -> Option<&Arc<Route>> {
        self.get(ROUTE_OBJECT_FIELD).and_then(|v| v.as_route())
    }

    /// Resolved content object ([`CONTENT_FIELD`])
    #[must_use]
    pub fn content(&self) -> Option<&Arc<dyn RouteReferrer>> {
        self.get(CONTENT_FIELD).and_then(|v| v.as_content())
    }

    /// Negotiated locale ([`LOCALE_FIELD`])
    #[must_use]
    pub fn locale(&self) -> Option<&str> {
        self.get_str(LOCALE_FIELD)
    }
}

impl fmt::Debug for RouteMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
