//! The route value: pattern, defaults, requirements, methods, schemes and
//! an optional content reference.

use crate::content::RouteReferrer;
use http::Method;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// One route: a path pattern plus the metadata needed to match and to
/// generate URLs from it.
///
/// Immutable after construction; build with the `with_*` methods and share
/// behind an `Arc`. Variables occupy whole path segments (`/posts/{slug}`),
/// matching `{var}` syntax used across the crate.
///
/// A route does not know its own name: names live in collections, and the
/// same route object may be known under different names to different
/// routers.
#[derive(Clone)]
pub struct Route {
    path: String,
    defaults: BTreeMap<String, String>,
    requirements: BTreeMap<String, String>,
    methods: Vec<Method>,
    schemes: Vec<String>,
    content: Option<Arc<dyn RouteReferrer>>,
}

impl Route {
    /// Create a route for a path pattern (e.g. `/users/{id}`).
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            defaults: BTreeMap::new(),
            requirements: BTreeMap::new(),
            methods: Vec::new(),
            schemes: Vec::new(),
            content: None,
        }
    }

    /// Set a default value for a parameter.
    ///
    /// Defaults fill variables missing from generation parameters and are
    /// merged into every match result.
    #[must_use]
    pub fn with_default(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.defaults.insert(name.into(), value.into());
        self
    }

    /// Set a requirement regex for a variable (e.g. `id` → `\d+`).
    ///
    /// The regex is implicitly anchored to the whole segment/value.
    #[must_use]
    pub fn with_requirement(mut self, name: impl Into<String>, regex: impl Into<String>) -> Self {
        self.requirements.insert(name.into(), regex.into());
        self
    }

    /// Restrict the route to the given HTTP methods (empty = any method).
    #[must_use]
    pub fn with_methods(mut self, methods: Vec<Method>) -> Self {
        self.methods = methods;
        self
    }

    /// Restrict the route to the given schemes (empty = any scheme).
    #[must_use]
    pub fn with_schemes(mut self, schemes: Vec<String>) -> Self {
        self.schemes = schemes.into_iter().map(|s| s.to_lowercase()).collect();
        self
    }

    /// Associate a content object with this route.
    #[must_use]
    pub fn with_content(mut self, content: Arc<dyn RouteReferrer>) -> Self {
        self.content = Some(content);
        self
    }

    #[inline]
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn defaults(&self) -> &BTreeMap<String, String> {
        &self.defaults
    }

    /// Default value for one parameter
    #[must_use]
    pub fn default(&self, name: &str) -> Option<&str> {
        self.defaults.get(name).map(|v| v.as_str())
    }

    /// Requirement regex source for one variable
    #[must_use]
    pub fn requirement(&self, name: &str) -> Option<&str> {
        self.requirements.get(name).map(|v| v.as_str())
    }

    #[must_use]
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    #[must_use]
    pub fn schemes(&self) -> &[String] {
        &self.schemes
    }

    #[must_use]
    pub fn content(&self) -> Option<&Arc<dyn RouteReferrer>> {
        self.content.as_ref()
    }

    /// Variable names in pattern order.
    ///
    /// A variable is a whole segment of the form `{name}`.
    #[must_use]
    pub fn variables(&self) -> Vec<&str> {
        self.path
            .split('/')
            .filter_map(|segment| {
                segment
                    .strip_prefix('{')
                    .and_then(|rest| rest.strip_suffix('}'))
            })
            .collect()
    }

    /// Whether the pattern contains the given variable
    #[must_use]
    pub fn has_variable(&self, name: &str) -> bool {
        self.variables().iter().any(|v| *v == name)
    }

    /// Longest static `/`-delimited prefix before the first variable.
    ///
    /// This is the key a storage-backed provider indexes routes under, and
    /// what gets intersected with the candidate prefixes of an incoming
    /// request. A fully static pattern is its own prefix.
    #[must_use]
    pub fn static_prefix(&self) -> &str {
        match self.path.find('{') {
            None => &self.path,
            Some(idx) => {
                let prefix = &self.path[..idx];
                match prefix.rfind('/') {
                    Some(0) | None => "/",
                    Some(pos) => &prefix[..pos],
                }
            }
        }
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("path", &self.path)
            .field("defaults", &self.defaults)
            .field("requirements", &self.requirements)
            .field("methods", &self.methods)
            .field("schemes", &self.schemes)
            .field("has_content", &self.content.is_some())
            .finish()
    }
}
