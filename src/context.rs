//! Request and request-context values the routing core operates on.
//!
//! [`Request`] is the light, transport-free view of one incoming request:
//! method, decoded path, optional scheme/host, query parameters and free-form
//! attributes. [`RequestContext`] carries the ambient information URL
//! generation needs (host, scheme, ports, base path) and is shared by
//! reference across all chained routers for the duration of a request; the
//! top-level caller is the only writer.

use crate::error::MatchError;
use anyhow::anyhow;
use http::Method;
use std::collections::HashMap;

/// One incoming request as seen by the routing core.
///
/// Constructed either directly from a path or parsed from a URL string with
/// [`Request::from_url`]. Transport concerns (headers, body) live outside
/// the routing core.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    path: String,
    scheme: Option<String>,
    host: Option<String>,
    query_params: HashMap<String, String>,
    attributes: HashMap<String, String>,
}

impl Request {
    /// Create a GET request for a plain path (no query string parsing).
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            scheme: None,
            host: None,
            query_params: HashMap::new(),
            attributes: HashMap::new(),
        }
    }

    /// Parse a URL into a request.
    ///
    /// Accepts absolute URLs (`https://host/path?q=1`) and plain paths
    /// (`/path?q=1`). Query parameters are URL-decoded; the path is kept
    /// as supplied.
    pub fn from_url(url: &str) -> Result<Self, MatchError> {
        let mut request = if url.contains("://") {
            let parsed = url::Url::parse(url)
                .map_err(|e| MatchError::Failure(anyhow!("invalid url '{url}': {e}")))?;
            let mut req = Request::new(parsed.path());
            req.scheme = Some(parsed.scheme().to_string());
            req.host = parsed.host_str().map(|h| h.to_string());
            if let Some(query) = parsed.query() {
                req.query_params = parse_query(query);
            }
            req
        } else {
            match url.split_once('?') {
                Some((path, query)) => {
                    let mut req = Request::new(if path.is_empty() { "/" } else { path });
                    req.query_params = parse_query(query);
                    req
                }
                None => Request::new(if url.is_empty() { "/" } else { url }),
            }
        };
        if request.path.is_empty() {
            request.path = "/".to_string();
        }
        Ok(request)
    }

    /// Set the HTTP method
    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Set a free-form attribute (e.g. a negotiated locale)
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set the scheme
    #[must_use]
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[inline]
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Get a query parameter by name
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_params.get(name).map(|v| v.as_str())
    }

    /// Get an attribute by name
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|v| v.as_str())
    }
}

fn parse_query(query: &str) -> HashMap<String, String> {
    url::form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Ambient request information shared by all chained routers.
///
/// Read by URL generation (scheme, host, ports, base path) and by locale
/// negotiation (the `_locale` parameter). Propagated to routers with
/// `set_context`; routers only read it.
#[derive(Debug, Clone)]
pub struct RequestContext {
    scheme: String,
    host: String,
    http_port: u16,
    https_port: u16,
    base_path: String,
    path_info: String,
    method: Method,
    query_string: String,
    parameters: HashMap<String, String>,
}

impl Default for RequestContext {
    fn default() -> Self {
        Self {
            scheme: "http".to_string(),
            host: "localhost".to_string(),
            http_port: 80,
            https_port: 443,
            base_path: String::new(),
            path_info: "/".to_string(),
            method: Method::GET,
            query_string: String::new(),
            parameters: HashMap::new(),
        }
    }
}

impl RequestContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    #[must_use]
    pub fn with_http_port(mut self, port: u16) -> Self {
        self.http_port = port;
        self
    }

    #[must_use]
    pub fn with_https_port(mut self, port: u16) -> Self {
        self.https_port = port;
        self
    }

    /// Prefix prepended to every generated path (e.g. `/app`)
    #[must_use]
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// Path of the request currently being handled; the anchor for
    /// relative-path URL generation
    #[must_use]
    pub fn with_path_info(mut self, path_info: impl Into<String>) -> Self {
        self.path_info = path_info.into();
        self
    }

    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    #[must_use]
    pub fn with_query_string(mut self, query_string: impl Into<String>) -> Self {
        self.query_string = query_string.into();
        self
    }

    /// Set an auxiliary named parameter (e.g. the negotiated `_locale`)
    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn http_port(&self) -> u16 {
        self.http_port
    }

    #[must_use]
    pub fn https_port(&self) -> u16 {
        self.https_port
    }

    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    #[must_use]
    pub fn path_info(&self) -> &str {
        &self.path_info
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn query_string(&self) -> &str {
        &self.query_string
    }

    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(|v| v.as_str())
    }
}
