//! Router assembled from a matcher, a generator and the enhancer pipeline.

use super::Router;
use crate::context::{Request, RequestContext};
use crate::enhancer::RouteEnhancer;
use crate::error::{GenerateError, MatchError};
use crate::events::{GenerateIntent, RouterListener};
use crate::generator::{GenerateParams, RouteTarget, UrlGenerator, UrlReference};
use crate::matcher::{RequestMatcher, RouteMatch, UrlMatcher};
use crate::priority::PriorityList;
use crate::provider::RouteProvider;
use crate::route::{LazyRouteCollection, RouteCollection, Routes};
use anyhow::anyhow;
use regex::Regex;
use std::sync::{Arc, RwLock};
use tracing::debug;

enum Matcher {
    Url(Arc<dyn UrlMatcher>),
    Request(Arc<dyn RequestMatcher>),
}

/// A single router: matcher, generator, optional listeners, optional URI
/// pre-filter, and the enhancer pipeline.
///
/// The pre-filter regex rejects non-matching paths before the (possibly
/// expensive) matcher runs. Listeners observe matching and may rewrite
/// generation input. Enhancers post-process every successful match in
/// priority order.
pub struct DynamicRouter {
    matcher: Matcher,
    generator: Arc<dyn UrlGenerator>,
    enhancers: PriorityList<Arc<dyn RouteEnhancer>>,
    listeners: Vec<Arc<dyn RouterListener>>,
    uri_filter: Option<Regex>,
    provider: Option<Arc<dyn RouteProvider>>,
    context: RwLock<RequestContext>,
}

impl DynamicRouter {
    /// Router over a URL matcher: both `match_url` and `match_request`
    /// work.
    #[must_use]
    pub fn with_url_matcher(
        matcher: Arc<dyn UrlMatcher>,
        generator: Arc<dyn UrlGenerator>,
    ) -> Self {
        Self::assemble(Matcher::Url(matcher), generator)
    }

    /// Router over a request matcher: `match_url` is a configuration error,
    /// since a URL string cannot supply a full request.
    #[must_use]
    pub fn with_request_matcher(
        matcher: Arc<dyn RequestMatcher>,
        generator: Arc<dyn UrlGenerator>,
    ) -> Self {
        Self::assemble(Matcher::Request(matcher), generator)
    }

    fn assemble(matcher: Matcher, generator: Arc<dyn UrlGenerator>) -> Self {
        Self {
            matcher,
            generator,
            enhancers: PriorityList::new(),
            listeners: Vec::new(),
            uri_filter: None,
            provider: None,
            context: RwLock::new(RequestContext::default()),
        }
    }

    /// Register an enhancer. Higher priorities run first; equal priorities
    /// run in registration order.
    pub fn add_enhancer(&self, enhancer: Arc<dyn RouteEnhancer>, priority: i32) {
        self.enhancers.add(enhancer, priority);
    }

    /// Register a listener.
    #[must_use]
    pub fn with_listener(mut self, listener: Arc<dyn RouterListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    /// Set the URI pre-filter: paths not matching the pattern fail fast
    /// with not-found before the matcher is consulted.
    pub fn with_uri_filter(mut self, pattern: &str) -> Result<Self, MatchError> {
        let regex = Regex::new(pattern)
            .map_err(|e| MatchError::Failure(anyhow!("invalid uri filter pattern: {e}")))?;
        self.uri_filter = Some(regex);
        Ok(self)
    }

    /// Expose the backing provider so
    /// [`route_collection`](Router::route_collection) can serve a lazy
    /// collection instead of an empty one.
    #[must_use]
    pub fn with_route_provider(mut self, provider: Arc<dyn RouteProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    fn check_uri_filter(&self, path: &str) -> Result<(), MatchError> {
        if let Some(filter) = &self.uri_filter {
            if !filter.is_match(path) {
                debug!(path = %path, filter = %filter.as_str(), "Path rejected by uri filter");
                return Err(MatchError::NotFound(format!(
                    "path '{path}' does not match the configured uri filter"
                )));
            }
        }
        Ok(())
    }

    fn apply_enhancers(
        &self,
        mut result: RouteMatch,
        request: &Request,
    ) -> Result<RouteMatch, MatchError> {
        for enhancer in self.enhancers.sorted().iter() {
            result = enhancer.enhance(result, request)?;
        }
        Ok(result)
    }
}

impl Router for DynamicRouter {
    fn match_url(&self, url: &str) -> Result<RouteMatch, MatchError> {
        let request = Request::from_url(url)?;
        for listener in &self.listeners {
            listener.on_pre_match(&request);
        }
        self.check_uri_filter(request.path())?;

        let Matcher::Url(matcher) = &self.matcher else {
            return Err(MatchError::Failure(anyhow!(
                "matcher does not support url matching; use match_request"
            )));
        };
        let result = matcher.match_path(request.path())?;
        self.apply_enhancers(result, &request)
    }

    fn match_request(&self, request: &Request) -> Result<RouteMatch, MatchError> {
        for listener in &self.listeners {
            listener.on_pre_match(request);
        }
        self.check_uri_filter(request.path())?;

        let result = match &self.matcher {
            Matcher::Url(matcher) => matcher.match_path(request.path())?,
            Matcher::Request(matcher) => matcher.match_request(request)?,
        };
        self.apply_enhancers(result, request)
    }

    fn needs_request(&self) -> bool {
        matches!(self.matcher, Matcher::Request(_))
    }

    fn generate(
        &self,
        target: &RouteTarget,
        params: &GenerateParams,
        reference: UrlReference,
    ) -> Result<String, GenerateError> {
        let mut intent = GenerateIntent {
            target: target.clone(),
            params: params.clone(),
            reference,
        };
        for listener in &self.listeners {
            listener.on_pre_generate(&mut intent);
        }
        let context = self.context();
        self.generator
            .generate(&intent.target, &intent.params, intent.reference, &context)
    }

    fn supports_target(&self, target: &RouteTarget) -> bool {
        self.generator.supports_target(target)
    }

    fn route_debug_message(&self, target: &RouteTarget, params: &GenerateParams) -> String {
        self.generator.route_debug_message(target, params)
    }

    fn set_context(&self, context: RequestContext) {
        *self.context.write().expect("router context lock poisoned") = context;
    }

    fn context(&self) -> RequestContext {
        self.context
            .read()
            .expect("router context lock poisoned")
            .clone()
    }

    fn route_collection(&self) -> Arc<dyn Routes> {
        match &self.provider {
            Some(provider) => Arc::new(LazyRouteCollection::new(Arc::clone(provider))),
            None => Arc::new(RouteCollection::new()),
        }
    }
}
