//! Content-aware URL generation with locale negotiation.

use super::{build_url, GenerateParams, RouteTarget, UrlGenerator, UrlReference};
use crate::content::{ContentRepository, RouteReferrer};
use crate::context::RequestContext;
use crate::error::GenerateError;
use crate::matcher::LOCALE_FIELD;
use crate::provider::RouteProvider;
use crate::route::Route;
use regex::Regex;
use std::sync::Arc;
use tracing::debug;

/// Generator resolving a route from a name, a route object, or a content
/// object, with locale negotiation over the content's route variants.
///
/// Target precedence: an explicit route object is used directly; a
/// non-empty name is resolved through the route provider; otherwise a
/// content object must be available, either as the target itself or looked
/// up from a `content_id` parameter through the content repository.
pub struct ContentAwareGenerator {
    provider: Arc<dyn RouteProvider>,
    repository: Option<Arc<dyn ContentRepository>>,
    default_locale: Option<String>,
}

impl ContentAwareGenerator {
    #[must_use]
    pub fn new(provider: Arc<dyn RouteProvider>) -> Self {
        Self {
            provider,
            repository: None,
            default_locale: None,
        }
    }

    /// Configure the repository used to resolve `content_id` parameters.
    #[must_use]
    pub fn with_content_repository(mut self, repository: Arc<dyn ContentRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Configure the locale used when neither the parameters nor the
    /// context carry one.
    #[must_use]
    pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = Some(locale.into());
        self
    }

    /// Locale to generate for: explicit `_locale` parameter, else the
    /// context's `_locale` parameter, else the configured default.
    fn desired_locale(&self, params: &GenerateParams, context: &RequestContext) -> Option<String> {
        params
            .get(LOCALE_FIELD)
            .cloned()
            .or_else(|| context.parameter(LOCALE_FIELD).map(|l| l.to_string()))
            .or_else(|| self.default_locale.clone())
    }

    /// Whether a route's own `_locale` requirement accepts the locale.
    fn locale_matches(route: &Route, locale: &str) -> bool {
        let Some(requirement) = route.requirement(LOCALE_FIELD) else {
            return false;
        };
        match Regex::new(&format!("^(?:{requirement})$")) {
            Ok(regex) => regex.is_match(locale),
            Err(err) => {
                debug!(
                    pattern = %route.path(),
                    error = %err,
                    "Unparseable _locale requirement treated as non-matching"
                );
                false
            }
        }
    }

    /// Best route for the desired locale among a resolved route and the
    /// variants of its associated content.
    ///
    /// Keeps the route when it already satisfies the locale (or no locale
    /// is desired); otherwise returns the first matching variant, falling
    /// back to the content's first route deterministically.
    fn best_locale_route(
        &self,
        route: Arc<Route>,
        params: &GenerateParams,
        context: &RequestContext,
    ) -> Arc<Route> {
        let Some(locale) = self.desired_locale(params, context) else {
            return route;
        };
        if Self::locale_matches(&route, &locale) {
            return route;
        }
        let Some(content) = route.content() else {
            return route;
        };
        let variants = content.routes();
        variants
            .iter()
            .find(|candidate| Self::locale_matches(candidate, &locale))
            .or_else(|| variants.first())
            .map(Arc::clone)
            .unwrap_or(route)
    }

    /// Route for a content target: first variant matching the desired
    /// locale, else deterministically the first variant.
    fn route_from_content(
        &self,
        content: &dyn RouteReferrer,
        params: &GenerateParams,
        context: &RequestContext,
    ) -> Result<Arc<Route>, GenerateError> {
        let routes = content.routes();
        if routes.is_empty() {
            return Err(GenerateError::NotFound(format!(
                "content '{}' has no routes",
                content.content_id().unwrap_or_else(|| "unknown".to_string())
            )));
        }
        let chosen = match self.desired_locale(params, context) {
            Some(locale) => routes
                .iter()
                .find(|candidate| Self::locale_matches(candidate, &locale))
                .unwrap_or(&routes[0]),
            None => &routes[0],
        };
        Ok(Arc::clone(chosen))
    }

    /// Content object for an empty-name target, via the `content_id`
    /// parameter and the configured repository.
    fn content_by_id(&self, id: &str) -> Result<Arc<dyn RouteReferrer>, GenerateError> {
        let repository = self.repository.as_ref().ok_or_else(|| {
            GenerateError::NotFound(format!(
                "cannot resolve content id '{id}': no content repository configured"
            ))
        })?;
        repository
            .find_by_id(id)?
            .ok_or_else(|| GenerateError::NotFound(format!("no content found for id '{id}'")))
    }

    /// Drop `_locale` from the parameters when it equals the chosen route's
    /// own default locale and the pattern has no `_locale` variable, so it
    /// does not leak into the query string.
    fn unset_locale_if_not_needed(route: &Route, params: &mut GenerateParams) {
        let Some(locale) = params.get(LOCALE_FIELD) else {
            return;
        };
        if route.default(LOCALE_FIELD) == Some(locale.as_str())
            && !route.has_variable(LOCALE_FIELD)
        {
            params.remove(LOCALE_FIELD);
        }
    }
}

impl UrlGenerator for ContentAwareGenerator {
    fn generate(
        &self,
        target: &RouteTarget,
        params: &GenerateParams,
        reference: UrlReference,
        context: &RequestContext,
    ) -> Result<String, GenerateError> {
        let mut params = params.clone();

        let route = match target {
            RouteTarget::Route(route) => {
                self.best_locale_route(Arc::clone(route), &params, context)
            }
            RouteTarget::Name(name) if !name.is_empty() => {
                let route = self.provider.route_by_name(name)?;
                self.best_locale_route(route, &params, context)
            }
            RouteTarget::Content(content) => {
                self.route_from_content(content.as_ref(), &params, context)?
            }
            RouteTarget::Name(_) => {
                let id = params.get("content_id").cloned().ok_or_else(|| {
                    GenerateError::NotFound(
                        "no route name and no content_id parameter given".to_string(),
                    )
                })?;
                let content = self.content_by_id(&id)?;
                params.remove("content_id");
                self.route_from_content(content.as_ref(), &params, context)?
            }
        };

        Self::unset_locale_if_not_needed(&route, &mut params);

        debug!(
            target = ?target,
            route_pattern = %route.path(),
            reference = ?reference,
            "Route resolved for generation"
        );

        build_url(&route, &params, context, reference)
    }

    fn supports_target(&self, _target: &RouteTarget) -> bool {
        true
    }

    fn route_debug_message(&self, target: &RouteTarget, params: &GenerateParams) -> String {
        match target {
            RouteTarget::Name(name) if name.is_empty() => match params.get("content_id") {
                Some(id) => format!("content id '{id}'"),
                None => "empty route name without content_id".to_string(),
            },
            RouteTarget::Name(name) => format!("route '{name}' not found"),
            RouteTarget::Route(route) => format!("route with pattern '{}'", route.path()),
            RouteTarget::Content(content) => format!(
                "content '{}'",
                content.content_id().unwrap_or_else(|| "unknown".to_string())
            ),
        }
    }
}
