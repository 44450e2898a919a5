//! Low-level URL rendering.
//!
//! Turns a resolved route plus parameters into a URL string: variables are
//! substituted segment by segment (escaped, validated against the route's
//! requirements), leftover parameters that differ from the route's defaults
//! become the query string, and the request context supplies base path,
//! scheme, host and ports for the requested reference type.

use super::{GenerateParams, UrlReference};
use crate::context::RequestContext;
use crate::error::GenerateError;
use crate::route::Route;
use regex::Regex;

/// Render a URL for a route.
///
/// Every variable of the pattern must be satisfied by `params` or by the
/// route's defaults; a missing variable or a value failing its requirement
/// is a `NotFound` (the chain may still find another router that can
/// generate the target).
pub fn build_url(
    route: &Route,
    params: &GenerateParams,
    context: &RequestContext,
    reference: UrlReference,
) -> Result<String, GenerateError> {
    let variables = route.variables();

    let mut path = String::with_capacity(route.path().len());
    for segment in route.path().split('/') {
        if segment.is_empty() {
            continue;
        }
        match segment
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
        {
            Some(name) => {
                let value = params
                    .get(name)
                    .map(|v| v.as_str())
                    .or_else(|| route.default(name))
                    .ok_or_else(|| {
                        GenerateError::NotFound(format!(
                            "missing required parameter '{name}' for route '{}'",
                            route.path()
                        ))
                    })?;
                check_requirement(route, name, value)?;
                path.push('/');
                path.push_str(&urlencoding::encode(value));
            }
            None => {
                path.push('/');
                path.push_str(segment);
            }
        }
    }
    if path.is_empty() {
        path.push('/');
    }

    let query = render_query(route, params, &variables);
    let full_path = format!("{}{}", context.base_path(), path);

    let url = match reference {
        UrlReference::AbsolutePath => format!("{full_path}{query}"),
        UrlReference::AbsoluteUrl => format!(
            "{}://{}{}{}",
            context.scheme(),
            host_with_port(context),
            full_path,
            query
        ),
        UrlReference::NetworkPath => {
            format!("//{}{}{}", host_with_port(context), full_path, query)
        }
        UrlReference::RelativePath => {
            format!("{}{}", relative_path(context.path_info(), &full_path), query)
        }
    };

    Ok(url)
}

fn check_requirement(route: &Route, name: &str, value: &str) -> Result<(), GenerateError> {
    let Some(requirement) = route.requirement(name) else {
        return Ok(());
    };
    let anchored = format!("^(?:{requirement})$");
    let regex = Regex::new(&anchored).map_err(|e| {
        GenerateError::Failure(anyhow::anyhow!(
            "invalid requirement for variable '{name}' of route '{}': {e}",
            route.path()
        ))
    })?;
    if regex.is_match(value) {
        Ok(())
    } else {
        Err(GenerateError::NotFound(format!(
            "parameter '{name}' value '{value}' does not satisfy requirement '{requirement}' \
             of route '{}'",
            route.path()
        )))
    }
}

/// Leftover parameters (not consumed by the pattern and different from the
/// route's defaults) rendered as a sorted query string.
fn render_query(route: &Route, params: &GenerateParams, variables: &[&str]) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    let mut any = false;
    for (key, value) in params {
        if variables.iter().any(|v| v == key) {
            continue;
        }
        if route.default(key) == Some(value.as_str()) {
            continue;
        }
        serializer.append_pair(key, value);
        any = true;
    }
    if any {
        format!("?{}", serializer.finish())
    } else {
        String::new()
    }
}

fn host_with_port(context: &RequestContext) -> String {
    let scheme = context.scheme();
    if scheme == "https" && context.https_port() != 443 {
        format!("{}:{}", context.host(), context.https_port())
    } else if scheme == "http" && context.http_port() != 80 {
        format!("{}:{}", context.host(), context.http_port())
    } else {
        context.host().to_string()
    }
}

/// Relative reference from `base` (the path currently being handled) to
/// `target`.
fn relative_path(base: &str, target: &str) -> String {
    if base == target {
        return String::new();
    }

    let mut source_dirs: Vec<&str> = base.trim_start_matches('/').split('/').collect();
    let mut target_dirs: Vec<&str> = target.trim_start_matches('/').split('/').collect();
    source_dirs.pop();
    let target_file = target_dirs.pop().unwrap_or("");

    let mut common = 0;
    while common < source_dirs.len()
        && common < target_dirs.len()
        && source_dirs[common] == target_dirs[common]
    {
        common += 1;
    }

    let mut path = "../".repeat(source_dirs.len() - common);
    let mut remaining: Vec<&str> = target_dirs[common..].to_vec();
    remaining.push(target_file);
    path.push_str(&remaining.join("/"));

    // A first segment that is empty or contains a colon would change how
    // browsers interpret the reference; anchor it explicitly.
    let first = path.split('/').next().unwrap_or("");
    if path.is_empty() {
        "./".to_string()
    } else if path.starts_with('/') || first.contains(':') {
        format!("./{path}")
    } else {
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn params(pairs: &[(&str, &str)]) -> GenerateParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_absolute_path_with_variables() {
        let route = Route::new("/users/{id}/posts/{post_id}");
        let url = build_url(
            &route,
            &params(&[("id", "42"), ("post_id", "7")]),
            &RequestContext::default(),
            UrlReference::AbsolutePath,
        )
        .unwrap();
        assert_eq!(url, "/users/42/posts/7");
    }

    #[test]
    fn test_default_fills_missing_variable() {
        let route = Route::new("/pages/{slug}").with_default("slug", "home");
        let url = build_url(
            &route,
            &BTreeMap::new(),
            &RequestContext::default(),
            UrlReference::AbsolutePath,
        )
        .unwrap();
        assert_eq!(url, "/pages/home");
    }

    #[test]
    fn test_missing_variable_is_not_found() {
        let route = Route::new("/users/{id}");
        let err = build_url(
            &route,
            &BTreeMap::new(),
            &RequestContext::default(),
            UrlReference::AbsolutePath,
        )
        .unwrap_err();
        assert!(matches!(err, GenerateError::NotFound(_)));
    }

    #[test]
    fn test_requirement_rejects_bad_value() {
        let route = Route::new("/users/{id}").with_requirement("id", r"\d+");
        let err = build_url(
            &route,
            &params(&[("id", "jane")]),
            &RequestContext::default(),
            UrlReference::AbsolutePath,
        )
        .unwrap_err();
        assert!(matches!(err, GenerateError::NotFound(_)));
    }

    #[test]
    fn test_leftover_params_become_sorted_query() {
        let route = Route::new("/search");
        let url = build_url(
            &route,
            &params(&[("q", "rust routing"), ("page", "2")]),
            &RequestContext::default(),
            UrlReference::AbsolutePath,
        )
        .unwrap();
        assert_eq!(url, "/search?page=2&q=rust+routing");
    }

    #[test]
    fn test_params_equal_to_defaults_omitted_from_query() {
        let route = Route::new("/feed").with_default("format", "rss");
        let url = build_url(
            &route,
            &params(&[("format", "rss")]),
            &RequestContext::default(),
            UrlReference::AbsolutePath,
        )
        .unwrap();
        assert_eq!(url, "/feed");
    }

    #[test]
    fn test_path_values_are_escaped() {
        let route = Route::new("/tags/{tag}");
        let url = build_url(
            &route,
            &params(&[("tag", "c++ lang")]),
            &RequestContext::default(),
            UrlReference::AbsolutePath,
        )
        .unwrap();
        assert_eq!(url, "/tags/c%2B%2B%20lang");
    }

    #[test]
    fn test_absolute_url_with_nonstandard_port() {
        let route = Route::new("/login");
        let context = RequestContext::default()
            .with_scheme("https")
            .with_host("example.com")
            .with_https_port(8443);
        let url = build_url(
            &route,
            &BTreeMap::new(),
            &context,
            UrlReference::AbsoluteUrl,
        )
        .unwrap();
        assert_eq!(url, "https://example.com:8443/login");
    }

    #[test]
    fn test_network_path() {
        let route = Route::new("/assets/app.css");
        let context = RequestContext::default().with_host("cdn.example.com");
        let url = build_url(&route, &BTreeMap::new(), &context, UrlReference::NetworkPath).unwrap();
        assert_eq!(url, "//cdn.example.com/assets/app.css");
    }

    #[test]
    fn test_base_path_prefixed() {
        let route = Route::new("/users/{id}");
        let context = RequestContext::default().with_base_path("/app");
        let url = build_url(
            &route,
            &params(&[("id", "1")]),
            &context,
            UrlReference::AbsolutePath,
        )
        .unwrap();
        assert_eq!(url, "/app/users/1");
    }

    #[test]
    fn test_relative_path_to_sibling() {
        let route = Route::new("/a/b/d");
        let context = RequestContext::default().with_path_info("/a/b/c");
        let url = build_url(
            &route,
            &BTreeMap::new(),
            &context,
            UrlReference::RelativePath,
        )
        .unwrap();
        assert_eq!(url, "d");
    }

    #[test]
    fn test_relative_path_up_and_down() {
        let route = Route::new("/x/y");
        let context = RequestContext::default().with_path_info("/a/b/c");
        let url = build_url(
            &route,
            &BTreeMap::new(),
            &context,
            UrlReference::RelativePath,
        )
        .unwrap();
        assert_eq!(url, "../../x/y");
    }

    #[test]
    fn test_root_route() {
        let route = Route::new("/");
        let url = build_url(
            &route,
            &BTreeMap::new(),
            &RequestContext::default(),
            UrlReference::AbsolutePath,
        )
        .unwrap();
        assert_eq!(url, "/");
    }
}
