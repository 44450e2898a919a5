//! Compilation of route patterns into match regexes.
//!
//! Transforms patterns like `/users/{id}` into anchored regexes with one
//! named capture group per variable (`^/users/(?P<id>[^/]+)$`), applying the
//! route's per-variable requirement in place of the default `[^/]+`.
//! Compilation happens at final-match time: it is the expensive, precise
//! stage of the pipeline and only runs over the already-narrowed candidate
//! set.

use crate::error::MatchError;
use crate::route::Route;
use anyhow::anyhow;
use regex::Regex;

/// Default sub-pattern for a variable without a requirement
const DEFAULT_VARIABLE_PATTERN: &str = "[^/]+";

/// Compile a route's pattern into an anchored regex.
///
/// Static segments are escaped literally; `{var}` segments become named
/// capture groups using the route's requirement for `var` when one is set.
/// An invalid requirement regex is a configuration failure, not a miss.
pub(crate) fn compile(route: &Route) -> Result<Regex, MatchError> {
    let path = route.path();
    if path == "/" {
        return Regex::new("^/$")
            .map_err(|e| MatchError::Failure(anyhow!("failed to compile root pattern: {e}")));
    }

    let mut pattern = String::with_capacity(path.len() + 16);
    pattern.push('^');

    for segment in path.split('/') {
        if segment.is_empty() {
            continue;
        }
        match segment
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
        {
            Some(name) => {
                let requirement = route.requirement(name).unwrap_or(DEFAULT_VARIABLE_PATTERN);
                pattern.push_str("/(?P<");
                pattern.push_str(name);
                pattern.push_str(">");
                pattern.push_str(requirement);
                pattern.push(')');
            }
            None => {
                pattern.push('/');
                pattern.push_str(&regex::escape(segment));
            }
        }
    }

    pattern.push('$');

    Regex::new(&pattern).map_err(|e| {
        MatchError::Failure(anyhow!(
            "failed to compile pattern for route '{}': {e}",
            route.path()
        ))
    })
}
