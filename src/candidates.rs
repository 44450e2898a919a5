//! Candidate path generation.
//!
//! Turns one request path into a bounded, ordered list of prefix strings a
//! storage-backed route provider can look up with a single `IN`-style query
//! instead of scanning every possible ancestor path per request.
//!
//! ## Algorithm
//!
//! For `/my/path.html` with no configured locales:
//!
//! 1. The path carries a trailing extension (`.` followed by letters only),
//!    so the full path is emitted first, then generation continues on the
//!    extension-stripped path.
//! 2. The last `/`-delimited segment is stripped repeatedly, emitting each
//!    successively shorter prefix, bounded by the configured limit.
//! 3. `/` always terminates the list.
//!
//! yielding `["/my/path.html", "/my/path", "/my", "/"]`.
//!
//! If the path begins with a configured locale code followed by `/` or
//! end-of-string, the same list is computed for the locale-stripped path and
//! appended, deduplicated in first-seen order. Ordering is always
//! most-specific-first.

use crate::config::RouterConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static EXTENSION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+)\.[a-zA-Z]+$").expect("extension regex is statically valid")
});

/// Candidate lookup-key generator for one configured routing setup.
#[derive(Debug, Clone)]
pub struct Candidates {
    locales: Vec<String>,
    limit: usize,
}

impl Candidates {
    /// Create a generator with explicit locales and candidate limit.
    ///
    /// A limit of `0` means unbounded.
    #[must_use]
    pub fn new(locales: Vec<String>, limit: usize) -> Self {
        Self { locales, limit }
    }

    /// Create a generator from a [`RouterConfig`].
    #[must_use]
    pub fn from_config(config: &RouterConfig) -> Self {
        Self::new(config.locales.clone(), config.candidate_limit)
    }

    /// Ordered candidate prefixes for a request path, most specific first.
    #[must_use]
    pub fn candidates(&self, path: &str) -> Vec<String> {
        let mut candidates = self.candidates_for(path);

        if let Some(locale) = self.determine_locale(path) {
            let stripped = &path[locale.len() + 1..];
            let stripped = if stripped.is_empty() { "/" } else { stripped };
            for candidate in self.candidates_for(stripped) {
                if !candidates.contains(&candidate) {
                    candidates.push(candidate);
                }
            }
        }

        debug!(
            path = %path,
            candidate_count = candidates.len(),
            "Candidate prefixes generated"
        );

        candidates
    }

    /// Locale code the path starts with, if any.
    ///
    /// The path must begin with `/<locale>` followed by `/` or end-of-string.
    fn determine_locale<'a>(&'a self, path: &str) -> Option<&'a str> {
        self.locales.iter().map(|l| l.as_str()).find(|locale| {
            path.strip_prefix('/')
                .and_then(|rest| rest.strip_prefix(locale))
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
        })
    }

    fn candidates_for(&self, path: &str) -> Vec<String> {
        let mut candidates = Vec::new();

        if path != "/" {
            let mut url = path;
            if let Some(caps) = EXTENSION_RE.captures(path) {
                candidates.push(path.to_string());
                if let Some(stripped) = caps.get(1) {
                    url = stripped.as_str();
                }
            }

            let mut part = url;
            let mut emitted = 0usize;
            while let Some(pos) = part.rfind('/') {
                if self.limit > 0 && emitted >= self.limit {
                    break;
                }
                candidates.push(part.to_string());
                part = &part[..pos];
                emitted += 1;
            }
        }

        candidates.push("/".to_string());

        candidates
    }
}
