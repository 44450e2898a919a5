//! # Router Configuration Module
//!
//! Environment variable-based configuration for the routing engine.
//!
//! ## Environment Variables
//!
//! ### `CHAINROUTER_LOCALES`
//!
//! Comma-separated list of locale codes the candidate generator recognizes
//! as URL prefixes (e.g. `en,de,fr`). Default: empty (no locale handling).
//!
//! ### `CHAINROUTER_CANDIDATE_LIMIT`
//!
//! Maximum number of prefix candidates produced per generation pass.
//! Bounds the size of the `IN`-style lookup a storage backend has to
//! answer per request. Default: `20`.
//!
//! ### `CHAINROUTER_DEFAULT_LOCALE`
//!
//! Locale used by URL generation when neither the parameters nor the
//! request context carry one. Default: unset.
//!
//! ### `CHAINROUTER_PAGE_SIZE`
//!
//! Batch size used by paged route collections. Default: `50`.
//!
//! ## Usage
//!
//! ```rust
//! use chainrouter::config::RouterConfig;
//!
//! let config = RouterConfig::from_env();
//! assert!(config.page_size > 0);
//! ```

use serde::{Deserialize, Serialize};
use std::env;

/// Routing engine configuration.
///
/// Load from the environment with [`RouterConfig::from_env()`] or build
/// programmatically; all fields are plain data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Locale codes recognized as URL prefixes by the candidate generator
    pub locales: Vec<String>,
    /// Maximum candidates produced per generation pass (default: 20)
    pub candidate_limit: usize,
    /// Fallback locale for URL generation (default: none)
    pub default_locale: Option<String>,
    /// Batch size for paged route collections (default: 50)
    pub page_size: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            locales: Vec::new(),
            candidate_limit: 20,
            default_locale: None,
            page_size: 50,
        }
    }
}

impl RouterConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let locales = match env::var("CHAINROUTER_LOCALES") {
            Ok(val) => val
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            Err(_) => defaults.locales,
        };

        let candidate_limit = env::var("CHAINROUTER_CANDIDATE_LIMIT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.candidate_limit);

        let default_locale = env::var("CHAINROUTER_DEFAULT_LOCALE")
            .ok()
            .filter(|v| !v.is_empty());

        let page_size = env::var("CHAINROUTER_PAGE_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|v: &usize| *v > 0)
            .unwrap_or(defaults.page_size);

        RouterConfig {
            locales,
            candidate_limit,
            default_locale,
            page_size,
        }
    }
}
