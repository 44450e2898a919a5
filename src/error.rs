//! Failure taxonomy shared by every matcher, router and generator.
//!
//! Matching distinguishes between an *expected miss* (this strategy does not
//! apply, try the next one) and a *genuine failure* (the backing store is
//! unreachable, the component is misconfigured). Only the former may be
//! swallowed by the chain; the latter aborts the whole request.

use http::Method;
use std::fmt;

/// Failure modes of the matching direction.
///
/// `NotFound` and `MethodNotAllowed` are recoverable: a chain falls over to
/// the next router when it sees them. `Failure` is not: it propagates
/// immediately, since it signals systemic breakage rather than "this
/// strategy doesn't apply".
#[derive(Debug)]
pub enum MatchError {
    /// No route resolved for this request. Always recoverable in a chain.
    NotFound(String),
    /// A route matched the path but not the HTTP method.
    ///
    /// Recoverable like `NotFound`, but remembered and preferentially
    /// reported when the whole chain fails, since it is strictly more
    /// informative than a bare miss.
    MethodNotAllowed {
        /// Methods that would have been accepted for the matched path
        allowed: Vec<Method>,
    },
    /// Backend or configuration failure. Aborts the chain immediately.
    Failure(anyhow::Error),
}

impl MatchError {
    /// Whether a chain may continue with the next router after this error.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, MatchError::Failure(_))
    }
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::NotFound(reason) => {
                write!(f, "no route found: {reason}")
            }
            MatchError::MethodNotAllowed { allowed } => {
                let methods: Vec<&str> = allowed.iter().map(|m| m.as_str()).collect();
                write!(
                    f,
                    "a route matched the path but not the method (allowed: {})",
                    methods.join(", ")
                )
            }
            MatchError::Failure(err) => write!(f, "routing failed: {err}"),
        }
    }
}

impl std::error::Error for MatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MatchError::Failure(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for MatchError {
    fn from(err: anyhow::Error) -> Self {
        MatchError::Failure(err)
    }
}

/// Failure modes of the generation (inverse) direction.
///
/// `NotFound` carries a human-readable reason; the chain router aggregates
/// the unique reasons of every failed attempt into its final error.
#[derive(Debug)]
pub enum GenerateError {
    /// The target could not be resolved to a route.
    NotFound(String),
    /// Backend failure. Aborts the chain immediately.
    Failure(anyhow::Error),
}

impl GenerateError {
    /// Whether a chain may continue with the next router after this error.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, GenerateError::Failure(_))
    }
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::NotFound(reason) => write!(f, "route not found: {reason}"),
            GenerateError::Failure(err) => write!(f, "url generation failed: {err}"),
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerateError::Failure(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for GenerateError {
    fn from(err: anyhow::Error) -> Self {
        GenerateError::Failure(err)
    }
}
