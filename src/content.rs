//! Content collaborator traits.
//!
//! A "content" object is an application document (a page, an article, a
//! product) that knows the routes pointing at it, typically one route per
//! locale variant. The routing core never stores content; it only asks a
//! content object for its routes, or asks a [`ContentRepository`] to resolve
//! an id into a content object.

use crate::route::Route;
use std::sync::Arc;

/// A content object exposing the routes that refer to it.
///
/// The order of [`routes`](RouteReferrer::routes) is significant: URL
/// generation falls back to the *first* route deterministically when no
/// locale variant matches the desired locale.
pub trait RouteReferrer: Send + Sync {
    /// Candidate routes pointing at this content, in preference order
    fn routes(&self) -> Vec<Arc<Route>>;

    /// Identifier used in log and error messages (e.g. a document id)
    fn content_id(&self) -> Option<String> {
        None
    }
}

/// External lookup of content objects by id.
///
/// The only collaborator in the routing core that performs I/O during
/// enhancement or generation. Backend failures must surface as errors, not
/// as `Ok(None)`: `Ok(None)` means "the id resolves to nothing", which is a
/// recoverable not-found condition.
pub trait ContentRepository: Send + Sync {
    /// Resolve an id to a content object, or `None` if the id is unknown
    fn find_by_id(&self, id: &str) -> anyhow::Result<Option<Arc<dyn RouteReferrer>>>;
}
