//! Collection adapters over a route provider.
//!
//! Both adapters satisfy the [`Routes`] contract without holding the backing
//! store in memory: the lazy variant delegates every access straight to the
//! provider, the paged variant walks the store in fixed-size batches.

use super::{Route, Routes};
use crate::error::GenerateError;
use crate::provider::{PagedRouteProvider, RouteProvider};
use std::sync::Arc;
use tracing::warn;

/// Collection that delegates every access to the provider.
///
/// `get` treats a provider-side not-found as "no such route"; backend
/// failures are logged and reported the same way, since the collection
/// contract has no error channel.
pub struct LazyRouteCollection {
    provider: Arc<dyn RouteProvider>,
}

impl LazyRouteCollection {
    #[must_use]
    pub fn new(provider: Arc<dyn RouteProvider>) -> Self {
        Self { provider }
    }
}

impl Routes for LazyRouteCollection {
    fn get(&self, name: &str) -> Option<Arc<Route>> {
        match self.provider.route_by_name(name) {
            Ok(route) => Some(route),
            Err(GenerateError::NotFound(_)) => None,
            Err(GenerateError::Failure(err)) => {
                warn!(name = %name, error = %err, "Route lookup failed");
                None
            }
        }
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (String, Arc<Route>)> + '_> {
        match self.provider.routes_by_names(None) {
            Ok(routes) => Box::new(routes.into_iter()),
            Err(err) => {
                warn!(error = %err, "Route enumeration failed");
                Box::new(std::iter::empty())
            }
        }
    }

    fn len(&self) -> usize {
        self.iter().count()
    }
}

/// Collection that iterates the provider in fixed-size batches.
///
/// A batch shorter than the page size marks end-of-data, so a store whose
/// size is not an exact multiple of the page size costs no trailing empty
/// request. `len` delegates to the provider's dedicated count operation
/// instead of exhausting the iterator.
pub struct PagedRouteCollection {
    provider: Arc<dyn PagedRouteProvider>,
    page_size: usize,
}

impl PagedRouteCollection {
    /// Default batch size when none is configured.
    pub const DEFAULT_PAGE_SIZE: usize = 50;

    #[must_use]
    pub fn new(provider: Arc<dyn PagedRouteProvider>) -> Self {
        Self::with_page_size(provider, Self::DEFAULT_PAGE_SIZE)
    }

    #[must_use]
    pub fn with_page_size(provider: Arc<dyn PagedRouteProvider>, page_size: usize) -> Self {
        Self {
            provider,
            page_size: page_size.max(1),
        }
    }
}

impl Routes for PagedRouteCollection {
    fn get(&self, name: &str) -> Option<Arc<Route>> {
        match self.provider.route_by_name(name) {
            Ok(route) => Some(route),
            Err(GenerateError::NotFound(_)) => None,
            Err(GenerateError::Failure(err)) => {
                warn!(name = %name, error = %err, "Route lookup failed");
                None
            }
        }
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (String, Arc<Route>)> + '_> {
        Box::new(PagedIter {
            provider: self.provider.as_ref(),
            page_size: self.page_size,
            offset: 0,
            batch: Vec::new().into_iter(),
            done: false,
        })
    }

    fn len(&self) -> usize {
        match self.provider.routes_count() {
            Ok(count) => count,
            Err(err) => {
                warn!(error = %err, "Route count failed");
                0
            }
        }
    }
}

struct PagedIter<'a> {
    provider: &'a dyn PagedRouteProvider,
    page_size: usize,
    offset: usize,
    batch: std::vec::IntoIter<(String, Arc<Route>)>,
    done: bool,
}

impl Iterator for PagedIter<'_> {
    type Item = (String, Arc<Route>);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.batch.next() {
                return Some(item);
            }
            if self.done {
                return None;
            }
            match self.provider.routes_paged(self.offset, self.page_size) {
                Ok(routes) => {
                    if routes.len() < self.page_size {
                        self.done = true;
                    }
                    self.offset += routes.len();
                    self.batch = routes.into_iter();
                    if self.batch.len() == 0 && self.done {
                        return None;
                    }
                }
                Err(err) => {
                    warn!(
                        offset = self.offset,
                        page_size = self.page_size,
                        error = %err,
                        "Paged route fetch failed"
                    );
                    self.done = true;
                    return None;
                }
            }
        }
    }
}
