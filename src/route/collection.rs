//! In-memory and chained route collections.

use super::Route;
use std::sync::Arc;

/// The collection contract all route collections implement.
///
/// Kept deliberately narrow so adapters over a backing store (lazy, paged)
/// can satisfy it without materializing every route.
pub trait Routes: Send + Sync {
    /// Route registered under `name`, if any
    fn get(&self, name: &str) -> Option<Arc<Route>>;

    /// Iterate `(name, route)` pairs in collection order
    fn iter(&self) -> Box<dyn Iterator<Item = (String, Arc<Route>)> + '_>;

    /// Number of routes in the collection
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Insertion-ordered mapping from route name to route.
///
/// Names are unique within one collection; insertion order is significant,
/// it breaks ties during final matching. Re-adding an existing name removes
/// the old entry and appends the new one at the end.
#[derive(Debug, Clone, Default)]
pub struct RouteCollection {
    entries: Vec<(String, Arc<Route>)>,
}

impl RouteCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route under a name, replacing (and moving to the end) any
    /// previous route of the same name.
    pub fn add(&mut self, name: impl Into<String>, route: Arc<Route>) {
        let name = name.into();
        self.entries.retain(|(n, _)| *n != name);
        self.entries.push((name, route));
    }

    /// Registered names in collection order
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }
}

impl Routes for RouteCollection {
    fn get(&self, name: &str) -> Option<Arc<Route>> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, r)| Arc::clone(r))
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (String, Arc<Route>)> + '_> {
        Box::new(
            self.entries
                .iter()
                .map(|(n, r)| (n.clone(), Arc::clone(r))),
        )
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Composition of several child collections without copying.
///
/// `get` delegates to each child in turn and returns the first hit, so on a
/// name collision the earliest-added child wins. Iteration chains the
/// children in order.
#[derive(Default)]
pub struct ChainRouteCollection {
    children: Vec<Arc<dyn Routes>>,
}

impl ChainRouteCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a child collection.
    pub fn push(&mut self, collection: Arc<dyn Routes>) {
        self.children.push(collection);
    }
}

impl Routes for ChainRouteCollection {
    fn get(&self, name: &str) -> Option<Arc<Route>> {
        self.children.iter().find_map(|child| child.get(name))
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (String, Arc<Route>)> + '_> {
        Box::new(self.children.iter().flat_map(|child| child.iter()))
    }

    fn len(&self) -> usize {
        self.children.iter().map(|child| child.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut collection = RouteCollection::new();
        collection.add("b", Arc::new(Route::new("/b")));
        collection.add("a", Arc::new(Route::new("/a")));
        collection.add("c", Arc::new(Route::new("/c")));
        assert_eq!(collection.names(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_re_add_replaces_and_moves_to_end() {
        let mut collection = RouteCollection::new();
        collection.add("a", Arc::new(Route::new("/a")));
        collection.add("b", Arc::new(Route::new("/b")));
        collection.add("a", Arc::new(Route::new("/a-v2")));
        assert_eq!(collection.names(), vec!["b", "a"]);
        assert_eq!(collection.get("a").map(|r| r.path().to_string()), Some("/a-v2".into()));
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn test_chain_first_child_wins_on_collision() {
        let mut first = RouteCollection::new();
        first.add("home", Arc::new(Route::new("/first")));
        let mut second = RouteCollection::new();
        second.add("home", Arc::new(Route::new("/second")));
        second.add("other", Arc::new(Route::new("/other")));

        let mut chain = ChainRouteCollection::new();
        chain.push(Arc::new(first));
        chain.push(Arc::new(second));

        assert_eq!(chain.get("home").map(|r| r.path().to_string()), Some("/first".into()));
        assert_eq!(chain.get("other").map(|r| r.path().to_string()), Some("/other".into()));
        assert_eq!(chain.len(), 3);
        let names: Vec<String> = chain.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["home", "home", "other"]);
    }
}
