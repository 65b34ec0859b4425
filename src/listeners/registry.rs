//! Ordered listener registry.
//!
//! Listeners of both kinds live in one flat list. Registration order is the
//! order in which qualifying listeners run.

use std::sync::{Arc, RwLock};

use crate::listeners::{AnyListener, Listener, ListenerId, Message};

/// A handle to a listener registry shared between the caller and a client.
///
/// Take a **write lock** to register or remove listeners. The client only holds
/// a read lock long enough to copy the qualifying listeners, so actions may
/// edit the registry.
pub type ListenerHandle = Arc<RwLock<ListenerRegistry>>;

#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    entries: Vec<AnyListener>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a listener and returns its id.
    pub fn add(&mut self, listener: impl Into<AnyListener>) -> ListenerId {
        let listener = listener.into();
        let id = listener.id();
        self.entries.push(listener);
        id
    }

    /// Removes the listener with `id`. Returns `false` if it was not registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|l| l.id() != id);
        self.entries.len() != before
    }

    /// Removes every listener carrying `tag` and returns how many were removed.
    pub fn remove_tagged(&mut self, tag: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|l| l.tag() != tag);
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnyListener> {
        self.entries.iter()
    }

    /// Listeners of kind `M` whose condition holds for `message`, in registration order.
    pub fn qualifying<M: Message>(&self, message: &M) -> Vec<Listener<M>> {
        self.entries
            .iter()
            .filter_map(M::select)
            .filter(|l| l.qualifies(message))
            .cloned()
            .collect()
    }

    pub fn into_handle(self) -> ListenerHandle {
        Arc::new(RwLock::new(self))
    }
}

impl FromIterator<AnyListener> for ListenerRegistry {
    fn from_iter<T: IntoIterator<Item = AnyListener>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::{Request, Response};

    #[test]
    fn qualifying_filters_by_kind_and_condition_in_order() {
        let mut registry = ListenerRegistry::new();
        registry.add(Listener::<Request>::new().tag("first"));
        registry.add(Listener::<Response>::new().tag("response"));
        registry.add(Listener::<Request>::new().tag("never").when(|_| false));
        registry.add(Listener::<Request>::new().tag("second"));

        let tags: Vec<String> = registry
            .qualifying(&Request::get("http://example.com"))
            .into_iter()
            .map(|l| l.tag)
            .collect();
        assert_eq!(tags, vec!["first".to_string(), "second".to_string()]);
    }

    #[test]
    fn remove_by_id_and_tag() {
        let mut registry = ListenerRegistry::new();
        let id = registry.add(Listener::<Request>::new().tag("a"));
        registry.add(Listener::<Response>::new().tag("b"));
        registry.add(Listener::<Request>::new().tag("b"));

        assert!(registry.remove(id));
        assert!(!registry.remove(id));
        assert_eq!(registry.remove_tagged("b"), 2);
        assert!(registry.is_empty());
    }

    #[test]
    fn collects_from_iterator() {
        let registry: ListenerRegistry = vec![
            AnyListener::from(Listener::<Request>::new()),
            AnyListener::from(Listener::<Response>::new()),
        ]
        .into_iter()
        .collect();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.iter().count(), 2);
    }
}
