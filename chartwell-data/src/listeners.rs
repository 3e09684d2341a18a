//! Change notification for datasets and series.
//!
//! Datasets own a [`ChangeListeners`] registry rather than holding references to
//! the objects observing them. A cloned dataset starts with no listeners, and
//! serialization never includes them.

use std::fmt::{Debug, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Handler<E> = Box<dyn FnMut(&E) + Send>;

pub struct ChangeListeners<E> {
    handlers: Vec<(ListenerId, Handler<E>)>,
    next_id: u64,
    notify: bool,
}

impl<E> ChangeListeners<E> {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            next_id: 0,
            notify: true,
        }
    }

    pub fn subscribe<F>(&mut self, handler: F) -> ListenerId
    where
        F: FnMut(&E) + Send + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        self.handlers.len() != before
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn is_notifying(&self) -> bool {
        self.notify
    }

    /// Returns true when notification was switched back on, in which case the
    /// owner should send a single event covering the suppressed changes.
    pub fn set_notify(&mut self, notify: bool) -> bool {
        let resumed = notify && !self.notify;
        self.notify = notify;
        resumed
    }

    pub fn notify(&mut self, event: &E) {
        if !self.notify {
            return;
        }
        for (_, handler) in self.handlers.iter_mut() {
            handler(event);
        }
    }
}

impl<E> Default for ChangeListeners<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for ChangeListeners<E> {
    fn clone(&self) -> Self {
        Self {
            handlers: Vec::new(),
            next_id: 0,
            notify: self.notify,
        }
    }
}

// Listener registries never affect dataset equality
impl<E> PartialEq for ChangeListeners<E> {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl<E> Debug for ChangeListeners<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeListeners")
            .field("listeners", &self.handlers.len())
            .field("notify", &self.notify)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DatasetChangeKind {
    ValueChanged,
    SeriesAdded(String),
    SeriesRemoved(String),
    SeriesChanged(String),
    KeysChanged,
    Reordered,
    Cleared,
    /// Sent when notification is re-enabled
    Refreshed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatasetChangeEvent {
    /// Name of the dataset type that changed
    pub dataset: &'static str,
    pub kind: DatasetChangeKind,
}

impl DatasetChangeEvent {
    pub fn new(dataset: &'static str, kind: DatasetChangeKind) -> Self {
        Self { dataset, kind }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesChangeEvent {
    pub series_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_subscribe_and_unsubscribe() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut listeners = ChangeListeners::<u32>::new();

        let sink = seen.clone();
        let id = listeners.subscribe(move |e| sink.lock().unwrap().push(*e));
        listeners.notify(&1);
        assert!(listeners.unsubscribe(id));
        assert!(!listeners.unsubscribe(id));
        listeners.notify(&2);

        assert_eq!(*seen.lock().unwrap(), vec![1]);
    }

    #[test]
    fn test_suppressed_notification() {
        let seen = Arc::new(Mutex::new(0));
        let mut listeners = ChangeListeners::<()>::new();
        let sink = seen.clone();
        listeners.subscribe(move |_| *sink.lock().unwrap() += 1);

        assert!(!listeners.set_notify(false));
        listeners.notify(&());
        assert_eq!(*seen.lock().unwrap(), 0);
        assert!(listeners.set_notify(true));
        assert!(!listeners.set_notify(true));
    }

    #[test]
    fn test_clone_has_no_listeners() {
        let mut listeners = ChangeListeners::<()>::new();
        listeners.subscribe(|_| {});
        assert_eq!(listeners.len(), 1);
        assert!(listeners.clone().is_empty());
    }
}
