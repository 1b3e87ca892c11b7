//! Shared state for the application shell.
//!
//! The shell owns one [`ShellState`] and hands clones to every screen that
//! needs it. Clones share the same underlying value, so a toggle from the
//! top bar is seen by the navigation menu through its subscription.

use std::sync::{Arc, Mutex};

/// Handle returned by [`Observable::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Inner<T> {
    value: T,
    listeners: Vec<(SubscriptionId, Listener<T>)>,
    next_id: u64,
}

/// A value with change notification. Cloning shares the value.
pub struct Observable<T> {
    inner: Arc<Mutex<Inner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + PartialEq> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                value,
                listeners: Vec::new(),
                next_id: 0,
            })),
        }
    }

    pub fn get(&self) -> T {
        self.inner.lock().unwrap().value.clone()
    }

    /// Stores `value` and notifies listeners if it differs from the current
    /// one. Listeners run after the lock is released and may read the value.
    pub fn set(&self, value: T) {
        let listeners = {
            let mut inner = self.inner.lock().unwrap();
            if inner.value == value {
                return;
            }
            inner.value = value.clone();
            inner
                .listeners
                .iter()
                .map(|(_, l)| Arc::clone(l))
                .collect::<Vec<_>>()
        };
        for listener in listeners {
            listener(&value);
        }
    }

    /// Sets the value computed from the current one and returns it.
    pub fn update(&self, f: impl FnOnce(&T) -> T) -> T {
        let next = f(&self.get());
        self.set(next.clone());
        next
    }

    pub fn subscribe(&self, listener: impl Fn(&T) + Send + Sync + 'static) -> SubscriptionId {
        let mut inner = self.inner.lock().unwrap();
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner.listeners.push((id, Arc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.listeners.len();
        inner.listeners.retain(|(sid, _)| *sid != id);
        inner.listeners.len() != before
    }
}

/// Entries of the navigation menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Search,
    Resources,
    Sources,
    Contexts,
}

impl MenuItem {
    pub const ALL: [MenuItem; 4] = [
        MenuItem::Search,
        MenuItem::Resources,
        MenuItem::Sources,
        MenuItem::Contexts,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::Search => "Search",
            MenuItem::Resources => "Resources",
            MenuItem::Sources => "Sources",
            MenuItem::Contexts => "Contexts",
        }
    }

    /// Case-insensitive lookup by label.
    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|item| item.label().eq_ignore_ascii_case(label.trim()))
    }
}

/// Menu open/closed flag. Starts open.
#[derive(Clone)]
pub struct ShellState {
    menu_open: Observable<bool>,
}

impl ShellState {
    pub fn new() -> Self {
        Self {
            menu_open: Observable::new(true),
        }
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open.get()
    }

    /// Flips the flag and returns the new value.
    pub fn toggle_menu(&self) -> bool {
        self.menu_open.update(|open| !open)
    }

    pub fn menu_open(&self) -> &Observable<bool> {
        &self.menu_open
    }

    pub fn menu_items(&self) -> &'static [MenuItem] {
        &MenuItem::ALL
    }
}

impl Default for ShellState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn menu_starts_open_and_toggles() {
        let shell = ShellState::new();
        assert!(shell.is_menu_open());
        assert!(!shell.toggle_menu());
        assert!(!shell.is_menu_open());
        assert!(shell.toggle_menu());
    }

    #[test]
    fn clones_share_state_and_notify() {
        let shell = ShellState::new();
        let menu = shell.clone();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        menu.menu_open().subscribe(move |open| sink.lock().unwrap().push(*open));

        shell.toggle_menu();
        shell.toggle_menu();
        assert!(menu.is_menu_open());
        assert_eq!(*seen.lock().unwrap(), vec![false, true]);
    }

    #[test]
    fn set_same_value_does_not_notify() {
        let value = Observable::new(3);
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        value.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        value.set(3);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        value.set(4);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn listener_may_read_value() {
        let value = Observable::new(1);
        let reader = value.clone();
        let seen = Arc::new(AtomicUsize::new(0));
        let sink = seen.clone();
        value.subscribe(move |_| sink.store(reader.get(), Ordering::SeqCst));
        value.set(9);
        assert_eq!(seen.load(Ordering::SeqCst), 9);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let value = Observable::new(false);
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let id = value.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert!(value.unsubscribe(id));
        assert!(!value.unsubscribe(id));
        value.set(true);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn menu_items_in_order() {
        let labels: Vec<_> = ShellState::new()
            .menu_items()
            .iter()
            .map(|m| m.label())
            .collect();
        assert_eq!(labels, vec!["Search", "Resources", "Sources", "Contexts"]);
        assert_eq!(MenuItem::parse(" sources "), Some(MenuItem::Sources));
        assert_eq!(MenuItem::parse("settings"), None);
    }
}
