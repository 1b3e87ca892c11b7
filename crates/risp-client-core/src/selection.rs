//! Multi-select state over a list snapshot.
//!
//! A [`Selection`] owns the current snapshot of entities and the set of
//! selected ids. The selected set is always a subset of the snapshot's ids:
//! toggling an unknown id does nothing, and replacing the snapshot with
//! [`set_items`](Selection::set_items) clears the selection so stale ids
//! can never reach a bulk-action call.
//!
//! The observer passed to [`Selection::new`] fires only when the selected
//! set actually changes.

use std::collections::HashSet;

use crate::models::Entity;

/// Payload delivered to the selection observer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChanged {
    pub count: usize,
    pub summary: String,
}

pub type SelectionObserver = Box<dyn FnMut(&SelectionChanged) + Send>;

pub struct Selection<E: Entity> {
    items: Vec<E>,
    selected: HashSet<String>,
    observer: Option<SelectionObserver>,
}

impl<E: Entity> Selection<E> {
    pub fn new(items: Vec<E>, observer: Option<SelectionObserver>) -> Self {
        Self {
            items,
            selected: HashSet::new(),
            observer,
        }
    }

    /// An empty snapshot with no observer.
    pub fn empty() -> Self {
        Self::new(Vec::new(), None)
    }

    pub fn items(&self) -> &[E] {
        &self.items
    }

    /// Replaces the snapshot. Always resets the selection.
    pub fn set_items(&mut self, items: Vec<E>) {
        self.items = items;
        if !self.selected.is_empty() {
            self.selected.clear();
            self.notify();
        }
    }

    /// Flips the selection state of `id`. Returns `false` if `id` is not in
    /// the snapshot.
    pub fn toggle(&mut self, id: &str) -> bool {
        if !self.items.iter().any(|item| item.id() == id) {
            return false;
        }
        if !self.selected.remove(id) {
            self.selected.insert(id.to_string());
        }
        self.notify();
        true
    }

    pub fn select_all(&mut self) {
        let before = self.selected.len();
        self.selected = self.items.iter().map(|item| item.id().to_string()).collect();
        if self.selected.len() != before {
            self.notify();
        }
    }

    pub fn clear(&mut self) {
        if self.selected.is_empty() {
            return;
        }
        self.selected.clear();
        self.notify();
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Selected ids in no particular order.
    pub fn selected_ids(&self) -> &HashSet<String> {
        &self.selected
    }

    /// Selected ids in snapshot order, for requests that must be deterministic.
    pub fn selected_in_order(&self) -> Vec<String> {
        self.items
            .iter()
            .filter(|item| self.selected.contains(item.id()))
            .map(|item| item.id().to_string())
            .collect()
    }

    pub fn count(&self) -> usize {
        self.selected.len()
    }

    /// e.g. `"No contexts selected"`, `"1 context selected: work"`,
    /// `"3 sources selected"`.
    pub fn summary(&self) -> String {
        match self.count() {
            0 => format!("No {} selected", E::PLURAL),
            1 => {
                let display = self
                    .items
                    .iter()
                    .find(|item| self.selected.contains(item.id()))
                    .map(|item| item.display_field())
                    .unwrap_or_default();
                format!("1 {} selected: {}", E::SINGULAR, display)
            }
            n => format!("{} {} selected", n, E::PLURAL),
        }
    }

    fn notify(&mut self) {
        let change = SelectionChanged {
            count: self.count(),
            summary: self.summary(),
        };
        if let Some(observer) = self.observer.as_mut() {
            observer(&change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Context, Source};
    use std::sync::{Arc, Mutex};

    fn contexts(names: &[&str]) -> Vec<Context> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Context {
                id: format!("c{}", i + 1),
                name: name.to_string(),
                is_default: i == 0,
            })
            .collect()
    }

    fn recording() -> (Arc<Mutex<Vec<SelectionChanged>>>, SelectionObserver) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        let observer: SelectionObserver =
            Box::new(move |change: &SelectionChanged| sink.lock().unwrap().push(change.clone()));
        (log, observer)
    }

    #[test]
    fn toggle_and_summary() {
        let mut sel = Selection::new(contexts(&["work", "home", "misc"]), None);
        assert_eq!(sel.summary(), "No contexts selected");

        assert!(sel.toggle("c2"));
        assert_eq!(sel.count(), 1);
        assert_eq!(sel.summary(), "1 context selected: home");

        sel.toggle("c1");
        assert_eq!(sel.summary(), "2 contexts selected");

        sel.toggle("c2");
        assert_eq!(sel.summary(), "1 context selected: work");
    }

    #[test]
    fn single_source_summary_uses_canonical_uri() {
        let mut sel = Selection::new(
            vec![Source {
                id: "s1".to_string(),
                canonical_uri: "/docs".to_string(),
                ..Default::default()
            }],
            None,
        );
        sel.toggle("s1");
        assert_eq!(sel.summary(), "1 source selected: /docs");
    }

    #[test]
    fn unknown_id_is_ignored() {
        let (log, observer) = recording();
        let mut sel = Selection::new(contexts(&["work"]), Some(observer));
        assert!(!sel.toggle("nope"));
        assert_eq!(sel.count(), 0);
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn clear_on_empty_does_not_notify() {
        let (log, observer) = recording();
        let mut sel = Selection::new(contexts(&["work"]), Some(observer));
        sel.clear();
        assert!(log.lock().unwrap().is_empty());

        sel.toggle("c1");
        sel.clear();
        let log = log.lock().unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log[1].count, 0);
    }

    #[test]
    fn set_items_resets_selection() {
        let (log, observer) = recording();
        let mut sel = Selection::new(contexts(&["work", "home"]), Some(observer));
        sel.select_all();
        assert_eq!(sel.count(), 2);

        sel.set_items(contexts(&["work", "home"]));
        assert_eq!(sel.count(), 0);
        assert_eq!(log.lock().unwrap().last().unwrap().summary, "No contexts selected");
    }

    #[test]
    fn select_all_twice_notifies_once() {
        let (log, observer) = recording();
        let mut sel = Selection::new(contexts(&["a", "b"]), Some(observer));
        sel.select_all();
        sel.select_all();
        assert_eq!(log.lock().unwrap().len(), 1);
    }

    #[test]
    fn selected_in_order_follows_snapshot() {
        let mut sel = Selection::new(contexts(&["a", "b", "c"]), None);
        sel.toggle("c3");
        sel.toggle("c1");
        assert_eq!(sel.selected_in_order(), vec!["c1", "c3"]);
        assert!(sel.selected_ids().iter().all(|id| sel.is_selected(id)));
    }
}
