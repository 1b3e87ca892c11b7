//! Load lifecycle for one entity list.
//!
//! ```text
//! Idle ──begin_load──▶ Loading ──finish_load(Ok)──▶ Loaded
//!                         │
//!                         └────finish_load(Err)───▶ LoadFailed
//! ```
//!
//! Loads may overlap. Every [`begin_load`](ListController::begin_load)
//! issues a fresh [`LoadTicket`]; only the most recently issued ticket may
//! change the visible snapshot. A slow first response that arrives after a
//! faster second one is discarded, not applied.

use crate::api::RpcError;
use crate::models::Entity;
use crate::selection::{Selection, SelectionObserver};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPhase {
    Idle,
    Loading,
    Loaded,
    LoadFailed,
}

/// Identifies one issued load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

/// One list response: the items and the backend's reported total.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<E> {
    pub items: Vec<E>,
    pub total: i64,
}

impl<E> Page<E> {
    pub fn new(items: Vec<E>, total: i64) -> Self {
        Self { items, total }
    }
}

pub struct ListController<E: Entity> {
    phase: ListPhase,
    selection: Selection<E>,
    total: i64,
    last_error: Option<RpcError>,
    issued: u64,
    settled: u64,
}

impl<E: Entity> ListController<E> {
    pub fn new(observer: Option<SelectionObserver>) -> Self {
        Self {
            phase: ListPhase::Idle,
            selection: Selection::new(Vec::new(), observer),
            total: 0,
            last_error: None,
            issued: 0,
            settled: 0,
        }
    }

    /// Starts a load and returns its ticket. The previous snapshot stays
    /// visible until a response is applied.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued += 1;
        self.phase = ListPhase::Loading;
        LoadTicket(self.issued)
    }

    /// Whether `ticket` is the latest issued and not yet applied.
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.issued && self.settled < ticket.0
    }

    /// Applies a response if `ticket` is current. Returns whether it was
    /// applied; stale responses leave all state untouched.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Page<E>, RpcError>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.settled = ticket.0;

        match result {
            Ok(page) => {
                self.total = page.total;
                self.last_error = None;
                self.selection.set_items(page.items);
                self.phase = ListPhase::Loaded;
            }
            Err(err) => {
                self.total = 0;
                self.last_error = Some(err);
                self.selection.set_items(Vec::new());
                self.phase = ListPhase::LoadFailed;
            }
        }
        true
    }

    pub fn phase(&self) -> ListPhase {
        self.phase
    }

    pub fn items(&self) -> &[E] {
        self.selection.items()
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    pub fn last_error(&self) -> Option<&RpcError> {
        self.last_error.as_ref()
    }

    pub fn selection(&self) -> &Selection<E> {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut Selection<E> {
        &mut self.selection
    }

    pub fn summary(&self) -> String {
        self.selection.summary()
    }

    pub fn bulk_action_enabled(&self) -> bool {
        self.selection.count() >= 1
    }

    /// `"Export"` with nothing selected, else `"Export 2 contexts"`.
    pub fn bulk_action_label(&self, verb: &str) -> String {
        match self.selection.count() {
            0 => verb.to_string(),
            1 => format!("{} 1 {}", verb, E::SINGULAR),
            n => format!("{} {} {}", verb, n, E::PLURAL),
        }
    }
}

impl<E: Entity> Default for ListController<E> {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Context, ErrorCode};

    fn ctx(id: &str) -> Context {
        Context {
            id: id.to_string(),
            name: format!("name-{}", id),
            is_default: false,
        }
    }

    fn page(ids: &[&str]) -> Result<Page<Context>, RpcError> {
        let items: Vec<Context> = ids.iter().map(|id| ctx(id)).collect();
        let total = items.len() as i64;
        Ok(Page::new(items, total))
    }

    fn ids(list: &ListController<Context>) -> Vec<&str> {
        list.items().iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn idle_to_loaded() {
        let mut list = ListController::new(None);
        assert_eq!(list.phase(), ListPhase::Idle);

        let t = list.begin_load();
        assert_eq!(list.phase(), ListPhase::Loading);
        assert!(list.finish_load(t, page(&["a", "b"])));
        assert_eq!(list.phase(), ListPhase::Loaded);
        assert_eq!(ids(&list), vec!["a", "b"]);
        assert_eq!(list.total(), 2);
    }

    #[test]
    fn load_failure_clears_snapshot_and_keeps_error() {
        let mut list = ListController::new(None);
        let t = list.begin_load();
        list.finish_load(t, page(&["a"]));

        let t = list.begin_load();
        let err = RpcError::Application {
            code: ErrorCode::Unknown,
            message: "down".to_string(),
        };
        assert!(list.finish_load(t, Err(err.clone())));
        assert_eq!(list.phase(), ListPhase::LoadFailed);
        assert!(list.items().is_empty());
        assert_eq!(list.last_error(), Some(&err));

        let t = list.begin_load();
        list.finish_load(t, page(&["a"]));
        assert_eq!(list.phase(), ListPhase::Loaded);
        assert!(list.last_error().is_none());
    }

    #[test]
    fn last_response_wins() {
        let mut list = ListController::new(None);
        let a = list.begin_load();
        let b = list.begin_load();

        assert!(list.finish_load(b, page(&["b"])));
        assert!(!list.finish_load(a, page(&["a"])));
        assert_eq!(ids(&list), vec!["b"]);
        assert_eq!(list.phase(), ListPhase::Loaded);
    }

    #[test]
    fn stale_response_while_latest_pending_is_dropped() {
        let mut list = ListController::new(None);
        let a = list.begin_load();
        let b = list.begin_load();

        assert!(!list.finish_load(a, page(&["a"])));
        assert_eq!(list.phase(), ListPhase::Loading);
        assert!(list.items().is_empty());

        assert!(list.finish_load(b, page(&["b"])));
        assert_eq!(ids(&list), vec!["b"]);
    }

    #[test]
    fn ticket_applies_once() {
        let mut list = ListController::new(None);
        let t = list.begin_load();
        assert!(list.finish_load(t, page(&["a"])));
        assert!(!list.finish_load(t, page(&["x"])));
        assert_eq!(ids(&list), vec!["a"]);
    }

    #[test]
    fn reload_resets_selection() {
        let mut list = ListController::new(None);
        let t = list.begin_load();
        list.finish_load(t, page(&["a", "b"]));
        list.selection_mut().select_all();
        assert_eq!(list.selection().count(), 2);

        let t = list.begin_load();
        list.finish_load(t, page(&["a", "b"]));
        assert_eq!(list.selection().count(), 0);
    }

    #[test]
    fn bulk_action_label_and_enablement() {
        let mut list = ListController::new(None);
        let t = list.begin_load();
        list.finish_load(t, page(&["a", "b"]));

        assert!(!list.bulk_action_enabled());
        assert_eq!(list.bulk_action_label("Export"), "Export");

        list.selection_mut().toggle("a");
        assert!(list.bulk_action_enabled());
        assert_eq!(list.bulk_action_label("Export"), "Export 1 context");

        list.selection_mut().toggle("b");
        assert_eq!(list.bulk_action_label("Export"), "Export 2 contexts");
    }
}
