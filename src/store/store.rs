// src/store/store.rs

use std::sync::Arc;

use tokio::sync::watch;

use crate::config::AppConfig;
use crate::domain::types::{
    DrawerState, FilterSpec, Pagination, PropertySummary, SortSpec, TabKey, TabbedListState,
};

/// The single owner of the mutable tabbed-list view state.
///
/// The store is an explicit, dependency-injected container: the
/// application shell builds one and passes it to the actions layer; there
/// is no ambient singleton. Every setter clones the current state, applies
/// exactly one change, and publishes the result as a fresh
/// `Arc<TabbedListState>`, so a snapshot held by a consumer is immutable
/// and `Arc::ptr_eq` is a reliable staleness check.
///
/// Handles are cheap to clone and share one underlying channel.
#[derive(Clone)]
pub struct TabbedListStore {
    state: Arc<watch::Sender<Arc<TabbedListState>>>,
}

impl TabbedListStore {
    pub fn new(config: &AppConfig) -> Self {
        let initial = Arc::new(TabbedListState::initial(config.default_page_size));
        let (tx, _rx) = watch::channel(initial);
        Self {
            state: Arc::new(tx),
        }
    }

    /// The current published state. The returned snapshot never changes;
    /// later mutations publish new snapshots instead.
    pub fn snapshot(&self) -> Arc<TabbedListState> {
        Arc::clone(&self.state.borrow())
    }

    /// Change-notified view of the state for presentation subscribers.
    pub fn subscribe(&self) -> watch::Receiver<Arc<TabbedListState>> {
        self.state.subscribe()
    }

    /// Clone-mutate-publish. All setters funnel through here so a
    /// published snapshot is never mutated in place.
    fn publish<F>(&self, mutate: F)
    where
        F: FnOnce(&mut TabbedListState),
    {
        self.state.send_modify(|current| {
            let mut next = TabbedListState::clone(current);
            mutate(&mut next);
            *current = Arc::new(next);
        });
    }

    /// Replace the item list wholesale.
    pub fn set_items(&self, items: Vec<PropertySummary>) {
        self.publish(|state| state.items = items);
    }

    pub fn set_loading(&self, loading: bool) {
        self.publish(|state| state.loading = loading);
    }

    pub fn set_error(&self, error: Option<String>) {
        self.publish(|state| state.error = error);
    }

    /// Replace page, page size, and total as one unit.
    pub fn set_pagination(&self, pagination: Pagination) {
        self.publish(|state| state.pagination = pagination);
    }

    pub fn set_sort(&self, sort: Option<SortSpec>) {
        self.publish(|state| state.sort = sort);
    }

    /// Merge the patch into the current filters; fields the patch leaves
    /// unset keep their existing values.
    pub fn set_filters(&self, patch: FilterSpec) {
        self.publish(|state| state.filters.merge(patch));
    }

    /// Flip membership of exactly one id in the selection.
    pub fn toggle_select(&self, id: &str) {
        self.publish(|state| {
            if !state.selected_ids.remove(id) {
                state.selected_ids.insert(id.to_string());
            }
        });
    }

    /// Replace the selection with the given ids.
    pub fn select_all<I>(&self, ids: I)
    where
        I: IntoIterator<Item = String>,
    {
        let selection = ids.into_iter().collect();
        self.publish(|state| state.selected_ids = selection);
    }

    pub fn clear_selection(&self) {
        self.publish(|state| state.selected_ids.clear());
    }

    pub fn set_active_tab(&self, tab: TabKey) {
        self.publish(|state| state.active_tab = tab);
    }

    /// Open the drawer on `item`. `open` and `current_item` change in the
    /// same published snapshot; no observer sees one without the other.
    pub fn open_drawer(&self, item: PropertySummary) {
        self.publish(|state| {
            state.drawer = DrawerState {
                open: true,
                current_item: Some(item),
            }
        });
    }

    /// Close the drawer, keeping `current_item` for exit animations.
    pub fn close_drawer(&self) {
        self.publish(|state| state.drawer.open = false);
    }

    pub fn set_current_item(&self, item: Option<PropertySummary>) {
        self.publish(|state| state.drawer.current_item = item);
    }
}
