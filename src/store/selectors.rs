// src/store/selectors.rs
//
// Pure read-views over a state snapshot. Selectors never mutate; anything
// derived for presentation belongs here rather than in components.

use std::collections::HashSet;

use crate::domain::types::{
    DrawerState, FilterSpec, Pagination, PropertySummary, SortSpec, TabKey, TabbedListState,
};

pub fn select_items(state: &TabbedListState) -> &[PropertySummary] {
    &state.items
}

pub fn select_loading(state: &TabbedListState) -> bool {
    state.loading
}

pub fn select_error(state: &TabbedListState) -> Option<&str> {
    state.error.as_deref()
}

pub fn select_pagination(state: &TabbedListState) -> Pagination {
    state.pagination
}

pub fn select_sort(state: &TabbedListState) -> Option<SortSpec> {
    state.sort
}

pub fn select_filters(state: &TabbedListState) -> &FilterSpec {
    &state.filters
}

pub fn select_selected_ids(state: &TabbedListState) -> &HashSet<String> {
    &state.selected_ids
}

pub fn select_active_tab(state: &TabbedListState) -> TabKey {
    state.active_tab
}

pub fn select_drawer(state: &TabbedListState) -> &DrawerState {
    &state.drawer
}

/// The selected items in list order.
pub fn select_selected_items(state: &TabbedListState) -> Vec<&PropertySummary> {
    state
        .items
        .iter()
        .filter(|item| state.selected_ids.contains(&item.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::domain::adapter::to_property_summary;
    use crate::store::TabbedListStore;
    use serde_json::json;

    #[test]
    fn selected_items_preserve_list_order() {
        let store = TabbedListStore::new(&AppConfig::default());
        let items: Vec<PropertySummary> = ["a", "b", "c"]
            .iter()
            .map(|id| to_property_summary(&json!({ "id": id })).unwrap())
            .collect();
        store.set_items(items);
        store.toggle_select("c");
        store.toggle_select("a");

        let snapshot = store.snapshot();
        let selected = select_selected_items(&snapshot);
        let ids: Vec<&str> = selected.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn scalar_selectors_mirror_the_snapshot() {
        let store = TabbedListStore::new(&AppConfig::default());
        store.set_loading(true);
        store.set_error(Some("boom".to_string()));

        let snapshot = store.snapshot();
        assert!(select_loading(&snapshot));
        assert_eq!(select_error(&snapshot), Some("boom"));
        assert_eq!(select_pagination(&snapshot).page_size, 24);
        assert_eq!(select_active_tab(&snapshot), TabKey::Results);
        assert!(select_items(&snapshot).is_empty());
        assert!(select_selected_ids(&snapshot).is_empty());
        assert!(!select_drawer(&snapshot).open);
        assert_eq!(select_sort(&snapshot), None);
        assert_eq!(select_filters(&snapshot), &FilterSpec::default());
    }
}
