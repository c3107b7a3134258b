//! Business-logic layer for a tabbed property-listing UI.
//!
//! The crate fetches paged collections of heterogeneous property records
//! from a backend, normalizes them into the validated [`PropertySummary`]
//! domain model, and exposes paginated, filtered, sorted, and selectable
//! list state (plus a single-item drawer view) to presentation layers.
//!
//! Presentation code reads state snapshots through [`store::selectors`] and
//! triggers mutation through [`ListActions`] only; the [`TabbedListStore`]
//! is the single owner of the mutable view state.

pub mod config;
pub mod domain;
pub mod fetch;
pub mod store;

pub use config::AppConfig;
pub use domain::adapter::{to_property_summary, AdapterError};
pub use domain::schema::{validate, PropertyCandidate, ValidationError};
pub use domain::types::{
    Badge, BadgeTone, DrawerState, FilterSpec, Pagination, PropertySummary, SortDirection,
    SortField, SortSpec, TabKey, TabbedListState,
};
pub use fetch::{FetchError, FetchParams, PagedResult, PropertyClient};
pub use store::{ListActions, LoadError, LoadOverrides, TabbedListStore};

#[cfg(test)]
mod tests;
