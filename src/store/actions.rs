// src/store/actions.rs

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::domain::adapter::{to_property_summary, AdapterError};
use crate::domain::schema::ValidationError;
use crate::domain::types::{FilterSpec, Pagination, PropertySummary, SortSpec, TabKey};
use crate::fetch::{FetchError, FetchParams, PropertyClient};
use crate::store::TabbedListStore;

/// Why a reload produced no new items. Cancellation is handled before this
/// ever reaches the store's `error` slot.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Adapt(#[from] AdapterError),
    #[error(transparent)]
    Params(ValidationError),
}

/// Parameter overrides for one reload. `sort` is tri-state: `None` leaves
/// the current sort alone, `Some(None)` clears it, `Some(Some(_))` sets it.
#[derive(Debug, Clone, Default)]
pub struct LoadOverrides {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub sort: Option<Option<SortSpec>>,
    pub filters: Option<FilterSpec>,
}

/// The sole asynchronous entry point of the pipeline.
///
/// Composes the fetch service, the adapter, and the store into one
/// coherent reload with consistent loading/error semantics. Overlapping
/// invocations are resolved by a request generation counter: each call
/// claims the next generation, cancels its predecessor's request, and
/// only the latest generation may write `items`/`pagination`/`error` or
/// clear `loading`. The last *issued* request is authoritative no matter
/// which response lands last.
pub struct ListActions {
    store: TabbedListStore,
    client: PropertyClient,
    generation: AtomicU64,
    inflight: Mutex<CancellationToken>,
}

impl ListActions {
    pub fn new(store: TabbedListStore, client: PropertyClient) -> Self {
        Self {
            store,
            client,
            generation: AtomicU64::new(0),
            inflight: Mutex::new(CancellationToken::new()),
        }
    }

    /// The store this action layer drives. Presentation reads snapshots
    /// and subscriptions from here.
    pub fn store(&self) -> &TabbedListStore {
        &self.store
    }

    /// Reload the list: apply `overrides` to the store, fetch with the
    /// now-current parameters, adapt every record, and commit.
    ///
    /// State machine per invocation: `loading=true` and `error=None`
    /// immediately; on success `items` and `pagination` are replaced
    /// wholesale; on failure `error` is set and the last known-good list
    /// stays visible; a cancelled (superseded) request changes nothing.
    /// One record failing adaptation aborts the whole batch - partial
    /// ingestion is never exposed.
    pub async fn load_properties(&self, overrides: LoadOverrides) {
        let (generation, cancel) = self.begin_load();

        self.commit_if_current(generation, || {
            self.store.set_loading(true);
            self.store.set_error(None);
        });

        match self.run_load(generation, overrides, &cancel).await {
            Ok(()) => {}
            Err(LoadError::Fetch(FetchError::Cancelled)) => {
                debug!(generation, "property load cancelled, leaving state untouched");
            }
            Err(err) => {
                let written = self.commit_if_current(generation, || {
                    self.store.set_error(Some(err.to_string()));
                });
                if written {
                    warn!(generation, error = %err, "property load failed");
                }
            }
        }

        // Only the authoritative request clears the loading flag; a
        // superseded one leaves it to its successor.
        self.commit_if_current(generation, || self.store.set_loading(false));
    }

    async fn run_load(
        &self,
        generation: u64,
        overrides: LoadOverrides,
        cancel: &CancellationToken,
    ) -> Result<(), LoadError> {
        // Overrides land in the store before the fetch so an overlapping
        // call observes the latest intended parameters, not stale ones.
        // Gated like every other write: a superseded request must not
        // clobber the parameters its successor just applied.
        self.commit_if_current(generation, || {
            if let Some(filters) = overrides.filters {
                self.store.set_filters(filters);
            }
            if overrides.page.is_some() || overrides.page_size.is_some() {
                let current = self.store.snapshot().pagination;
                self.store.set_pagination(Pagination {
                    page: overrides.page.unwrap_or(current.page),
                    page_size: overrides.page_size.unwrap_or(current.page_size),
                    total: current.total,
                });
            }
            if let Some(sort) = overrides.sort {
                self.store.set_sort(sort);
            }
        });

        let snapshot = self.store.snapshot();
        snapshot.filters.validate().map_err(LoadError::Params)?;
        snapshot.pagination.validate().map_err(LoadError::Params)?;

        let params = FetchParams {
            page: snapshot.pagination.page,
            page_size: snapshot.pagination.page_size,
            sort: snapshot.sort,
            filters: snapshot.filters.clone(),
        };

        let result = self.client.fetch_properties(&params, cancel).await?;

        // Strict batch policy: one bad record rejects the whole page.
        let mut items = Vec::with_capacity(result.items.len());
        for raw in &result.items {
            items.push(to_property_summary(raw)?);
        }

        let committed = self.commit_if_current(generation, || {
            self.store.set_items(items);
            self.store.set_pagination(result.pagination);
        });
        if !committed {
            debug!(generation, "discarding superseded property load result");
        }

        Ok(())
    }

    /// Claim the next request generation and install a fresh cancellation
    /// token as the in-flight request, cancelling whichever request held
    /// the slot before. Runs under the in-flight lock so a claim can never
    /// interleave with a commit.
    fn begin_load(&self) -> (u64, CancellationToken) {
        let mut slot = self
            .inflight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let token = CancellationToken::new();
        std::mem::replace(&mut *slot, token.clone()).cancel();
        (generation, token)
    }

    /// Run `write` only while `generation` is still the latest claimed
    /// one. Shares the in-flight lock with [`Self::begin_load`], so a
    /// superseded request can never write over its successor's state.
    fn commit_if_current<F: FnOnce()>(&self, generation: u64, write: F) -> bool {
        let _slot = self
            .inflight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if self.generation.load(Ordering::SeqCst) == generation {
            write();
            true
        } else {
            false
        }
    }

    // Convenience handles consumed by presentation layers.

    pub async fn reload(&self) {
        self.load_properties(LoadOverrides::default()).await;
    }

    pub async fn set_page(&self, page: u32) {
        self.load_properties(LoadOverrides {
            page: Some(page),
            ..LoadOverrides::default()
        })
        .await;
    }

    pub async fn set_page_size(&self, page_size: u32) {
        self.load_properties(LoadOverrides {
            page_size: Some(page_size),
            ..LoadOverrides::default()
        })
        .await;
    }

    pub async fn set_sort(&self, sort: Option<SortSpec>) {
        self.load_properties(LoadOverrides {
            sort: Some(sort),
            ..LoadOverrides::default()
        })
        .await;
    }

    pub async fn set_filters(&self, filters: FilterSpec) {
        self.load_properties(LoadOverrides {
            filters: Some(filters),
            ..LoadOverrides::default()
        })
        .await;
    }

    pub fn toggle_select(&self, id: &str) {
        self.store.toggle_select(id);
    }

    pub fn clear_selection(&self) {
        self.store.clear_selection();
    }

    pub fn set_active_tab(&self, tab: TabKey) {
        self.store.set_active_tab(tab);
    }

    pub fn open_drawer(&self, item: PropertySummary) {
        self.store.open_drawer(item);
    }

    /// Open the drawer for an id currently in the list; unknown ids are
    /// ignored.
    pub fn open_drawer_by_id(&self, id: &str) {
        let snapshot = self.store.snapshot();
        if let Some(item) = snapshot.items.iter().find(|item| item.id == id) {
            self.store.open_drawer(item.clone());
        }
    }

    pub fn close_drawer(&self) {
        self.store.close_drawer();
    }
}
