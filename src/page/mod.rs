//! Page-by-page browsing over an abstract fetch
//!
//! [`PageCollection`] binds a [`PageState`] state machine, a
//! [`ResourceStore`](crate::store::ResourceStore) receiving fetched items, and
//! a [`PageFetcher`] performing the actual call. Every navigation operation
//! funnels through the same fetch pipeline: build the merged request,
//! clear the store (the before-serialization hook), await the fetch, write
//! the payload into the store, and fold the reported total back into the
//! state.
//!
//! Operations are not safe to overlap: a second fetch issued before an
//! earlier one resolves races on shared state, and completion order decides
//! the outcome. Callers must serialize operations on one collection.

mod types;

pub use types::{PageFetcher, PageRequest, PageResponse, PageState};

use crate::error::Result;
use crate::filter::{merge_params, FilterParams, ParamMap};
use crate::resource::Resource;
use crate::store::ResourceStore;
use tracing::debug;


/// Remotely-paginated collection browsed one page at a time
pub struct PageCollection<R: Resource, F: PageFetcher<R>> {
    state: PageState,
    store: ResourceStore<R>,
    fetcher: F,
}

impl<R: Resource, F: PageFetcher<R>> PageCollection<R, F> {
    /// Create an empty collection on page 0 with the default page size
    pub fn new(fetcher: F) -> Self {
        Self {
            state: PageState::new(),
            store: ResourceStore::new(),
            fetcher,
        }
    }

    pub(crate) fn with_state(fetcher: F, state: PageState) -> Self {
        Self {
            state,
            store: ResourceStore::new(),
            fetcher,
        }
    }

    /// Browser state (page position, size, search, ordering)
    pub fn state(&self) -> &PageState {
        &self.state
    }

    /// Mutable browser state
    pub fn state_mut(&mut self) -> &mut PageState {
        &mut self.state
    }

    /// The store holding the current page's items
    pub fn store(&self) -> &ResourceStore<R> {
        &self.store
    }

    /// Mutable access to the store
    pub fn store_mut(&mut self) -> &mut ResourceStore<R> {
        &mut self.store
    }

    /// This page's items, in response order
    pub fn items(&self) -> &[R] {
        self.store.items()
    }

    /// Register a filter contributor; its parameters override the browser's
    /// own on key collision
    pub fn add_filter(&mut self, filter: impl FilterParams + Send + Sync + 'static) -> &mut Self {
        self.store.add_filter(filter);
        self
    }

    /// Merged request parameters: the browser's own state first, then every
    /// registered contributor in order, later ones winning on collision
    pub fn params(&self) -> ParamMap {
        let mut result = self.state.filter_params();
        merge_params(&mut result, self.store.params());
        result
    }

    /// Whether the browser sits on the last page
    pub fn is_last_page(&self) -> bool {
        self.state.is_last_page()
    }

    /// Last reachable page position
    pub fn last_page(&self) -> u32 {
        self.state.last_page()
    }

    /// Disable page slicing entirely; does not fetch
    pub fn no_pagination(&mut self) -> &mut Self {
        self.state.no_pagination();
        self
    }

    /// Fetch the current page into the store.
    ///
    /// The store is cleared before the fetch is issued, so a failing fetch
    /// leaves it empty; the error propagates untouched.
    pub async fn query_as_page(&mut self) -> Result<()> {
        self.fetch_current_page().await
    }

    pub(crate) async fn fetch_current_page(&mut self) -> Result<()> {
        let request = PageRequest::new(self.params());
        debug!(
            page = ?self.state.current_page(),
            per_page = ?self.state.per_page(),
            "fetching page"
        );

        self.store.on_before_serialization();
        let response = self.fetcher.fetch_page(&request).await?;

        if let Some(total) = response.total {
            self.state.set_total(Some(total));
        }
        debug!(
            count = response.items.len(),
            total = ?self.state.total(),
            "page received"
        );
        self.store.extend(response.items);
        Ok(())
    }

    /// Fetch page 0 for the current search term.
    ///
    /// No-op for 1–2 character terms; an empty or absent term fetches.
    pub async fn query_search(&mut self) -> Result<()> {
        if self.state.begin_search() {
            self.fetch_current_page().await?;
        }
        Ok(())
    }

    /// Reorder by `column` and fetch.
    ///
    /// Repeating the current column toggles direction; a new column resets to
    /// ascending.
    pub async fn query_order_by(&mut self, column: &str) -> Result<()> {
        self.state.set_order(column);
        self.fetch_current_page().await
    }

    /// Jump to `page`, clamped into `[0, last_page]`, and fetch.
    ///
    /// Always fetches, even when the clamped position equals the current one.
    pub async fn query_current_page(&mut self, page: i64) -> Result<()> {
        self.state.goto_page(page);
        self.fetch_current_page().await
    }

    /// Step one page back and fetch; no-op on page 0 or with pagination
    /// unstarted
    pub async fn query_prev_page(&mut self) -> Result<()> {
        if self.state.step_prev() {
            self.fetch_current_page().await?;
        }
        Ok(())
    }

    /// Step one page forward and fetch; no-op on the last page or with
    /// pagination unstarted
    pub async fn query_next_page(&mut self) -> Result<()> {
        if self.state.step_next() {
            self.fetch_current_page().await?;
        }
        Ok(())
    }
}
