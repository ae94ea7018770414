//! Cumulative (infinite-scroll) expansion over page browsing
//!
//! [`ExpansibleCollection`] layers accumulation on top of
//! [`PageCollection`](crate::page::PageCollection): instead of replacing the
//! visible items on every fetch, [`expand`](ExpansibleCollection::expand)
//! appends each new page to a growing record. Three lists are kept in play:
//!
//! - **fresh** — the raw result of the most recent fetch (the inner store)
//! - **accumulated** — the canonical ever-growing record of fetched items
//! - **exposed** — a structurally independent copy of `accumulated`, the only
//!   list external readers see
//!
//! `exposed` never aliases `accumulated`; items() hands out the copy, so a
//! caller mutating what it received cannot corrupt the record.
//!
//! Each fetch runs in an explicit [`FetchMode`]: `Replace` publishes the fresh
//! page directly (plain page-browsing semantics for the inherited navigation
//! operations), `Expand` leaves publication to the calling operation, which
//! folds the fresh page into the record itself.
//!
//! A failed fetch mid-[`expand`](ExpansibleCollection::expand) leaves
//! `current_page` already advanced and `exposed` cleared. That state is
//! intentional: the error has propagated, and the caller either retries or
//! calls [`query_to_first_page`](ExpansibleCollection::query_to_first_page)
//! to restart from scratch. As with the page layer, operations on one
//! collection must not overlap.

use crate::error::Result;
use crate::filter::{FilterParams, ParamMap};
use crate::page::{PageCollection, PageFetcher, PageState};
use crate::resource::Resource;
use crate::store::ResourceStore;
use tracing::debug;

#[cfg(test)]
mod tests;

/// How a fetch's payload is published once it lands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchMode {
    /// Publish the fresh page as the exposed list (plain page browsing)
    Replace,
    /// Leave publication to the calling operation's fold
    Expand,
}

/// Remotely-paginated collection that accumulates pages into one growing,
/// defensively-copied list
pub struct ExpansibleCollection<R: Resource, F: PageFetcher<R>> {
    pager: PageCollection<R, F>,
    accumulated: Vec<R>,
    exposed: Vec<R>,
}

impl<R: Resource, F: PageFetcher<R>> ExpansibleCollection<R, F> {
    /// Create an empty collection with pagination unstarted
    /// (`current_page = None`)
    pub fn new(fetcher: F) -> Self {
        let mut state = PageState::new();
        state.set_current_page(None);
        Self {
            pager: PageCollection::with_state(fetcher, state),
            accumulated: Vec::new(),
            exposed: Vec::new(),
        }
    }

    /// The exposed items: an independent copy of everything accumulated
    pub fn items(&self) -> &[R] {
        &self.exposed
    }

    /// The raw result of the most recent fetch
    pub fn fresh_items(&self) -> &[R] {
        self.pager.store().items()
    }

    /// Number of exposed items
    pub fn len(&self) -> usize {
        self.exposed.len()
    }

    /// Whether nothing is exposed yet
    pub fn is_empty(&self) -> bool {
        self.exposed.is_empty()
    }

    /// Browser state (page position, size, search, ordering)
    pub fn state(&self) -> &PageState {
        self.pager.state()
    }

    /// Mutable browser state
    pub fn state_mut(&mut self) -> &mut PageState {
        self.pager.state_mut()
    }

    /// The store receiving each page's fresh items
    pub fn store(&self) -> &ResourceStore<R> {
        self.pager.store()
    }

    /// Mutable access to the store
    pub fn store_mut(&mut self) -> &mut ResourceStore<R> {
        self.pager.store_mut()
    }

    /// Register a filter contributor on the underlying browser
    pub fn add_filter(&mut self, filter: impl FilterParams + Send + Sync + 'static) -> &mut Self {
        self.pager.add_filter(filter);
        self
    }

    /// Merged request parameters
    pub fn params(&self) -> ParamMap {
        self.pager.params()
    }

    /// Current page position; `None` until the first expansion
    pub fn current_page(&self) -> Option<u32> {
        self.pager.state().current_page()
    }

    /// Page size
    pub fn per_page(&self) -> Option<u32> {
        self.pager.state().per_page()
    }

    /// Total result count as reported by the last response
    pub fn total(&self) -> Option<u64> {
        self.pager.state().total()
    }

    /// Whether expansion has reached the last page.
    ///
    /// Strict: with pagination unstarted (`current_page = None`) this is
    /// false, unlike the page layer's 0-normalized reading.
    pub fn is_last_page(&self) -> bool {
        self.current_page() == Some(self.pager.state().last_page())
    }

    /// The minimum fetch width guaranteeing a full refetch covers everything
    /// already accumulated
    pub fn max_per_page(&self) -> u32 {
        (self.exposed.len() as u32).max(self.per_page().unwrap_or(0))
    }

    /// Fetch one more page and grow the exposed list.
    ///
    /// Advances `current_page` (0 if unstarted, else +1), fetches, appends the
    /// fresh page to the accumulated record, and republishes the exposed list
    /// as an independent copy of it. No-op once the last page was reached.
    pub async fn expand(&mut self) -> Result<()> {
        if self.is_last_page() && self.current_page().is_some() {
            return Ok(());
        }

        let next = self.current_page().map_or(0, |page| page + 1);
        self.pager.state_mut().set_current_page(Some(next));
        debug!(page = next, "expanding");

        self.query_as_expansible(FetchMode::Expand).await?;

        let fresh = self.pager.store().items().to_vec();
        self.accumulated.extend(fresh);
        self.exposed = self.accumulated.clone();
        Ok(())
    }

    /// Refetch everything accumulated so far in one request.
    ///
    /// Temporarily moves to page 0 at [`max_per_page`](Self::max_per_page)
    /// width, replaces the accumulated record wholesale with the result, and
    /// restores the original `current_page` / `per_page` (raw, including
    /// `None`). On failure the temporary position is left in place along with
    /// the cleared exposed list.
    pub async fn update(&mut self) -> Result<()> {
        let page = self.current_page();
        let per_page = self.per_page();
        let width = self.max_per_page();

        self.pager
            .state_mut()
            .set_current_page(Some(0))
            .set_per_page(Some(width));
        debug!(width, "updating accumulated window");

        self.query_as_expansible(FetchMode::Expand).await?;

        self.accumulated = self.pager.store().items().to_vec();
        self.exposed = self.accumulated.clone();

        self.pager
            .state_mut()
            .set_current_page(page)
            .set_per_page(per_page);
        Ok(())
    }

    /// Reorder by `column` and refetch the entire accumulated window.
    ///
    /// The sort changes which items belong in already-fetched pages, so this
    /// delegates to [`update`](Self::update) rather than fetching one page.
    pub async fn query_order_by(&mut self, column: &str) -> Result<()> {
        self.pager.state_mut().set_order(column);
        self.update().await
    }

    /// Restart the expansion from scratch: clear all three lists, reset the
    /// page position, and expand into page 0
    pub async fn query_to_first_page(&mut self) -> Result<()> {
        self.pager.state_mut().set_current_page(None);
        self.pager.store_mut().clear();
        self.accumulated.clear();
        self.exposed.clear();

        self.expand().await
    }

    /// Fetch page 0 for the current search term, replacing the exposed list
    /// with that single page. No-op for 1–2 character terms.
    pub async fn query_search(&mut self) -> Result<()> {
        if self.pager.state_mut().begin_search() {
            self.query_as_expansible(FetchMode::Replace).await?;
        }
        Ok(())
    }

    /// Jump to `page` (clamped) and replace the exposed list with that page
    pub async fn query_current_page(&mut self, page: i64) -> Result<()> {
        self.pager.state_mut().goto_page(page);
        self.query_as_expansible(FetchMode::Replace).await
    }

    /// Step one page back, replacing the exposed list; no-op at the lower
    /// bound or with pagination unstarted
    pub async fn query_prev_page(&mut self) -> Result<()> {
        if self.pager.state_mut().step_prev() {
            self.query_as_expansible(FetchMode::Replace).await?;
        }
        Ok(())
    }

    /// Step one page forward, replacing the exposed list; no-op at the upper
    /// bound or with pagination unstarted
    pub async fn query_next_page(&mut self) -> Result<()> {
        if self.pager.state_mut().step_next() {
            self.query_as_expansible(FetchMode::Replace).await?;
        }
        Ok(())
    }

    /// Disable page slicing entirely; does not fetch
    pub fn no_pagination(&mut self) -> &mut Self {
        self.pager.no_pagination();
        self
    }

    /// One fetch through the expansion hooks.
    ///
    /// Before the fetch: snapshot the currently exposed items as the
    /// accumulated record, then clear fresh and exposed so the new payload
    /// lands cleanly. After it, `Replace` mode publishes the fresh page;
    /// `Expand` mode leaves the fold to the caller.
    async fn query_as_expansible(&mut self, mode: FetchMode) -> Result<()> {
        self.accumulated = std::mem::take(&mut self.exposed);

        self.pager.fetch_current_page().await?;

        if mode == FetchMode::Replace {
            self.exposed = self.pager.store().items().to_vec();
        }
        Ok(())
    }
}
