//! Page browsing types and the fetch seam
//!
//! [`PageState`] is the pure state machine over page position, page size,
//! search, and ordering. [`PageFetcher`] is the abstract fetch contract the
//! collections drive; [`PageRequest`] / [`PageResponse`] are its declared wire
//! schema.

use crate::error::Result;
use crate::filter::ParamMap;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Page position, page size, search, and ordering state.
///
/// Serializes under the remote API's parameter names, so the state doubles as
/// its own filter contributor: `query`, `page`, `limit`, `orderBy`,
/// `ascending`. `total` is response-only and never sent.
///
/// `current_page` / `per_page` set to `None` means pagination is disabled;
/// `total` is unknown until the first response delivers it.
#[derive(Debug, Clone, Serialize)]
pub struct PageState {
    #[serde(rename = "query")]
    search: Option<String>,

    #[serde(rename = "page")]
    current_page: Option<u32>,

    #[serde(rename = "limit")]
    per_page: Option<u32>,

    #[serde(rename = "orderBy")]
    order_by: Option<String>,

    #[serde(rename = "ascending")]
    asc: Option<bool>,

    #[serde(skip)]
    total: Option<u64>,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            search: None,
            current_page: Some(Self::DEFAULT_CURRENT_PAGE),
            per_page: Some(Self::DEFAULT_PER_PAGE),
            order_by: None,
            asc: None,
            total: None,
        }
    }
}

impl PageState {
    /// Page position a fresh browser starts on
    pub const DEFAULT_CURRENT_PAGE: u32 = 0;

    /// Page size a fresh browser starts with
    pub const DEFAULT_PER_PAGE: u32 = 20;

    /// Minimum search length before a search triggers a fetch
    pub const MIN_CHARS_TO_SEARCH: usize = 3;

    /// Default state: page 0, 20 per page, no search or ordering
    pub fn new() -> Self {
        Self::default()
    }

    /// Current search term
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Current page position; `None` when pagination is disabled or unstarted
    pub fn current_page(&self) -> Option<u32> {
        self.current_page
    }

    /// Page size; `None` when pagination is disabled
    pub fn per_page(&self) -> Option<u32> {
        self.per_page
    }

    /// Ordering column
    pub fn order_by(&self) -> Option<&str> {
        self.order_by.as_deref()
    }

    /// Ordering direction
    pub fn asc(&self) -> Option<bool> {
        self.asc
    }

    /// Total result count as reported by the last response
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    /// Set the search term
    pub fn set_search(&mut self, val: Option<String>) -> &mut Self {
        self.search = val;
        self
    }

    /// Set the page position
    pub fn set_current_page(&mut self, val: Option<u32>) -> &mut Self {
        self.current_page = val;
        self
    }

    /// Set the page size
    pub fn set_per_page(&mut self, val: Option<u32>) -> &mut Self {
        self.per_page = val;
        self
    }

    /// Set the ordering column
    pub fn set_order_by(&mut self, val: Option<String>) -> &mut Self {
        self.order_by = val;
        self
    }

    /// Set the ordering direction
    pub fn set_asc(&mut self, val: Option<bool>) -> &mut Self {
        self.asc = val;
        self
    }

    /// Set the total result count
    pub fn set_total(&mut self, val: Option<u64>) -> &mut Self {
        self.total = val;
        self
    }

    /// Last reachable page position.
    ///
    /// `floor(max(total - 1, 0) / max(per_page, 1))`; an unknown total reads
    /// as zero.
    pub fn last_page(&self) -> u32 {
        let total = self.total.unwrap_or(0);
        let per_page = u64::from(self.per_page.unwrap_or(1).max(1));
        (total.saturating_sub(1) / per_page) as u32
    }

    /// Whether the browser sits on the last page; an unset page reads as 0
    pub fn is_last_page(&self) -> bool {
        self.current_page.unwrap_or(0) == self.last_page()
    }

    /// Disable page slicing entirely
    pub fn no_pagination(&mut self) -> &mut Self {
        self.current_page = None;
        self.per_page = None;
        self
    }

    /// Transition for a search: resets to page 0 and reports whether a fetch
    /// should follow.
    ///
    /// Searches of 1 or 2 characters are suppressed so that a fetch is not
    /// issued on every keystroke; an empty or absent search always fetches.
    pub fn begin_search(&mut self) -> bool {
        let allowed = match &self.search {
            None => true,
            Some(term) => term.is_empty() || term.chars().count() >= Self::MIN_CHARS_TO_SEARCH,
        };
        if allowed {
            self.current_page = Some(0);
        }
        allowed
    }

    /// Transition for reordering: toggles direction on the same column,
    /// resets to ascending on a new one.
    pub fn set_order(&mut self, column: &str) -> &mut Self {
        if self.order_by.as_deref() == Some(column) {
            self.asc = Some(!self.asc.unwrap_or(false));
        } else {
            self.asc = Some(true);
        }
        self.order_by = Some(column.to_string());
        self
    }

    /// Transition to an arbitrary page, clamped into `[0, last_page]`
    pub fn goto_page(&mut self, page: i64) -> &mut Self {
        let clamped = page.clamp(0, i64::from(self.last_page())) as u32;
        self.current_page = Some(clamped);
        self
    }

    /// Transition one page back; reports whether the move (and a fetch)
    /// happened. No-op on page 0 or with pagination unstarted.
    pub fn step_prev(&mut self) -> bool {
        match self.current_page {
            Some(page) if page > 0 => {
                self.current_page = Some(page - 1);
                true
            }
            _ => false,
        }
    }

    /// Transition one page forward; reports whether the move (and a fetch)
    /// happened. No-op on the last page or with pagination unstarted.
    pub fn step_next(&mut self) -> bool {
        match self.current_page {
            Some(page) if page < self.last_page() => {
                self.current_page = Some(page + 1);
                true
            }
            _ => false,
        }
    }
}

/// One page request: the merged query parameters of the browser state and
/// every registered filter contributor
#[derive(Debug, Clone, Default)]
pub struct PageRequest {
    /// Flat parameter set, nulls already dropped
    pub params: ParamMap,
}

impl PageRequest {
    /// Wrap a merged parameter set
    pub fn new(params: ParamMap) -> Self {
        Self { params }
    }

    /// Parameters as query-string pairs; non-string values render as their
    /// JSON text
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.params
            .iter()
            .map(|(key, value)| {
                let rendered = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (key.clone(), rendered)
            })
            .collect()
    }
}

/// One page of results as delivered by a fetcher
#[derive(Debug, Clone, Deserialize)]
pub struct PageResponse<R> {
    /// This page's items
    #[serde(default = "Vec::new")]
    pub items: Vec<R>,

    /// Total result count across all pages, when the endpoint reports one
    #[serde(default)]
    pub total: Option<u64>,
}

impl<R> PageResponse<R> {
    /// A page without a total count
    pub fn new(items: Vec<R>) -> Self {
        Self { items, total: None }
    }

    /// A page with a total count
    pub fn with_total(items: Vec<R>, total: u64) -> Self {
        Self {
            items,
            total: Some(total),
        }
    }
}

/// Abstract fetch contract driven by the collections.
///
/// Implementations read the request's parameters, perform the call, and
/// return the decoded page. Failures propagate untouched to the caller of the
/// triggering operation; the collections never retry or swallow them.
#[async_trait]
pub trait PageFetcher<R>: Send + Sync {
    /// Fetch one page of results
    async fn fetch_page(&self, request: &PageRequest) -> Result<PageResponse<R>>;
}
