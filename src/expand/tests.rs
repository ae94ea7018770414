//! Tests for the expansion layer

use super::*;
use crate::error::Error;
use crate::page::{PageRequest, PageResponse};
use crate::resource::ResourceId;
use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
struct Track {
    id: u64,
    title: String,
}

impl Track {
    fn new(id: u64) -> Self {
        Self {
            id,
            title: format!("track{id}"),
        }
    }
}

impl Resource for Track {
    fn id(&self) -> Option<ResourceId> {
        Some(self.id)
    }

    fn tag(&self) -> &str {
        &self.title
    }
}

/// Serves full pages of synthetic tracks, counting calls; can be told to fail.
#[derive(Clone)]
struct MockFetcher {
    calls: Arc<AtomicUsize>,
    fail: Arc<AtomicBool>,
    total: u64,
}

impl MockFetcher {
    fn new(total: u64) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            fail: Arc::new(AtomicBool::new(false)),
            total,
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl PageFetcher<Track> for MockFetcher {
    async fn fetch_page(&self, request: &PageRequest) -> Result<PageResponse<Track>> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::http_status(503, "unavailable"));
        }
        self.calls.fetch_add(1, Ordering::SeqCst);

        let limit = request
            .params
            .get("limit")
            .and_then(Value::as_u64)
            .unwrap_or(0);
        let page = request
            .params
            .get("page")
            .and_then(Value::as_u64)
            .unwrap_or(0);

        let remaining = self.total.saturating_sub(page * limit);
        let count = limit.min(remaining);
        let items = (0..count).map(|i| Track::new(page * limit + i + 1)).collect();
        Ok(PageResponse::with_total(items, self.total))
    }
}

fn collection(total: u64) -> (ExpansibleCollection<Track, MockFetcher>, MockFetcher) {
    let fetcher = MockFetcher::new(total);
    let collection = ExpansibleCollection::new(fetcher.clone());
    (collection, fetcher)
}

#[test]
fn test_starts_empty_and_unstarted() {
    let (subject, _) = collection(100);
    assert!(subject.is_empty());
    assert_eq!(subject.current_page(), None);
    assert_eq!(subject.per_page(), Some(20));
    assert_eq!(subject.max_per_page(), 20);
    assert!(!subject.is_last_page()); // strict: unstarted is never the last page
}

#[tokio::test]
async fn test_expand_grows_until_exhaustion() {
    let (mut subject, fetcher) = collection(100);

    let expected = [
        (0, 20, 20),
        (1, 40, 40),
        (2, 60, 60),
        (3, 80, 80),
        (4, 100, 100),
    ];
    for (page, len, width) in expected {
        subject.expand().await.unwrap();
        assert_eq!(subject.current_page(), Some(page));
        assert_eq!(subject.len(), len);
        assert_eq!(subject.max_per_page(), width);
    }
    assert_eq!(subject.state().last_page(), 4);
    assert!(subject.is_last_page());
    assert_eq!(fetcher.calls(), 5);

    // Exhausted: further calls are no-ops and do not fetch.
    subject.expand().await.unwrap();
    assert_eq!(subject.current_page(), Some(4));
    assert_eq!(subject.len(), 100);
    assert_eq!(fetcher.calls(), 5);
}

#[tokio::test]
async fn test_expand_accumulates_in_fetch_order() {
    let (mut subject, _) = collection(50);
    subject.expand().await.unwrap();
    subject.expand().await.unwrap();

    let ids: Vec<u64> = subject.items().iter().map(|t| t.id).collect();
    let expected: Vec<u64> = (1..=40).collect();
    assert_eq!(ids, expected);

    // Fresh holds only the latest page; exposed holds everything.
    assert_eq!(subject.fresh_items().len(), 20);
    assert_eq!(subject.fresh_items()[0].id, 21);
}

#[tokio::test]
async fn test_exposed_is_independent_of_fresh() {
    let (mut subject, _) = collection(50);
    subject.expand().await.unwrap();
    subject.expand().await.unwrap();

    subject.store_mut().clear();
    assert_eq!(subject.len(), 40);
}

#[tokio::test]
async fn test_partial_last_page() {
    let (mut subject, fetcher) = collection(90);

    for _ in 0..5 {
        subject.expand().await.unwrap();
    }
    assert_eq!(subject.len(), 90);
    assert!(subject.is_last_page());

    subject.expand().await.unwrap();
    assert_eq!(fetcher.calls(), 5);
}

#[tokio::test]
async fn test_update_preserves_position_and_refetches_window() {
    let (mut subject, _) = collection(100);
    for _ in 0..5 {
        subject.expand().await.unwrap();
    }

    subject.update().await.unwrap();
    assert_eq!(subject.current_page(), Some(4));
    assert_eq!(subject.per_page(), Some(20));
    assert_eq!(subject.len(), 100);
    assert_eq!(subject.max_per_page(), 100);
    // One wide request re-derived the whole window.
    assert_eq!(subject.fresh_items().len(), 100);
}

#[tokio::test]
async fn test_update_before_any_expansion() {
    let (mut subject, _) = collection(100);

    subject.update().await.unwrap();
    // Raw position restored, including "unstarted".
    assert_eq!(subject.current_page(), None);
    assert_eq!(subject.per_page(), Some(20));
    assert_eq!(subject.len(), 20);
}

#[tokio::test]
async fn test_query_order_by_refetches_whole_window() {
    let (mut subject, _) = collection(100);
    for _ in 0..5 {
        subject.expand().await.unwrap();
    }

    subject.query_order_by("title").await.unwrap();
    assert_eq!(subject.state().order_by(), Some("title"));
    assert_eq!(subject.state().asc(), Some(true));
    assert_eq!(subject.current_page(), Some(4));
    assert_eq!(subject.per_page(), Some(20));
    assert_eq!(subject.len(), 100);

    subject.query_order_by("title").await.unwrap();
    assert_eq!(subject.state().asc(), Some(false));
}

#[tokio::test]
async fn test_query_to_first_page_restarts() {
    let (mut subject, _) = collection(100);
    for _ in 0..3 {
        subject.expand().await.unwrap();
    }
    assert_eq!(subject.len(), 60);

    subject.query_to_first_page().await.unwrap();
    assert_eq!(subject.current_page(), Some(0));
    assert_eq!(subject.len(), 20);
    assert_eq!(subject.max_per_page(), 20);
}

#[tokio::test]
async fn test_replace_navigation_shows_single_page() {
    let (mut subject, _) = collection(100);
    for _ in 0..3 {
        subject.expand().await.unwrap();
    }
    assert_eq!(subject.len(), 60);

    // Plain page navigation replaces the exposed list with one page.
    subject.query_current_page(1).await.unwrap();
    assert_eq!(subject.current_page(), Some(1));
    assert_eq!(subject.len(), 20);
    assert_eq!(subject.items()[0].id, 21);
}

#[tokio::test]
async fn test_search_suppression() {
    let (mut subject, fetcher) = collection(100);

    subject.query_search().await.unwrap();
    assert_eq!(fetcher.calls(), 1);

    subject.state_mut().set_search(Some("li".to_string()));
    subject.query_search().await.unwrap();
    assert_eq!(fetcher.calls(), 1); // not called, 0 < len < 3

    subject.state_mut().set_search(Some("my query".to_string()));
    subject.query_search().await.unwrap();
    assert_eq!(fetcher.calls(), 2);
}

#[tokio::test]
async fn test_failed_expand_leaves_documented_state() {
    let (mut subject, fetcher) = collection(100);
    subject.expand().await.unwrap();
    assert_eq!(subject.len(), 20);

    fetcher.set_fail(true);
    let err = subject.expand().await.unwrap_err();
    assert!(err.to_string().contains("HTTP 503"));

    // Page already advanced, exposed cleared: inconsistent-looking but
    // documented. The accumulated record still holds the prior snapshot.
    assert_eq!(subject.current_page(), Some(1));
    assert!(subject.is_empty());

    // Recovery restarts the expansion from scratch.
    fetcher.set_fail(false);
    subject.query_to_first_page().await.unwrap();
    assert_eq!(subject.current_page(), Some(0));
    assert_eq!(subject.len(), 20);
}
