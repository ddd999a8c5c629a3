//! In-memory backends for tests and demos.
//!
//! Both mocks ignore the search value and serve their items in insertion
//! order. They count backend calls so tests can assert on cache behavior.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use super::{BackendError, BackendResult, Finder};
use crate::types::{IterativeRequest, IterativeResult, PageResult, PagedRequest};

#[derive(Debug, Default)]
struct MockState {
    requests: AtomicUsize,
    fail_on_page: RwLock<Option<u64>>,
    latency_ms: AtomicU64,
}

impl MockState {
    fn record(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }

    fn latency(&self) -> Option<Duration> {
        match self.latency_ms.load(Ordering::SeqCst) {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }

    fn should_fail(&self, page: u64) -> bool {
        *self.fail_on_page.read().expect("lock poisoned") == Some(page)
    }
}

/// Page-addressed backend over a fixed item list.
#[derive(Debug, Clone)]
pub struct MockPagedBackend<T> {
    items: Arc<Vec<T>>,
    state: Arc<MockState>,
}

impl<T: Clone> MockPagedBackend<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: Arc::new(items),
            state: Arc::new(MockState::default()),
        }
    }

    /// Number of `find` calls so far.
    pub fn request_count(&self) -> usize {
        self.state.requests.load(Ordering::SeqCst)
    }

    pub fn reset_request_count(&self) {
        self.state.requests.store(0, Ordering::SeqCst);
    }

    /// Makes every request for `page` fail with [`BackendError::Unavailable`].
    pub fn fail_on_page(&self, page: Option<u64>) {
        *self.state.fail_on_page.write().expect("lock poisoned") = page;
    }

    /// Delays every answer, so concurrent callers overlap.
    pub fn set_latency(&self, latency: Duration) {
        self.state
            .latency_ms
            .store(latency.as_millis() as u64, Ordering::SeqCst);
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    fn page(&self, page: u64, page_size: u64) -> Vec<T> {
        let start = page.saturating_mul(page_size);
        self.items
            .iter()
            .skip(usize::try_from(start).unwrap_or(usize::MAX))
            .take(usize::try_from(page_size).unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }
}

impl<S, T> Finder<PagedRequest<S>, PageResult<T>> for MockPagedBackend<T>
where
    S: Sync,
    T: Clone + Send + Sync,
{
    async fn find(&self, request: &PagedRequest<S>) -> BackendResult<PageResult<T>> {
        self.state.record();
        if let Some(latency) = self.state.latency() {
            tokio::time::sleep(latency).await;
        }
        if self.state.should_fail(request.page) {
            return Err(BackendError::unavailable(format!(
                "page {} is not available",
                request.page
            )));
        }
        Ok(PageResult::new(
            self.page(request.page, request.page_size),
            request.page,
            request.page_size,
        ))
    }
}

/// Cursor-addressed backend over a fixed item list.
///
/// The cursor is the offset of the next item. By default every answer carries
/// a next cursor, so the end is only signaled by an empty page; with
/// [`terminal_cursor`](Self::terminal_cursor) the last non-empty page carries
/// no cursor instead.
#[derive(Debug, Clone)]
pub struct MockCursorBackend<T> {
    items: Arc<Vec<T>>,
    terminal_cursor: bool,
    state: Arc<MockState>,
}

impl<T: Clone> MockCursorBackend<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: Arc::new(items),
            terminal_cursor: false,
            state: Arc::new(MockState::default()),
        }
    }

    /// Omits the next cursor on the page that reaches the end of the data.
    pub fn terminal_cursor(mut self) -> Self {
        self.terminal_cursor = true;
        self
    }

    pub fn request_count(&self) -> usize {
        self.state.requests.load(Ordering::SeqCst)
    }

    pub fn reset_request_count(&self) {
        self.state.requests.store(0, Ordering::SeqCst);
    }

    /// Makes every request whose cursor points at page `page` fail.
    pub fn fail_on_page(&self, page: Option<u64>) {
        *self.state.fail_on_page.write().expect("lock poisoned") = page;
    }

    pub fn set_latency(&self, latency: Duration) {
        self.state
            .latency_ms
            .store(latency.as_millis() as u64, Ordering::SeqCst);
    }
}

impl<S, T> Finder<IterativeRequest<S, u64>, IterativeResult<T, u64>> for MockCursorBackend<T>
where
    S: Sync,
    T: Clone + Send + Sync,
{
    async fn find(
        &self,
        request: &IterativeRequest<S, u64>,
    ) -> BackendResult<IterativeResult<T, u64>> {
        self.state.record();
        if let Some(latency) = self.state.latency() {
            tokio::time::sleep(latency).await;
        }

        let offset = request.cursor.unwrap_or(0);
        if request.page_size > 0 && self.state.should_fail(offset / request.page_size) {
            return Err(BackendError::unavailable(format!(
                "cursor {offset} is not available"
            )));
        }

        let start = usize::try_from(offset).unwrap_or(usize::MAX);
        let items: Vec<T> = self
            .items
            .iter()
            .skip(start)
            .take(usize::try_from(request.page_size).unwrap_or(usize::MAX))
            .cloned()
            .collect();

        let next = offset + items.len() as u64;
        let next_cursor = if self.terminal_cursor && next >= self.items.len() as u64 {
            None
        } else {
            Some(next)
        };

        Ok(IterativeResult::new(items, next_cursor, request.page_size))
    }
}
