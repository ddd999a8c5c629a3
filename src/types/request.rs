use serde::{Deserialize, Serialize};

/// One backend fetch addressed by page number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PagedRequest<S> {
    /// Backend query parameters.
    pub search: S,
    /// Zero-based page number.
    pub page: u64,
    /// Items per page (must be non-zero).
    pub page_size: u64,
}

impl<S> PagedRequest<S> {
    #[inline]
    pub fn new(search: S, page: u64, page_size: u64) -> Self {
        Self {
            search,
            page,
            page_size,
        }
    }
}

impl<S: Clone> PagedRequest<S> {
    /// Returns the same request pointed at another page.
    #[inline]
    pub fn at_page(&self, page: u64) -> Self {
        Self::new(self.search.clone(), page, self.page_size)
    }
}

/// One client-visible output page: a backend search plus a filter the backend
/// cannot evaluate.
///
/// Used as the checkpoint cache key, so requests that differ in filter or page
/// size never share entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilteredPagedRequest<S, F> {
    /// Backend query parameters.
    pub search: S,
    /// Client-side filter.
    pub filter: F,
    /// Zero-based output page number.
    pub page: u64,
    /// Items per output page (must be non-zero).
    pub page_size: u64,
}

impl<S, F> FilteredPagedRequest<S, F> {
    #[inline]
    pub fn new(search: S, filter: F, page: u64, page_size: u64) -> Self {
        Self {
            search,
            filter,
            page,
            page_size,
        }
    }
}

impl<S: Clone, F: Clone> FilteredPagedRequest<S, F> {
    /// Returns the same request pointed at another output page.
    #[inline]
    pub fn at_page(&self, page: u64) -> Self {
        Self::new(self.search.clone(), self.filter.clone(), page, self.page_size)
    }

    /// Returns the unfiltered backend request for `backend_page`.
    #[inline]
    pub fn backend_request(&self, backend_page: u64, fetch_size: u64) -> PagedRequest<S> {
        PagedRequest::new(self.search.clone(), backend_page, fetch_size)
    }
}

/// One backend fetch addressed by continuation token.
///
/// A `None` cursor means "from the start".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IterativeRequest<S, C> {
    pub search: S,
    pub cursor: Option<C>,
    pub page_size: u64,
}

impl<S, C> IterativeRequest<S, C> {
    #[inline]
    pub fn new(search: S, cursor: Option<C>, page_size: u64) -> Self {
        Self {
            search,
            cursor,
            page_size,
        }
    }

    /// Request for the first backend page.
    #[inline]
    pub fn first(search: S, page_size: u64) -> Self {
        Self::new(search, None, page_size)
    }
}
