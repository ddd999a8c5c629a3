use std::hash::Hash;

use tracing::{debug, instrument, warn};

use super::{CHECKPOINT_CACHE_NAME, RESULT_CACHE_NAME};
use crate::backend::{BackendResult, PageFinder, Predicate};
use crate::cache::BoundedCache;
use crate::config::{AdapterConfig, CacheConfig, ConfigError};
use crate::fetcher::PageFetcher;
use crate::resolver::PositionResolver;
use crate::types::{FilteredPagedRequest, PageResult, PagedRequest};

/// Serves filtered, page-addressable results from a paged backend that cannot
/// evaluate the filter itself.
///
/// Output page `P` of size `S` holds matches `[P*S, P*S + S)` of the filtered
/// backend sequence. Enabling caching is strongly recommended: without it every
/// request rescans the backend from the first page.
///
/// # Type parameters
/// - `B`: the backend ([`PageFinder`])
/// - `P`: the filter predicate
/// - `S`: backend search parameters
/// - `T`: item type
/// - `F`: filter type
pub struct FilterAdapter<B, P, S, T, F> {
    fetcher: PageFetcher<B, PagedRequest<S>, PageResult<T>>,
    predicate: P,
    resolver: PositionResolver<S, F>,
    backend_page_size: Option<u64>,
}

impl<B, P, S, T, F> FilterAdapter<B, P, S, T, F>
where
    B: PageFinder<S, T>,
    P: Predicate<T, F>,
    S: Clone + Hash + Eq + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
    F: Clone + Hash + Eq + Send + Sync + 'static,
{
    /// Creates an adapter without caches.
    pub fn new(backend: B, predicate: P) -> Self {
        Self {
            fetcher: PageFetcher::uncached(backend),
            predicate,
            resolver: PositionResolver::uncached(),
            backend_page_size: None,
        }
    }

    /// Creates an adapter with result and checkpoint caches.
    pub fn with_cache(backend: B, predicate: P, cache: CacheConfig) -> Result<Self, ConfigError> {
        Self::with_config(backend, predicate, AdapterConfig::default().with_cache(cache))
    }

    /// Creates an adapter from a full [`AdapterConfig`].
    pub fn with_config(backend: B, predicate: P, config: AdapterConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let (fetcher, resolver) = match config.cache {
            None => (PageFetcher::uncached(backend), PositionResolver::uncached()),
            Some(cache) => (
                PageFetcher::cached(
                    backend,
                    BoundedCache::with_ttl(
                        RESULT_CACHE_NAME,
                        cache.result_cache_max_entries,
                        cache.entry_ttl,
                    ),
                ),
                PositionResolver::cached(BoundedCache::with_ttl(
                    CHECKPOINT_CACHE_NAME,
                    cache.checkpoint_cache_max_entries,
                    cache.entry_ttl,
                )),
            ),
        };

        Ok(Self {
            fetcher,
            predicate,
            resolver,
            backend_page_size: config.backend_page_size,
        })
    }

    /// Returns one filtered output page.
    ///
    /// Pages beyond the filtered data come back empty. Backend errors are
    /// returned unchanged.
    #[instrument(skip_all, fields(page = request.page, page_size = request.page_size))]
    pub async fn find_and_filter(
        &self,
        request: &FilteredPagedRequest<S, F>,
    ) -> BackendResult<PageResult<T>> {
        if request.page_size == 0 {
            warn!("page size 0 requested, returning an empty page");
            return Ok(PageResult::empty(request.page, request.page_size));
        }

        let fetch_size = self.fetch_size(request);
        let Some(mut position) = self
            .resolver
            .resolve(&self.fetcher, &self.predicate, request, fetch_size)
            .await?
        else {
            debug!("requested page lies beyond the filtered data");
            return Ok(PageResult::empty(request.page, request.page_size));
        };

        let wanted = usize::try_from(request.page_size).unwrap_or(usize::MAX);
        let mut items: Vec<T> = Vec::new();

        while items.len() < wanted {
            let fetched = self
                .fetcher
                .fetch(&request.backend_request(position.backend_page, fetch_size))
                .await?;
            if fetched.items.is_empty() {
                debug!(backend_page = position.backend_page, "backend exhausted, short page");
                break;
            }

            items.extend(
                fetched
                    .items
                    .iter()
                    .skip(position.item_offset)
                    .filter(|item| self.predicate.test(*item, &request.filter))
                    .cloned(),
            );
            position = position.next_page();
        }

        items.truncate(wanted);
        Ok(PageResult::new(items, request.page, request.page_size))
    }

    /// Backend page size used for `request`.
    #[inline]
    pub fn fetch_size(&self, request: &FilteredPagedRequest<S, F>) -> u64 {
        self.backend_page_size.unwrap_or(request.page_size)
    }

    #[inline]
    pub fn backend(&self) -> &B {
        self.fetcher.backend()
    }

    #[inline]
    pub fn is_cached(&self) -> bool {
        self.fetcher.is_cached()
    }

    #[inline]
    pub fn fetcher(&self) -> &PageFetcher<B, PagedRequest<S>, PageResult<T>> {
        &self.fetcher
    }

    #[inline]
    pub fn resolver(&self) -> &PositionResolver<S, F> {
        &self.resolver
    }
}

impl<B, P, S, T, F> std::fmt::Debug for FilterAdapter<B, P, S, T, F>
where
    S: Hash + Eq + Send + Sync + 'static,
    T: Send + Sync + 'static,
    F: Hash + Eq + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterAdapter")
            .field("fetcher", &self.fetcher)
            .field("resolver", &self.resolver)
            .field("backend_page_size", &self.backend_page_size)
            .finish_non_exhaustive()
    }
}
