use std::hash::Hash;

use tracing::{debug, instrument, warn};

use super::{CHECKPOINT_CACHE_NAME, RESULT_CACHE_NAME};
use crate::backend::{BackendResult, CursorFinder};
use crate::cache::BoundedCache;
use crate::config::{CacheConfig, ConfigError};
use crate::fetcher::PageFetcher;
use crate::resolver::CursorResolver;
use crate::types::{IterativeRequest, IterativeResult, PageResult, PagedRequest};

/// Serves numbered pages from a backend that only supports iterative
/// (continuation-token) searching.
///
/// Each output page is exactly one backend page; no client-side filtering
/// happens here.
pub struct CursorAdapter<B, S, T, C> {
    fetcher: PageFetcher<B, IterativeRequest<S, C>, IterativeResult<T, C>>,
    resolver: CursorResolver<S, C>,
}

impl<B, S, T, C> CursorAdapter<B, S, T, C>
where
    B: CursorFinder<S, T, C>,
    S: Clone + Hash + Eq + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
    C: Clone + Hash + Eq + Send + Sync + 'static,
{
    /// Creates an adapter without caches.
    pub fn new(backend: B) -> Self {
        Self {
            fetcher: PageFetcher::uncached(backend),
            resolver: CursorResolver::uncached(),
        }
    }

    /// Creates an adapter with result and cursor-checkpoint caches.
    pub fn with_cache(backend: B, cache: CacheConfig) -> Result<Self, ConfigError> {
        cache.validate()?;
        Ok(Self {
            fetcher: PageFetcher::cached(
                backend,
                BoundedCache::with_ttl(
                    RESULT_CACHE_NAME,
                    cache.result_cache_max_entries,
                    cache.entry_ttl,
                ),
            ),
            resolver: CursorResolver::cached(BoundedCache::with_ttl(
                CHECKPOINT_CACHE_NAME,
                cache.checkpoint_cache_max_entries,
                cache.entry_ttl,
            )),
        })
    }

    /// Returns output page `request.page`, or an empty page past the end.
    #[instrument(skip_all, fields(page = request.page, page_size = request.page_size))]
    pub async fn find_and_filter(&self, request: &PagedRequest<S>) -> BackendResult<PageResult<T>> {
        if request.page_size == 0 {
            warn!("page size 0 requested, returning an empty page");
            return Ok(PageResult::empty(request.page, request.page_size));
        }

        let Some(position) = self.resolver.resolve(&self.fetcher, request).await? else {
            debug!("requested page lies beyond the backend data");
            return Ok(PageResult::empty(request.page, request.page_size));
        };

        let fetched = self
            .fetcher
            .fetch(&IterativeRequest::new(
                request.search.clone(),
                position.into_cursor(),
                request.page_size,
            ))
            .await?;

        Ok(PageResult::new(
            fetched.items.clone(),
            request.page,
            request.page_size,
        ))
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
    pub fn fetcher(&self) -> &PageFetcher<B, IterativeRequest<S, C>, IterativeResult<T, C>> {
        &self.fetcher
    }

    #[inline]
    pub fn resolver(&self) -> &CursorResolver<S, C> {
        &self.resolver
    }
}

impl<B, S, T, C> std::fmt::Debug for CursorAdapter<B, S, T, C>
where
    S: Hash + Eq + Send + Sync + 'static,
    T: Send + Sync + 'static,
    C: Clone + Hash + Eq + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CursorAdapter")
            .field("fetcher", &self.fetcher)
            .field("resolver", &self.resolver)
            .finish()
    }
}
