//! Backend calls, deduplicated through the result cache.


use std::hash::Hash;
use std::marker::PhantomData;
use std::sync::Arc;

use tracing::trace;

use crate::backend::{BackendResult, Finder};
use crate::cache::BoundedCache;

/// Wraps a [`Finder`] and, when caching is enabled, the cache of its answers.
pub struct PageFetcher<B, Req, Res> {
    backend: B,
    results: Option<BoundedCache<Req, Arc<Res>>>,
    _marker: PhantomData<fn(Req) -> Res>,
}

impl<B, Req, Res> PageFetcher<B, Req, Res>
where
    B: Finder<Req, Res>,
    Req: Clone + Hash + Eq + Send + Sync + 'static,
    Res: Send + Sync + 'static,
{
    /// Creates a fetcher that always calls the backend.
    pub fn uncached(backend: B) -> Self {
        Self {
            backend,
            results: None,
            _marker: PhantomData,
        }
    }

    /// Creates a fetcher that answers repeated requests from `results`.
    pub fn cached(backend: B, results: BoundedCache<Req, Arc<Res>>) -> Self {
        Self {
            backend,
            results: Some(results),
            _marker: PhantomData,
        }
    }

    /// Fetches one backend page.
    ///
    /// With a result cache, concurrent fetches of the same request share one
    /// backend call. Backend errors are returned unchanged and not cached.
    pub async fn fetch(&self, request: &Req) -> BackendResult<Arc<Res>> {
        let Some(results) = &self.results else {
            return self.backend.find(request).await.map(Arc::new);
        };

        results
            .try_get_with(request.clone(), async {
                trace!(cache = results.name(), "result cache miss");
                self.backend.find(request).await.map(Arc::new)
            })
            .await
            .map_err(Arc::unwrap_or_clone)
    }

    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[inline]
    pub fn is_cached(&self) -> bool {
        self.results.is_some()
    }

    /// The result cache, if caching is enabled.
    #[inline]
    pub fn results(&self) -> Option<&BoundedCache<Req, Arc<Res>>> {
        self.results.as_ref()
    }
}

impl<B, Req, Res> std::fmt::Debug for PageFetcher<B, Req, Res>
where
    Req: Hash + Eq + Send + Sync + 'static,
    Res: Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageFetcher")
            .field("results", &self.results)
            .finish_non_exhaustive()
    }
}
