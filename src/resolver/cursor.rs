use std::hash::Hash;

use tracing::{debug, instrument};

use crate::backend::{BackendResult, CursorFinder};
use crate::cache::BoundedCache;
use crate::fetcher::PageFetcher;
use crate::types::{Checkpoint, CursorPosition, IterativeRequest, IterativeResult, PagedRequest};

/// Maps an output page number to the continuation token that fetches it.
///
/// Each backend fetch yields exactly one output page, so resolving page `n`
/// from scratch costs `n` fetches.
pub struct CursorResolver<S, C> {
    checkpoints: Option<BoundedCache<PagedRequest<S>, C>>,
}

impl<S, C> CursorResolver<S, C>
where
    S: Clone + Hash + Eq + Send + Sync + 'static,
    C: Clone + Hash + Eq + Send + Sync + 'static,
{
    pub fn uncached() -> Self {
        Self { checkpoints: None }
    }

    pub fn cached(checkpoints: BoundedCache<PagedRequest<S>, C>) -> Self {
        Self {
            checkpoints: Some(checkpoints),
        }
    }

    #[inline]
    pub fn checkpoints(&self) -> Option<&BoundedCache<PagedRequest<S>, C>> {
        self.checkpoints.as_ref()
    }

    /// Returns the cursor position of output page `request.page`, or `None`
    /// if the backend runs out of data before that page.
    #[instrument(skip_all, fields(page = request.page, page_size = request.page_size))]
    pub async fn resolve<B, T>(
        &self,
        fetcher: &PageFetcher<B, IterativeRequest<S, C>, IterativeResult<T, C>>,
        request: &PagedRequest<S>,
    ) -> BackendResult<Option<CursorPosition<C>>>
    where
        B: CursorFinder<S, T, C>,
        T: Send + Sync + 'static,
    {
        if request.page == 0 {
            return Ok(Some(CursorPosition::Start));
        }

        let start = match &self.checkpoints {
            None => Checkpoint::first(),
            Some(checkpoints) => {
                if let Some(cursor) = checkpoints.get(request).await {
                    debug!("cursor checkpoint hit");
                    return Ok(Some(CursorPosition::After(cursor)));
                }
                Self::nearest_checkpoint(checkpoints, request).await
            }
        };

        let mut output_page = start.output_page;
        let mut cursor = start.position;

        while output_page < request.page {
            let fetched = fetcher
                .fetch(&IterativeRequest::new(
                    request.search.clone(),
                    cursor.clone(),
                    request.page_size,
                ))
                .await?;

            let Some(next) = fetched.continuation() else {
                debug!(output_page, "backend exhausted before requested page");
                return Ok(None);
            };

            output_page += 1;
            if let Some(checkpoints) = &self.checkpoints {
                checkpoints
                    .insert(request.at_page(output_page), next.clone())
                    .await;
            }
            cursor = Some(next.clone());
        }

        Ok(Some(CursorPosition::from(cursor)))
    }

    async fn nearest_checkpoint(
        checkpoints: &BoundedCache<PagedRequest<S>, C>,
        request: &PagedRequest<S>,
    ) -> Checkpoint<Option<C>> {
        for page in (1..request.page).rev() {
            if let Some(cursor) = checkpoints.get(&request.at_page(page)).await {
                debug!(from_page = page, "resuming from cursor checkpoint");
                return Checkpoint::new(page, Some(cursor));
            }
        }
        Checkpoint::first()
    }
}

impl<S, C> std::fmt::Debug for CursorResolver<S, C>
where
    S: Hash + Eq + Send + Sync + 'static,
    C: Clone + Hash + Eq + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CursorResolver")
            .field("checkpoints", &self.checkpoints)
            .finish()
    }
}
