use std::hash::Hash;

use tracing::{debug, instrument};

use crate::backend::{BackendResult, PageFinder, Predicate};
use crate::cache::BoundedCache;
use crate::fetcher::PageFetcher;
use crate::types::{Checkpoint, FilteredPagedRequest, PageResult, PagedRequest, Position};

/// Maps a filtered output page to the backend position where it starts.
pub struct PositionResolver<S, F> {
    checkpoints: Option<BoundedCache<FilteredPagedRequest<S, F>, Position>>,
}

impl<S, F> PositionResolver<S, F>
where
    S: Clone + Hash + Eq + Send + Sync + 'static,
    F: Clone + Hash + Eq + Send + Sync + 'static,
{
    pub fn uncached() -> Self {
        Self { checkpoints: None }
    }

    pub fn cached(checkpoints: BoundedCache<FilteredPagedRequest<S, F>, Position>) -> Self {
        Self {
            checkpoints: Some(checkpoints),
        }
    }

    /// The checkpoint cache, if caching is enabled.
    #[inline]
    pub fn checkpoints(&self) -> Option<&BoundedCache<FilteredPagedRequest<S, F>, Position>> {
        self.checkpoints.as_ref()
    }

    /// Returns the position at which output page `request.page` starts, or
    /// `None` if the filtered data ends before that page.
    ///
    /// Backend pages are fetched with `fetch_size` items each. `request.page_size`
    /// must be non-zero.
    #[instrument(skip_all, fields(page = request.page, page_size = request.page_size))]
    pub async fn resolve<B, T, P>(
        &self,
        fetcher: &PageFetcher<B, PagedRequest<S>, PageResult<T>>,
        predicate: &P,
        request: &FilteredPagedRequest<S, F>,
        fetch_size: u64,
    ) -> BackendResult<Option<Position>>
    where
        B: PageFinder<S, T>,
        T: Send + Sync + 'static,
        P: Predicate<T, F>,
    {
        if request.page == 0 {
            return Ok(Some(Position::START));
        }

        let start = match &self.checkpoints {
            None => Checkpoint::start(),
            Some(checkpoints) => {
                if let Some(position) = checkpoints.get(request).await {
                    debug!(?position, "checkpoint hit");
                    return Ok(Some(position));
                }
                Self::nearest_checkpoint(checkpoints, request).await
            }
        };

        self.scan(fetcher, predicate, request, fetch_size, start)
            .await
    }

    /// Probes the checkpoint cache from `request.page - 1` down to page 1.
    async fn nearest_checkpoint(
        checkpoints: &BoundedCache<FilteredPagedRequest<S, F>, Position>,
        request: &FilteredPagedRequest<S, F>,
    ) -> Checkpoint<Position> {
        for page in (1..request.page).rev() {
            if let Some(position) = checkpoints.get(&request.at_page(page)).await {
                debug!(from_page = page, ?position, "resuming from checkpoint");
                return Checkpoint::new(page, position);
            }
        }
        Checkpoint::start()
    }

    async fn scan<B, T, P>(
        &self,
        fetcher: &PageFetcher<B, PagedRequest<S>, PageResult<T>>,
        predicate: &P,
        request: &FilteredPagedRequest<S, F>,
        fetch_size: u64,
        start: Checkpoint<Position>,
    ) -> BackendResult<Option<Position>>
    where
        B: PageFinder<S, T>,
        T: Send + Sync + 'static,
        P: Predicate<T, F>,
    {
        let page_size = request.page_size;
        let mut output_page = start.output_page;
        let mut position = start.position;
        let mut backend_page = position.backend_page;
        // Items before the checkpoint offset belong to the previous output page.
        let mut skip = position.item_offset;
        // Matches collected toward the next unfinished output page.
        let mut carry: u64 = 0;

        while output_page < request.page {
            let fetched = fetcher
                .fetch(&request.backend_request(backend_page, fetch_size))
                .await?;
            if fetched.items.is_empty() {
                debug!(backend_page, output_page, "backend exhausted before requested page");
                return Ok(None);
            }

            let matches: Vec<usize> = fetched
                .items
                .iter()
                .enumerate()
                .skip(skip)
                .filter(|(_, item)| predicate.test(*item, &request.filter))
                .map(|(index, _)| index)
                .collect();
            skip = 0;

            let carried = carry;
            carry += matches.len() as u64;

            if carry >= page_size {
                // Only the last boundary crossed in this fetch is recorded; never
                // step past the requested page.
                let advance = (carry / page_size).min(request.page - output_page);
                // Index into this fetch's matches of the first item of the new
                // output page. An exact fill starts it on the next backend page.
                let first_match = (advance * page_size - carried) as usize;
                position = match matches.get(first_match) {
                    Some(&offset) => Position::new(backend_page, offset),
                    None => Position::new(backend_page, 0).next_page(),
                };
                output_page += advance;
                carry %= page_size;

                if let Some(checkpoints) = &self.checkpoints {
                    checkpoints
                        .insert(request.at_page(output_page), position)
                        .await;
                }
            }

            backend_page += 1;
        }

        Ok(Some(position))
    }
}

impl<S, F> std::fmt::Debug for PositionResolver<S, F>
where
    S: Hash + Eq + Send + Sync + 'static,
    F: Hash + Eq + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PositionResolver")
            .field("checkpoints", &self.checkpoints)
            .finish()
    }
}
