//! Backend and predicate seams.
//!
//! An embedder plugs its search service in by implementing [`Finder`] for
//! either [`PagedRequest`] (random page access) or [`IterativeRequest`]
//! (continuation tokens), and supplies the filter it cannot push down as a
//! [`Predicate`].

pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use error::{BackendError, BackendResult};
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockCursorBackend, MockPagedBackend};

use std::sync::Arc;

use crate::types::{IterativeRequest, IterativeResult, PageResult, PagedRequest};

/// A single backend call: one request in, one page out.
///
/// For a fixed request the backend must answer with the same page every time
/// while a scan is in progress; the caches depend on it.
pub trait Finder<Req, Res>: Send + Sync {
    fn find(&self, request: &Req) -> impl Future<Output = BackendResult<Res>> + Send;
}

impl<Req, Res, B> Finder<Req, Res> for Arc<B>
where
    B: Finder<Req, Res>,
{
    fn find(&self, request: &Req) -> impl Future<Output = BackendResult<Res>> + Send {
        (**self).find(request)
    }
}

/// A backend addressed by page number. Empty `items` ends the data.
pub trait PageFinder<S, T>: Finder<PagedRequest<S>, PageResult<T>> {}

impl<S, T, B> PageFinder<S, T> for B where B: Finder<PagedRequest<S>, PageResult<T>> {}

/// A backend addressed by continuation token. Empty `items` or a missing next
/// cursor ends the data.
pub trait CursorFinder<S, T, C>: Finder<IterativeRequest<S, C>, IterativeResult<T, C>> {}

impl<S, T, C, B> CursorFinder<S, T, C> for B where
    B: Finder<IterativeRequest<S, C>, IterativeResult<T, C>>
{
}

/// Client-side filter the backend cannot evaluate.
///
/// Must be pure: for a fixed `(item, filter)` pair the answer never changes.
pub trait Predicate<T, F>: Send + Sync {
    fn test(&self, item: &T, filter: &F) -> bool;
}

impl<T, F, P> Predicate<T, F> for P
where
    P: Fn(&T, &F) -> bool + Send + Sync,
{
    #[inline]
    fn test(&self, item: &T, filter: &F) -> bool {
        self(item, filter)
    }
}
