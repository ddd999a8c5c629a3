//! Page-addressable searching over backends that cannot do it themselves.
//!
//! # Public API Surface
//!
//! ## Adapters
//! - [`FilterAdapter`] - client-side filtering on top of a paged backend,
//!   served as fixed-size output pages
//! - [`CursorAdapter`] - numbered pages on top of a cursor-based backend
//!
//! ## Building Blocks
//! - [`PageFetcher`] - backend calls through an optional result cache
//! - [`PositionResolver`], [`CursorResolver`] - output page to backend
//!   position mapping with checkpoint caching
//! - [`BoundedCache`] - size-bounded, TTL-expiring async cache
//!
//! ## Backend Seam
//! - [`Finder`], [`PageFinder`], [`CursorFinder`] - what a backend implements
//! - [`Predicate`] - the client-side filter test
//! - [`BackendError`] - failures passed through to callers unchanged
//!
//! ## Test/Mock Support
//! In-memory backends are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod adapter;
pub mod backend;
pub mod cache;
pub mod config;
pub mod fetcher;
pub mod resolver;
pub mod types;

pub use adapter::{CHECKPOINT_CACHE_NAME, CursorAdapter, FilterAdapter, RESULT_CACHE_NAME};
pub use backend::{BackendError, BackendResult, CursorFinder, Finder, PageFinder, Predicate};
#[cfg(any(test, feature = "mock"))]
pub use backend::{MockCursorBackend, MockPagedBackend};
pub use cache::BoundedCache;
pub use config::{AdapterConfig, CacheConfig, ConfigError, DEFAULT_ENTRY_TTL};
pub use fetcher::PageFetcher;
pub use resolver::{CursorResolver, PositionResolver};
pub use types::{
    Checkpoint, CursorPosition, FilteredPagedRequest, IterativeRequest, IterativeResult,
    PageResult, PagedRequest, Position,
};
