//! Page-addressable adapters over paged and cursor-based backends.
//!
//! [`FilterAdapter`] adds a client-side filter to a backend with random page
//! access; [`CursorAdapter`] adds page numbers to a backend that only offers
//! continuation tokens.

pub mod cursor;
pub mod filter;


pub use cursor::CursorAdapter;
pub use filter::FilterAdapter;

/// Name of the backend result cache (shows up in cache diagnostics).
pub const RESULT_CACHE_NAME: &str = "search_results";
/// Name of the output-page checkpoint cache.
pub const CHECKPOINT_CACHE_NAME: &str = "page_checkpoints";
