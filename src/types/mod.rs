//! Request, result and position types shared by the adapters.
//!
//! Requests double as cache keys, so every search/filter/cursor type parameter
//! is expected to be an immutable value with `Eq + Hash`.

pub mod position;
pub mod request;
pub mod result;


pub use position::{Checkpoint, CursorPosition, Position};
pub use request::{FilteredPagedRequest, IterativeRequest, PagedRequest};
pub use result::{IterativeResult, PageResult};
