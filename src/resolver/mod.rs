//! Output-page → backend-position resolution.
//!
//! Both resolvers walk the backend forward from the closest known checkpoint
//! below the requested output page and record the checkpoints they pass. The
//! checkpoint cache is read and written with plain get/insert (never from
//! inside a compute callback); two resolvers racing over the same pages may
//! store the same checkpoint twice, which is harmless because a checkpoint is
//! a pure function of its key.

pub mod cursor;
pub mod paged;


pub use cursor::CursorResolver;
pub use paged::PositionResolver;
