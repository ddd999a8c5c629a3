//! Bounded caches backing the adapters.

pub mod bounded;


pub use bounded::BoundedCache;
