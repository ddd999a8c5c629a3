use serde::{Deserialize, Serialize};

/// A point in unfiltered backend order: the backend page plus the index of the
/// first item (within that page) that belongs to the next output page.
///
/// "No such output page" is expressed as `Option::<Position>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub backend_page: u64,
    pub item_offset: usize,
}

impl Position {
    /// The backend start; output page 0 always begins here.
    pub const START: Position = Position {
        backend_page: 0,
        item_offset: 0,
    };

    #[inline]
    pub const fn new(backend_page: u64, item_offset: usize) -> Self {
        Self {
            backend_page,
            item_offset,
        }
    }

    /// Start of the backend page after this one.
    #[inline]
    pub const fn next_page(&self) -> Self {
        Self::new(self.backend_page + 1, 0)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

/// A resolved output page together with the backend position needed to
/// produce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkpoint<P> {
    pub output_page: u64,
    pub position: P,
}

impl<P> Checkpoint<P> {
    #[inline]
    pub fn new(output_page: u64, position: P) -> Self {
        Self {
            output_page,
            position,
        }
    }
}

impl Checkpoint<Position> {
    /// Output page 0 at the backend start.
    #[inline]
    pub fn start() -> Self {
        Self::new(0, Position::START)
    }
}

impl<C> Checkpoint<Option<C>> {
    /// Output page 0, fetched without a cursor.
    #[inline]
    pub fn first() -> Self {
        Self::new(0, None)
    }
}

/// The backend cursor that yields a given output page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CursorPosition<C> {
    /// The first page: fetch without a cursor.
    Start,
    /// Fetch with this continuation token.
    After(C),
}

impl<C> CursorPosition<C> {
    #[inline]
    pub fn into_cursor(self) -> Option<C> {
        match self {
            CursorPosition::Start => None,
            CursorPosition::After(cursor) => Some(cursor),
        }
    }

    #[inline]
    pub fn is_start(&self) -> bool {
        matches!(self, CursorPosition::Start)
    }
}

impl<C> From<Option<C>> for CursorPosition<C> {
    fn from(cursor: Option<C>) -> Self {
        match cursor {
            None => CursorPosition::Start,
            Some(cursor) => CursorPosition::After(cursor),
        }
    }
}
