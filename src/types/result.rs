use std::fmt;

use serde::{Deserialize, Serialize};

/// One page of items, tagged with the page it answers.
///
/// An empty `items` vector is the end-of-data sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub page_size: u64,
}

impl<T> PageResult<T> {
    #[inline]
    pub fn new(items: Vec<T>, page: u64, page_size: u64) -> Self {
        Self {
            items,
            page,
            page_size,
        }
    }

    /// An empty page (no data at or beyond `page`).
    #[inline]
    pub fn empty(page: u64, page_size: u64) -> Self {
        Self::new(Vec::new(), page, page_size)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T: fmt::Display> fmt::Display for PageResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PageResult:")?;
        writeln!(f, "-- Page:      {}", self.page)?;
        writeln!(f, "-- PageSize:  {}", self.page_size)?;
        for item in &self.items {
            writeln!(f, "-- {item}")?;
        }
        Ok(())
    }
}

/// One page of an iterative (cursor-based) search.
///
/// `next_cursor == None` signals end-of-data even when `items` is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IterativeResult<T, C> {
    pub items: Vec<T>,
    pub next_cursor: Option<C>,
    pub page_size: u64,
}

impl<T, C> IterativeResult<T, C> {
    #[inline]
    pub fn new(items: Vec<T>, next_cursor: Option<C>, page_size: u64) -> Self {
        Self {
            items,
            next_cursor,
            page_size,
        }
    }

    /// Returns the cursor of the following page, or `None` when this page
    /// ends the data (no items or no continuation token).
    #[inline]
    pub fn continuation(&self) -> Option<&C> {
        if self.items.is_empty() {
            None
        } else {
            self.next_cursor.as_ref()
        }
    }
}

impl<T: fmt::Display, C: fmt::Debug> fmt::Display for IterativeResult<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "IterativeResult:")?;
        writeln!(f, "-- Cursor:    {:?}", self.next_cursor)?;
        writeln!(f, "-- PageSize:  {}", self.page_size)?;
        for item in &self.items {
            writeln!(f, "-- {item}")?;
        }
        Ok(())
    }
}
