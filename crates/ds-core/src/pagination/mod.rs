//! Page-at-a-time access to dataset rows

use serde::{Serialize, Deserialize};
use thiserror::Error;

mod pager;

pub use pager::Pager;

/// Rows shown per page when nothing else is configured
pub const DEFAULT_ROWS_PER_PAGE: usize = 100;

/// A half-open row range `[start, end)` for one page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    pub start: usize,
    pub end: usize,
}

impl PageWindow {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Errors from moving between pages
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("Page {requested} out of bounds (pages: {total})")]
    OutOfBounds { requested: isize, total: usize },

    #[error("Rows per page must be at least 1")]
    ZeroPageSize,
}
