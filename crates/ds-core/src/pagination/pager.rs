//! Pager state for the row grid

use serde::{Serialize, Deserialize};

use super::{PageError, PageWindow, DEFAULT_ROWS_PER_PAGE};
use crate::dataset::{Dataset, Record};

/// Current page over a dataset's rows.
///
/// Pages are numbered from 1. Loading a new dataset resets to the first page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pager {
    current_page: usize,
    rows_per_page: usize,
    total_rows: usize,
}

impl Pager {
    /// Create a pager with the given page size
    pub fn new(rows_per_page: usize) -> Result<Self, PageError> {
        if rows_per_page == 0 {
            return Err(PageError::ZeroPageSize);
        }
        Ok(Self {
            current_page: 1,
            rows_per_page,
            total_rows: 0,
        })
    }

    /// Point the pager at a dataset of `total_rows` rows and go back to page 1
    pub fn reset(&mut self, total_rows: usize) {
        self.total_rows = total_rows;
        self.current_page = 1;
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// Number of pages, zero for an empty dataset
    pub fn total_pages(&self) -> usize {
        self.total_rows.div_ceil(self.rows_per_page)
    }

    /// Number of pages as shown to the user (never less than 1)
    pub fn display_total_pages(&self) -> usize {
        self.total_pages().max(1)
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Move by `delta` pages.
    ///
    /// The page is left unchanged when the target falls outside `1..=total_pages`.
    pub fn change_page(&mut self, delta: isize) -> Result<usize, PageError> {
        let target = self.current_page as isize + delta;
        if target < 1 || target as usize > self.total_pages() {
            return Err(PageError::OutOfBounds {
                requested: target,
                total: self.total_pages(),
            });
        }
        self.current_page = target as usize;
        Ok(self.current_page)
    }

    /// Jump to a page number
    pub fn seek_to(&mut self, page: usize) -> Result<usize, PageError> {
        let delta = page as isize - self.current_page as isize;
        self.change_page(delta)
    }

    /// Row range of the current page
    pub fn window(&self) -> PageWindow {
        let start = ((self.current_page - 1) * self.rows_per_page).min(self.total_rows);
        let end = (start + self.rows_per_page).min(self.total_rows);
        PageWindow { start, end }
    }

    /// Records on the current page
    pub fn page_rows<'a>(&self, dataset: &'a Dataset) -> &'a [Record] {
        let window = self.window();
        let records = dataset.records();
        let end = window.end.min(records.len());
        let start = window.start.min(end);
        &records[start..end]
    }

    /// "Page X of Y" label
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.current_page, self.display_total_pages())
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self {
            current_page: 1,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            total_rows: 0,
        }
    }
}
