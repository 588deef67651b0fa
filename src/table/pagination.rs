//! Page window over the filtered and sorted rows.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// Allowed page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowsPerPage {
    #[default]
    Five,
    Ten,
    TwentyFive,
}

impl RowsPerPage {
    pub fn all() -> &'static [RowsPerPage] {
        &[RowsPerPage::Five, RowsPerPage::Ten, RowsPerPage::TwentyFive]
    }

    pub fn get(self) -> usize {
        match self {
            RowsPerPage::Five => 5,
            RowsPerPage::Ten => 10,
            RowsPerPage::TwentyFive => 25,
        }
    }

    /// Returns the next size, wrapping around.
    pub fn next(self) -> RowsPerPage {
        match self {
            RowsPerPage::Five => RowsPerPage::Ten,
            RowsPerPage::Ten => RowsPerPage::TwentyFive,
            RowsPerPage::TwentyFive => RowsPerPage::Five,
        }
    }
}

impl fmt::Display for RowsPerPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

impl FromStr for RowsPerPage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "5" => Ok(RowsPerPage::Five),
            "10" => Ok(RowsPerPage::Ten),
            "25" => Ok(RowsPerPage::TwentyFive),
            other => Err(format!("rows per page must be 5, 10 or 25, got '{}'", other)),
        }
    }
}

/// Zero-based page and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pagination {
    pub page: usize,
    pub rows_per_page: RowsPerPage,
}

impl Pagination {
    pub fn new(rows_per_page: RowsPerPage) -> Self {
        Self {
            page: 0,
            rows_per_page,
        }
    }

    /// Changing the page size always returns to the first page.
    pub fn set_rows_per_page(&mut self, rows_per_page: RowsPerPage) {
        self.rows_per_page = rows_per_page;
        self.page = 0;
    }

    /// Index range of the visible rows. Empty when the page lies past the end.
    pub fn window(&self, len: usize) -> Range<usize> {
        let size = self.rows_per_page.get();
        let start = self.page.saturating_mul(size).min(len);
        let end = start.saturating_add(size).min(len);
        start..end
    }

    /// Slices the page out of `rows`.
    pub fn slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        &rows[self.window(rows.len())]
    }

    /// Number of pages, at least one.
    pub fn page_count(&self, len: usize) -> usize {
        len.div_ceil(self.rows_per_page.get()).max(1)
    }

    pub fn next_page(&mut self, len: usize) {
        if self.page + 1 < self.page_count(len) {
            self.page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }
}
