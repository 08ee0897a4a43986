//! Pagination types
//!
//! Defines the page size and the page pointer state machine.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;

/// Number of records shown per page unless configured otherwise
pub const RECORDS_PER_PAGE: usize = 5;

const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(RECORDS_PER_PAGE) {
    Some(size) => size,
    None => panic!("RECORDS_PER_PAGE must be non-zero"),
};

/// Compute the number of pages for a dataset of `len` records
///
/// Always at least 1, so an empty dataset still has a single (empty) page.
pub fn total_pages(len: usize, page_size: PageSize) -> usize {
    len.div_ceil(page_size.get()).max(1)
}

// ============================================================================
// PageSize
// ============================================================================

/// Number of records per page, guaranteed non-zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    /// Create a page size, rejecting zero
    pub fn new(size: usize) -> Result<Self> {
        NonZeroUsize::new(size)
            .map(Self)
            .ok_or_else(|| Error::invalid_value("page_size", "must be greater than zero"))
    }

    /// Get the page size as a plain integer
    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(DEFAULT_PAGE_SIZE)
    }
}

impl TryFrom<usize> for PageSize {
    type Error = Error;

    fn try_from(size: usize) -> Result<Self> {
        Self::new(size)
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> Self {
        size.get()
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// PaginationState
// ============================================================================

/// Tracks the current page of a dataset
///
/// Invariant: `1 <= current_page() <= total_pages()` at every observable
/// point. `total_pages` is derived from the dataset length on every read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    page_size: PageSize,
    current_page: usize,
    dataset_len: usize,
}

impl PaginationState {
    /// Create state for an empty dataset, positioned on page 1
    pub fn new(page_size: PageSize) -> Self {
        Self::with_len(page_size, 0)
    }

    /// Create state for a dataset of `len` records, positioned on page 1
    pub fn with_len(page_size: PageSize, len: usize) -> Self {
        Self {
            page_size,
            current_page: 1,
            dataset_len: len,
        }
    }

    /// Configured page size
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Current 1-indexed page
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Length of the dataset being paginated
    pub fn dataset_len(&self) -> usize {
        self.dataset_len
    }

    /// Number of pages for the current dataset length
    pub fn total_pages(&self) -> usize {
        self.derive(self.dataset_len)
    }

    /// Number of pages a dataset of `len` records would have
    pub fn derive(&self, len: usize) -> usize {
        total_pages(len, self.page_size)
    }

    /// Whether a previous page exists
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Whether a next page exists
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Move to the previous page; no-op on page 1
    pub fn go_to_previous(&mut self) -> usize {
        if self.current_page > 1 {
            self.current_page -= 1;
        }
        self.current_page
    }

    /// Move to the next page; no-op on the last page
    pub fn go_to_next(&mut self) -> usize {
        self.go_to_next_within(self.total_pages())
    }

    /// Move to the next page unless already at `total_pages`
    ///
    /// A bound larger than the dataset allows is capped at `total_pages()`.
    pub fn go_to_next_within(&mut self, total_pages: usize) -> usize {
        if self.current_page < total_pages.min(self.total_pages()) {
            self.current_page += 1;
        }
        self.current_page
    }

    /// Pull the current page back inside `1..=total_pages`
    pub fn clamp_to_bounds(&mut self, total_pages: usize) {
        self.current_page = self.current_page.clamp(1, total_pages.max(1));
    }

    /// Record a new dataset length and re-clamp the current page
    ///
    /// Returns `true` when the current page had to move.
    pub fn resize(&mut self, len: usize) -> bool {
        let before = self.current_page;
        self.dataset_len = len;
        self.clamp_to_bounds(self.total_pages());
        before != self.current_page
    }
}
