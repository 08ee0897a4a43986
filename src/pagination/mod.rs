//! Pagination module
//!
//! Turns an ordered dataset into fixed-size, 1-indexed pages.
//!
//! # Overview
//!
//! `PaginationState` owns the current page pointer and keeps it inside
//! `1..=total_pages` at all times, including for an empty dataset. The
//! slicer maps a page number onto the records visible on that page.
//! Neither half performs I/O or ever fails: navigation past either end is
//! absorbed as a no-op.

mod slicer;
mod types;

pub use slicer::{page_window, slice};
pub use types::{total_pages, PageSize, PaginationState, RECORDS_PER_PAGE};

#[cfg(test)]
mod tests;
