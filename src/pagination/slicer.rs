//! Page slicing
//!
//! Pure functions mapping a page number onto a window of the dataset.

use super::types::PageSize;
use std::ops::Range;

/// Index range of `page` within a dataset of `len` records
///
/// The range is clipped to the dataset, so the last page may be short and
/// pages past the end are empty. Page 0 is treated as page 1.
pub fn page_window(len: usize, page: usize, page_size: PageSize) -> Range<usize> {
    let size = page_size.get();
    let start = page.saturating_sub(1).saturating_mul(size).min(len);
    let end = start.saturating_add(size).min(len);
    start..end
}

/// Records visible on `page`, borrowed from `dataset`
pub fn slice<T>(dataset: &[T], page: usize, page_size: PageSize) -> &[T] {
    &dataset[page_window(dataset.len(), page, page_size)]
}
