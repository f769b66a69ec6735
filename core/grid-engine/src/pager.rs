//! FILENAME: core/grid-engine/src/pager.rs
//! PURPOSE: Page count and page window arithmetic.

use std::ops::Range;

/// `max(1, ceil(row_count / page_size))`. A zero page size is treated as 1.
pub fn total_pages(row_count: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    row_count.div_ceil(page_size).max(1)
}

/// Index range of the given 1-based page, cut to `row_count`.
pub fn page_range(row_count: usize, page: usize, page_size: usize) -> Range<usize> {
    let page_size = page_size.max(1);
    let start = page.saturating_sub(1).saturating_mul(page_size).min(row_count);
    let end = start.saturating_add(page_size).min(row_count);
    start..end
}
