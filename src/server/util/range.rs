//! Pagination windows for platform listings.
//!
//! The platform pages session listings through an `items=<first>-<last>` `Range` header, with
//! both bounds inclusive, and reports the total number of items in `Content-Range`.

/// Number of items requested per page.
pub const PAGE_SIZE: u64 = 20;

/// An inclusive window of item positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRange {
    pub first: u64,
    pub last: u64,
}

impl PageRange {
    /// Value of the `Range` request header for this window.
    pub fn header_value(&self) -> String {
        format!("items={}-{}", self.first, self.last)
    }
}

/// Splits `[0, total)` into consecutive windows of [`PAGE_SIZE`] items.
///
/// The last window is clamped to `total - 1`; no windows are returned when `total` is zero.
pub fn page_ranges(total: u64) -> Vec<PageRange> {
    (0..total)
        .step_by(PAGE_SIZE as usize)
        .map(|first| PageRange {
            first,
            last: (first + PAGE_SIZE).min(total) - 1,
        })
        .collect()
}

/// Reads the total from a `Content-Range` header such as `items 0-19/57`.
pub fn parse_content_range_total(value: &str) -> Option<u64> {
    value.rsplit('/').next()?.trim().parse().ok()
}
