use std::num::{IntErrorKind, NonZeroU32};

/// Number of books per catalogue page.
pub const BOOKS_PAGE_SIZE: u32 = 5;

/// A 1-based page number parsed leniently from a query string.
///
/// Anything that is not a positive integer (missing, zero, negative,
/// fractional, or non-numeric) falls back to the first page. Integers too
/// large for `u32` saturate, so they still address a page past the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageNumber(NonZeroU32);

impl PageNumber {
    pub const FIRST: PageNumber = PageNumber(NonZeroU32::MIN);

    pub fn new(page: u32) -> Self {
        NonZeroU32::new(page).map_or(Self::FIRST, PageNumber)
    }

    pub fn parse(raw: Option<&str>) -> Self {
        raw.map(str::trim)
            .and_then(|value| match value.parse::<u64>() {
                Ok(page) => Some(u32::try_from(page).unwrap_or(u32::MAX)),
                Err(e) if *e.kind() == IntErrorKind::PosOverflow => Some(u32::MAX),
                Err(_) => None,
            })
            .map_or(Self::FIRST, Self::new)
    }

    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: PageNumber,
    page_size: u32,
}

impl PageRequest {
    pub fn new(page: PageNumber, page_size: u32) -> Self {
        Self {
            page,
            page_size: page_size.max(1),
        }
    }

    pub fn books(page: PageNumber) -> Self {
        Self::new(page, BOOKS_PAGE_SIZE)
    }

    pub const fn page(&self) -> u32 {
        self.page.get()
    }

    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of records to skip. Pages past the end are not clamped.
    pub fn offset(&self) -> u64 {
        u64::from(self.page() - 1) * u64::from(self.page_size)
    }
}

#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            page: request.page(),
            page_size: request.page_size(),
            total,
        }
    }

    /// `ceil(total / page_size)`; an empty collection has zero pages.
    pub fn total_pages(&self) -> u32 {
        let size = u64::from(self.page_size.max(1));
        u32::try_from(self.total.div_ceil(size)).unwrap_or(u32::MAX)
    }

}
