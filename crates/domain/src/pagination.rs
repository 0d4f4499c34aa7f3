use estatedesk_core::{AppError, AppResult};
use serde::Serialize;

/// Page size used when a table mounts.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Current page window of a list table. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Pagination {
    page: u32,
    limit: u32,
}

impl Pagination {
    /// Creates a validated page window.
    pub fn new(page: u32, limit: u32) -> AppResult<Self> {
        if page == 0 {
            return Err(AppError::Validation(
                "page must be greater than zero".to_owned(),
            ));
        }

        if limit == 0 {
            return Err(AppError::Validation(
                "page size must be greater than zero".to_owned(),
            ));
        }

        Ok(Self { page, limit })
    }

    /// Returns the first page with the given size.
    pub fn first_page(limit: u32) -> AppResult<Self> {
        Self::new(1, limit)
    }

    /// Returns the 1-based page index.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Returns the same window moved to `page`.
    pub fn with_page(self, page: u32) -> AppResult<Self> {
        Self::new(page, self.limit)
    }

    /// Returns a window of `limit` rows starting again at page 1.
    pub fn with_limit(self, limit: u32) -> AppResult<Self> {
        Self::new(1, limit)
    }

    /// Returns the same size on page 1.
    #[must_use]
    pub fn reset(self) -> Self {
        Self {
            page: 1,
            limit: self.limit,
        }
    }

    /// Returns the number of rows skipped before this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}
