//! Pagination types for list operations.

use serde::{Deserialize, Serialize};

/// A normalized request for a page of results.
///
/// Pages are 1-indexed. Construct through [`PageRequest::normalize`] so
/// that raw user input never produces a negative offset or an empty limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    /// The page number (1-indexed).
    pub page: u32,
    /// The number of items per page.
    pub limit: u32,
}

impl PageRequest {
    /// The default page size.
    pub const DEFAULT_LIMIT: u32 = 10;
    /// The maximum allowed page size.
    pub const MAX_LIMIT: u32 = 100;

    /// Normalizes raw page/limit input.
    ///
    /// A page `<= 0` becomes page 1 (offset 0); a limit `<= 0` becomes
    /// [`Self::DEFAULT_LIMIT`]; oversized limits are capped at [`Self::MAX_LIMIT`].
    #[must_use]
    pub fn normalize(page: i64, limit: i64) -> Self {
        let page = u32::try_from(page.max(1)).unwrap_or(u32::MAX);
        let limit = if limit <= 0 {
            Self::DEFAULT_LIMIT
        } else {
            u32::try_from(limit).unwrap_or(u32::MAX).min(Self::MAX_LIMIT)
        };
        Self { page, limit }
    }

    /// Creates a page request for the first page with default size.
    #[must_use]
    pub const fn first() -> Self {
        Self {
            page: 1,
            limit: Self::DEFAULT_LIMIT,
        }
    }

    /// Returns the offset for database queries.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }

    /// Returns the limit for database queries.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit as u64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}
