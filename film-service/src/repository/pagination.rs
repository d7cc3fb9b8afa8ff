//! Pagination for list queries
//!
//! # Example
//!
//! ```rust
//! use film_service::repository::Pagination;
//!
//! let page3 = Pagination::page(3, 20);
//! assert_eq!(page3.offset, 40);
//! assert_eq!(page3.limit, 20);
//! ```

use std::collections::HashMap;

/// Default page size
pub const DEFAULT_PER_PAGE: u64 = 20;

/// Largest page size a client may ask for
pub const MAX_PER_PAGE: u64 = 100;

/// Name of the 1-based page number parameter
pub const PAGE_PARAM: &str = "page";

/// Name of the page size parameter
pub const PER_PAGE_PARAM: &str = "per_page";

/// Offset/limit pair for a query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Number of results to skip
    pub offset: u64,
    /// Maximum number of results to return
    pub limit: u64,
}

impl Pagination {
    /// Create new pagination parameters
    #[must_use]
    pub const fn new(offset: u64, limit: u64) -> Self {
        Self { offset, limit }
    }

    /// Pagination for a 1-based page number
    ///
    /// Page 0 is treated as page 1.
    #[must_use]
    pub const fn page(page_number: u64, page_size: u64) -> Self {
        let offset = page_number.saturating_sub(1).saturating_mul(page_size);
        Self {
            offset,
            limit: page_size,
        }
    }

    /// Read `page`/`per_page` from query parameters
    ///
    /// Returns `None` when neither is present, meaning the caller wants
    /// every row. Unparseable values fall back to the defaults and
    /// `per_page` is clamped to `1..=MAX_PER_PAGE`.
    pub fn from_params(params: &HashMap<String, String>) -> Option<Self> {
        let page = params.get(PAGE_PARAM);
        let per_page = params.get(PER_PAGE_PARAM);
        if page.is_none() && per_page.is_none() {
            return None;
        }

        let page = page.and_then(|p| p.trim().parse().ok()).unwrap_or(1);
        let per_page = per_page
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE);

        Some(Self::page(page, per_page))
    }

    /// Offset as a SQLite integer
    pub fn offset_i64(&self) -> i64 {
        i64::try_from(self.offset).unwrap_or(i64::MAX)
    }

    /// Limit as a SQLite integer
    pub fn limit_i64(&self) -> i64 {
        i64::try_from(self.limit).unwrap_or(i64::MAX)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::page(1, DEFAULT_PER_PAGE)
    }
}
