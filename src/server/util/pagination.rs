//! Page request parsing and paginated result containers.
//!
//! Pages are one-based on the wire. `PageRequest::index` converts to the zero-based
//! page index SeaORM's paginator expects.

use crate::server::error::AppError;

/// Default page size for most list endpoints.
pub const DEFAULT_LIMIT: u64 = 20;
/// Largest page size a client may request.
pub const MAX_LIMIT: u64 = 100;

/// Validated page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// One-based page number.
    pub page: u64,
    /// Rows per page, `1..=MAX_LIMIT`.
    pub limit: u64,
}

impl PageRequest {
    /// Builds a page request from optional query parameters.
    ///
    /// # Arguments
    /// - `page` - Requested page, defaults to 1
    /// - `limit` - Requested page size, defaults to `default_limit`
    /// - `default_limit` - Endpoint-specific default page size
    ///
    /// # Returns
    /// - `Ok(PageRequest)` - Valid page selection
    /// - `Err(AppError::BadRequest)` - Page is 0, limit is outside `1..=100`, or the page
    ///   lies beyond the largest row offset the database accepts
    pub fn new(page: Option<u64>, limit: Option<u64>, default_limit: u64) -> Result<Self, AppError> {
        let page = page.unwrap_or(1);
        let limit = limit.unwrap_or(default_limit);

        if page == 0 {
            return Err(AppError::BadRequest("page must be at least 1".to_string()));
        }
        if limit == 0 || limit > MAX_LIMIT {
            return Err(AppError::BadRequest(format!(
                "limit must be between 1 and {}",
                MAX_LIMIT
            )));
        }
        if !matches!(page.checked_mul(limit), Some(end) if end <= i64::MAX as u64) {
            return Err(AppError::BadRequest("page is out of range".to_string()));
        }

        Ok(Self { page, limit })
    }

    /// Zero-based page index.
    pub fn index(&self) -> u64 {
        self.page - 1
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// One page of results plus the metadata clients need to navigate.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page,
            limit: request.limit,
            total_pages: total_pages(total, request.limit),
        }
    }

    /// Converts every item while keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
        }
    }
}

/// `ceil(total / limit)`, with an empty result having zero pages.
pub fn total_pages(total: u64, limit: u64) -> u64 {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page() {
        let request = PageRequest::new(None, None, 50).unwrap();

        assert_eq!(request, PageRequest { page: 1, limit: 50 });
        assert_eq!(request.index(), 0);
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(PageRequest::new(Some(0), None, 20).is_err());
        assert!(PageRequest::new(None, Some(0), 20).is_err());
        assert!(PageRequest::new(None, Some(101), 20).is_err());
        assert!(PageRequest::new(None, Some(100), 20).is_ok());
    }

    #[test]
    fn rejects_pages_past_the_largest_offset() {
        assert!(PageRequest::new(Some(u64::MAX / 2), Some(100), 20).is_err());
        assert!(PageRequest::new(Some(u64::MAX), Some(1), 20).is_err());

        let last = i64::MAX as u64 / 100;
        assert!(PageRequest::new(Some(last), Some(100), 20).is_ok());
        assert!(PageRequest::new(Some(last + 1), Some(100), 20).is_err());
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(20, 20), 1);
        assert_eq!(total_pages(21, 20), 2);
        assert_eq!(total_pages(7, 3), 3);
    }

    #[test]
    fn map_keeps_metadata() {
        let page = Page::new(vec![1, 2], 5, PageRequest { page: 2, limit: 2 });
        let mapped = page.map(|n| n * 10);

        assert_eq!(mapped.items, vec![10, 20]);
        assert_eq!(mapped.total_pages, 3);
        assert_eq!(mapped.page, 2);
    }
}
