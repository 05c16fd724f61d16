//! Page-based pagination.
//!
//! List endpoints accept `page` (1-indexed, default 1) and `limit` (items per
//! page, clamped to 1..=100, default 10). Responses report the total item
//! count and the number of pages so clients can render a pager.
//!
//! ```ignore
//! let params = PageParams::new(Some(3), Some(20));
//! assert_eq!(params.offset(), 40);
//! assert_eq!(PageParams::num_of_pages(45, params.limit()), 3);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct PageParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: Some(1),
            limit: Some(DEFAULT_LIMIT),
        }
    }
}

impl PageParams {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self { page, limit }
    }

    /// Effective page size, clamped to `[1, MAX_LIMIT]`.
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Effective page number, at least 1.
    #[must_use]
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Rows to skip. Saturates, so an absurd `page` lands past the end and
    /// yields an empty page.
    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.limit())
    }

    /// Number of pages needed for `total` items; 0 when there are none.
    #[must_use]
    pub fn num_of_pages(total: i64, limit: i64) -> i64 {
        if total <= 0 {
            return 0;
        }
        let limit = limit.max(1);
        (total + limit - 1) / limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = PageParams::new(None, None);
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), DEFAULT_LIMIT);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_offset_from_page() {
        let params = PageParams::new(Some(3), Some(20));
        assert_eq!(params.offset(), 40);
    }

    #[test]
    fn test_limit_is_clamped() {
        assert_eq!(PageParams::new(None, Some(0)).limit(), 1);
        assert_eq!(PageParams::new(None, Some(-5)).limit(), 1);
        assert_eq!(PageParams::new(None, Some(1000)).limit(), MAX_LIMIT);
    }

    #[test]
    fn test_page_is_at_least_one() {
        let params = PageParams::new(Some(-2), Some(10));
        assert_eq!(params.page(), 1);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_huge_page_saturates() {
        let params = PageParams::new(Some(i64::MAX), Some(MAX_LIMIT));
        assert_eq!(params.offset(), i64::MAX);

        let params = PageParams::new(Some(i64::MAX / 2), Some(3));
        assert_eq!(params.offset(), i64::MAX);
    }

    #[test]
    fn test_num_of_pages() {
        assert_eq!(PageParams::num_of_pages(0, 10), 0);
        assert_eq!(PageParams::num_of_pages(1, 10), 1);
        assert_eq!(PageParams::num_of_pages(10, 10), 1);
        assert_eq!(PageParams::num_of_pages(11, 10), 2);
        assert_eq!(PageParams::num_of_pages(45, 20), 3);
    }
}
