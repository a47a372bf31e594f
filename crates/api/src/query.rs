use serde::Deserialize;

/// Default number of items per page when the client does not specify one.
pub const DEFAULT_PAGE_LIMIT: i64 = 20;

/// Upper bound on the page size a client can request.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Pagination query parameters.
///
/// Pages are 1-based. Example: `GET /api/v1/events/summaries?page=2&limit=10`
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageParams {
    /// Effective page size, clamped to `1..=MAX_PAGE_LIMIT`.
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT)
    }

    /// Row offset for the requested page.
    pub fn offset(&self) -> i64 {
        (self.page.unwrap_or(1).max(1) - 1) * self.limit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = PageParams::default();
        assert_eq!(params.limit(), DEFAULT_PAGE_LIMIT);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_limit_clamped() {
        let params = PageParams {
            page: None,
            limit: Some(1000),
        };
        assert_eq!(params.limit(), MAX_PAGE_LIMIT);

        let params = PageParams {
            page: None,
            limit: Some(0),
        };
        assert_eq!(params.limit(), 1);

        let params = PageParams {
            page: None,
            limit: Some(-5),
        };
        assert_eq!(params.limit(), 1);
    }

    #[test]
    fn test_offset_from_page() {
        let params = PageParams {
            page: Some(3),
            limit: Some(10),
        };
        assert_eq!(params.offset(), 20);

        // Page 0 and negative pages behave like page 1.
        let params = PageParams {
            page: Some(0),
            limit: Some(10),
        };
        assert_eq!(params.offset(), 0);

        let params = PageParams {
            page: Some(-2),
            limit: Some(10),
        };
        assert_eq!(params.offset(), 0);
    }
}
