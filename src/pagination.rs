//! Page-based listing for Wistia collection endpoints.
//!
//! Collection endpoints take `page` (1-indexed) and `per_page` (at most
//! [`MAX_PER_PAGE`]) and answer with a bare JSON array. No total count is
//! reported, so a page is assumed to be the last one when it comes back
//! with fewer items than requested.

use serde::Serialize;

/// Largest `per_page` the API honours.
pub const MAX_PER_PAGE: u32 = 100;

/// One page of a Wistia collection.
#[derive(Debug, Clone, Serialize)]
#[serde(bound = "T: Serialize")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Page number that was requested (1-indexed).
    pub page: u32,
    /// Page size that was requested, after clamping.
    pub per_page: u32,
    /// A full page came back, so another may follow.
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Wrap the items returned for `params`.
    #[must_use]
    pub fn new(items: Vec<T>, params: PaginationParams) -> Self {
        let has_more = items.len() >= params.per_page as usize;
        Self {
            items,
            page: params.page,
            per_page: params.per_page,
            has_more,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// `page` / `per_page` query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationParams {
    pub page: u32,
    pub per_page: u32,
}

impl PaginationParams {
    /// Parameters for `page`, with both values clamped to what the API accepts.
    #[must_use]
    pub fn for_page(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self::for_page(1, MAX_PER_PAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_page_may_have_more() {
        let page: Page<i32> = Page::new(vec![1; 100], PaginationParams::default());
        assert!(page.has_more);

        let page: Page<i32> = Page::new(vec![1; 7], PaginationParams::default());
        assert!(!page.has_more);

        let page: Page<i32> = Page::new(vec![], PaginationParams::for_page(2, 100));
        assert!(!page.has_more);
        assert!(page.is_empty());
    }

    #[test]
    fn test_params_are_clamped() {
        assert_eq!(
            PaginationParams::for_page(0, 500),
            PaginationParams {
                page: 1,
                per_page: 100
            }
        );
        assert_eq!(PaginationParams::for_page(3, 0).per_page, 1);
    }

    #[test]
    fn test_params_serialize_with_api_names() {
        let value = serde_json::to_value(PaginationParams::for_page(2, 50)).unwrap();
        assert_eq!(value, serde_json::json!({ "page": 2, "per_page": 50 }));
    }

    #[test]
    fn test_page_records_clamped_size() {
        let page = Page::new(vec!["a", "b"], PaginationParams::for_page(4, 250));
        assert_eq!(page.page, 4);
        assert_eq!(page.per_page, 100);
        assert_eq!(page.len(), 2);
        assert_eq!(page.iter().copied().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
