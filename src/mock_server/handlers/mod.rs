//! HTTP request handlers for the mock server.

pub mod account;
pub mod medias;
pub mod projects;
pub mod stats;

pub use account::*;
pub use medias::*;
pub use projects::*;
pub use stats::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

/// Strip the `.json` suffix every Wistia resource path carries.
pub(crate) fn strip_json(file: &str) -> Option<&str> {
    file.strip_suffix(".json").filter(|id| !id.is_empty())
}

pub(crate) fn not_found(what: &str, id: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "error": format!("{} not found: {}", what, id)
        })),
    )
        .into_response()
}

pub(crate) fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": message.into() })),
    )
        .into_response()
}

/// `page` / `per_page` as every list endpoint accepts them.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl PageQuery {
    /// Slice one page out of `items`.
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(100).clamp(1, 100);
        items
            .into_iter()
            .skip((page - 1) * per_page)
            .take(per_page)
            .collect()
    }
}

/// Wistia sends booleans as `0` / `1` form fields.
pub(crate) fn flag(value: Option<&str>) -> Option<bool> {
    match value? {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json() {
        assert_eq!(strip_json("abc.json"), Some("abc"));
        assert_eq!(strip_json("abc"), None);
        assert_eq!(strip_json(".json"), None);
    }

    #[test]
    fn test_page_query_slices() {
        let query = PageQuery {
            page: Some(2),
            per_page: Some(2),
        };
        assert_eq!(query.apply(vec![1, 2, 3, 4, 5]), vec![3, 4]);
        assert_eq!(PageQuery::default().apply(vec![1, 2]), vec![1, 2]);
    }

    #[test]
    fn test_flag() {
        assert_eq!(flag(Some("1")), Some(true));
        assert_eq!(flag(Some("0")), Some(false));
        assert_eq!(flag(Some("maybe")), None);
        assert_eq!(flag(None), None);
    }
}
