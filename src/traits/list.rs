//! List trait for fetching collections of entities.

use async_trait::async_trait;

use crate::client::WistiaClient;
use crate::error::Result;
use crate::pagination::{Page, MAX_PER_PAGE};

/// Page size used by [`List::list_all`]: the largest the API accepts.
pub const DEFAULT_PAGE_SIZE: u32 = MAX_PER_PAGE;

/// Upper bound on pages walked by [`List::list_all`].
const MAX_PAGES: u32 = 1000;

/// List entities from a paged collection endpoint.
///
/// # Example
///
/// ```ignore
/// use wistia::{List, Project, WistiaClient};
///
/// let client = WistiaClient::from_env()?;
///
/// // Second page of 25
/// let page = Project::list_page(&client, &Default::default(), 2, 25).await?;
///
/// // Everything
/// let all_projects = Project::list_all(&client, &Default::default()).await?;
/// ```
#[async_trait]
pub trait List: Sized + Send {
    /// Filters and sort order sent alongside the page parameters.
    type Query: Default + Send + Sync;

    /// Fetch one page. `per_page` is clamped to 1..=100.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not an array.
    async fn list_page(
        client: &WistiaClient,
        query: &Self::Query,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Self>>;

    /// Fetch every page, starting from the first, until one comes back short.
    ///
    /// A collection smaller than [`DEFAULT_PAGE_SIZE`] costs one request.
    ///
    /// # Errors
    ///
    /// Returns the first failing page's error.
    async fn list_all(client: &WistiaClient, query: &Self::Query) -> Result<Vec<Self>> {
        let mut all_items = Vec::new();

        for page in 1..=MAX_PAGES {
            let result = Self::list_page(client, query, page, DEFAULT_PAGE_SIZE).await?;
            let has_more = result.has_more;
            all_items.extend(result.items);

            if !has_more {
                return Ok(all_items);
            }
        }

        tracing::warn!(max_pages = MAX_PAGES, "stopped listing at page limit");
        Ok(all_items)
    }
}
