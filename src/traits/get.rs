//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::client::WistiaClient;
use crate::error::Result;

/// Fetch a single entity by ID.
///
/// Implement this trait for entity types that can be fetched individually
/// by a unique identifier (a project's public ID, a media's ID).
///
/// # Example
///
/// ```ignore
/// use wistia::{WistiaClient, Project, Get};
///
/// let client = WistiaClient::from_env()?;
/// let project = Project::get(&client, "9xm5ux1qbx".to_string()).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The ID type for this entity.
    type Id;

    /// Fetch the entity by ID.
    ///
    /// The returned entity keeps a clone of `client` for later lookups.
    ///
    /// # Errors
    ///
    /// Returns [`WistiaError::NotFound`](crate::WistiaError::NotFound) if the
    /// API answers 404, or another error if the request fails.
    async fn get(client: &WistiaClient, id: Self::Id) -> Result<Self>;
}
