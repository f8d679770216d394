//! Media model and trait implementations.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::WistiaClient;
use crate::error::{Result, WistiaError};
use crate::hydrate::{assign, assign_opt, expect_array, expect_object, Hydrate};
use crate::models::stats::Stats;
use crate::pagination::{Page, PaginationParams};
use crate::traits::{Get, List};

/// Kind of file a media holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MediaType {
    Video,
    Image,
    Audio,
    Swf,
    MicrosoftOfficeDocument,
    PdfDocument,
    /// Anything the API reports that is not one of the above.
    UnknownType,
}

impl MediaType {
    /// The name the API uses for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Video => "Video",
            MediaType::Image => "Image",
            MediaType::Audio => "Audio",
            MediaType::Swf => "Swf",
            MediaType::MicrosoftOfficeDocument => "MicrosoftOfficeDocument",
            MediaType::PdfDocument => "PdfDocument",
            MediaType::UnknownType => "UnknownType",
        }
    }

    /// Map an API type name; unrecognised names become [`MediaType::UnknownType`].
    pub fn from_api_str(s: &str) -> Self {
        match s {
            "Video" => MediaType::Video,
            "Image" => MediaType::Image,
            "Audio" => MediaType::Audio,
            "Swf" => MediaType::Swf,
            "MicrosoftOfficeDocument" => MediaType::MicrosoftOfficeDocument,
            "PdfDocument" => MediaType::PdfDocument,
            _ => MediaType::UnknownType,
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from_api_str(s))
    }
}

impl<'de> Deserialize<'de> for MediaType {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        Ok(MediaType::from_api_str(&s))
    }
}

/// How much of an entity's upstream data has been loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadState {
    /// Built from a summary (a list response or a project's embedded list).
    #[default]
    Stub,
    /// Built from, or completed by, a direct fetch.
    Complete,
}

/// A media file hosted on Wistia.
///
/// Medias always belong to a project. Those that arrive embedded in a
/// project or a list response are stubs: fields such as the embed code are
/// fetched on first use by [`Media::embed_code`].
#[derive(Debug, Clone, Serialize)]
pub struct Media {
    #[serde(skip)]
    client: WistiaClient,
    #[serde(skip)]
    state: LoadState,

    id: Option<u64>,
    hashed_id: Option<String>,
    name: Option<String>,
    description: Option<String>,
    /// Length in seconds (pages for documents).
    duration: Option<f64>,
    embed_code: String,
    #[serde(rename = "type")]
    media_type: Option<MediaType>,
    created: Option<String>,
    updated: Option<String>,
}

impl Hydrate for Media {
    fn apply_field(&mut self, key: &str, value: &Value) -> bool {
        match key {
            "id" => assign_opt(&mut self.id, key, value),
            "hashed_id" => assign_opt(&mut self.hashed_id, key, value),
            "name" => assign_opt(&mut self.name, key, value),
            "description" => assign_opt(&mut self.description, key, value),
            "duration" => assign_opt(&mut self.duration, key, value),
            "embedCode" => assign(&mut self.embed_code, key, value),
            "type" => {
                if let Some(s) = value.as_str() {
                    self.media_type = Some(MediaType::from_api_str(s));
                }
                true
            }
            "created" => assign_opt(&mut self.created, key, value),
            "updated" => assign_opt(&mut self.updated, key, value),
            _ => false,
        }
    }
}

fn media_path(id: &str) -> String {
    format!("medias/{}.json", urlencoding::encode(id))
}

impl Media {
    /// An empty media bound to `client`.
    pub fn new(client: WistiaClient) -> Self {
        Self {
            client,
            state: LoadState::Stub,
            id: None,
            hashed_id: None,
            name: None,
            description: None,
            duration: None,
            embed_code: String::new(),
            media_type: None,
            created: None,
            updated: None,
        }
    }

    /// A stub media populated from summary data.
    pub fn from_data(client: WistiaClient, data: &Map<String, Value>) -> Self {
        let mut media = Self::new(client);
        media.hydrate(data);
        media
    }

    fn complete(client: WistiaClient, data: &Map<String, Value>) -> Self {
        let mut media = Self::from_data(client, data);
        media.state = LoadState::Complete;
        media
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Numeric ID used by the data API.
    pub fn id(&self) -> Option<u64> {
        self.id
    }

    /// Hashed ID used for embeds and the JavaScript API.
    pub fn hashed_id(&self) -> Option<&str> {
        self.hashed_id.as_deref()
    }

    /// Display name (the upload file name by default).
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    pub fn media_type(&self) -> Option<MediaType> {
        self.media_type
    }

    /// When the media was uploaded, as reported by the API.
    pub fn created(&self) -> Option<&str> {
        self.created.as_deref()
    }

    pub fn updated(&self) -> Option<&str> {
        self.updated.as_deref()
    }

    /// Embed code currently held, without fetching.
    pub fn cached_embed_code(&self) -> &str {
        &self.embed_code
    }

    /// Change the name locally. Call [`Media::save`] to send it.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Change the description locally. Call [`Media::save`] to send it.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    /// HTML snippet to embed this media on a page.
    ///
    /// A stub with a known ID and no embed code fetches its full record once
    /// and becomes [`LoadState::Complete`].
    #[tracing::instrument(skip(self), fields(id = ?self.id))]
    pub async fn embed_code(&mut self) -> Result<&str> {
        if self.state == LoadState::Stub && self.embed_code.is_empty() {
            if let Some(id) = self.id {
                let data = self.client.get(&media_path(&id.to_string())).await?;
                self.hydrate(&expect_object(data)?);
                self.state = LoadState::Complete;
            }
        }
        Ok(&self.embed_code)
    }

    fn require_hashed_id(&self, operation: &'static str) -> Result<&str> {
        self.hashed_id.as_deref().ok_or(WistiaError::NotPersisted {
            entity_type: "media",
            operation,
        })
    }

    /// Delete the media from Wistia. Returns the raw API response.
    #[tracing::instrument(skip(self), fields(hashed_id = ?self.hashed_id))]
    pub async fn delete(&self) -> Result<Value> {
        let hashed_id = self.require_hashed_id("delete")?;
        self.client.delete(&media_path(hashed_id)).await
    }

    /// Send the name and description to Wistia. Returns the raw API response.
    #[tracing::instrument(skip(self), fields(hashed_id = ?self.hashed_id))]
    pub async fn save(&self) -> Result<Value> {
        #[derive(Serialize)]
        struct SaveParams<'a> {
            #[serde(skip_serializing_if = "Option::is_none")]
            name: Option<&'a str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            description: Option<&'a str>,
        }

        let hashed_id = self.require_hashed_id("save")?;
        let params = SaveParams {
            name: self.name.as_deref(),
            description: self.description.as_deref(),
        };
        self.client.put(&media_path(hashed_id), &params).await
    }

    /// All-time statistics for this media.
    #[tracing::instrument(skip(self), fields(hashed_id = ?self.hashed_id))]
    pub async fn stats(&self) -> Result<Stats> {
        let hashed_id = self.require_hashed_id("fetch stats for")?;
        let path = format!("stats/medias/{}.json", urlencoding::encode(hashed_id));
        let data = self.client.get(&path).await?;
        Ok(Stats::from_data(&expect_object(data)?))
    }
}

/// Query parameters for listing medias.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MediaListQuery {
    /// Only medias in the project with this numeric ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<u64>,

    /// Only medias with exactly this name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Only medias of this type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<MediaType>,

    /// Only the media with this hashed ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hashed_id: Option<String>,
}

#[async_trait]
impl Get for Media {
    type Id = String; // Numeric ID or hashed ID

    #[tracing::instrument(skip(client))]
    async fn get(client: &WistiaClient, id: String) -> Result<Self> {
        let data = client
            .get(&media_path(&id))
            .await
            .map_err(|e| e.into_not_found("media", &id))?;
        Ok(Media::complete(client.clone(), &expect_object(data)?))
    }
}

#[async_trait]
impl List for Media {
    type Query = MediaListQuery;

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &WistiaClient,
        query: &Self::Query,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Self>> {
        #[derive(Serialize)]
        struct RequestParams<'a> {
            #[serde(flatten)]
            query: &'a MediaListQuery,
            #[serde(flatten)]
            paging: PaginationParams,
        }

        let paging = PaginationParams::for_page(page, per_page);
        let params = RequestParams { query, paging };

        let data = client.get_with_query("medias.json", &params).await?;
        let items = expect_array(data)?
            .iter()
            .filter_map(Value::as_object)
            .map(|o| Media::from_data(client.clone(), o))
            .collect();

        Ok(Page::new(items, paging))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> WistiaClient {
        WistiaClient::new("test-key", "http://127.0.0.1:9").unwrap()
    }

    #[test]
    fn test_hydrate_media_fields() {
        let data = json!({
            "id": 4321,
            "hashed_id": "abc123xyz",
            "name": "intro.mp4",
            "description": "Welcome",
            "duration": 12.5,
            "embedCode": "<iframe></iframe>",
            "type": "Video",
            "created": "2012-10-12T10:00:00+00:00",
            "updated": "2012-10-13T10:00:00+00:00",
            "thumbnail": { "url": "https://example.com/t.jpg" }
        });
        let media = Media::from_data(client(), data.as_object().unwrap());

        assert_eq!(media.id(), Some(4321));
        assert_eq!(media.hashed_id(), Some("abc123xyz"));
        assert_eq!(media.name(), Some("intro.mp4"));
        assert_eq!(media.description(), Some("Welcome"));
        assert_eq!(media.duration(), Some(12.5));
        assert_eq!(media.cached_embed_code(), "<iframe></iframe>");
        assert_eq!(media.media_type(), Some(MediaType::Video));
        assert_eq!(media.created(), Some("2012-10-12T10:00:00+00:00"));
        assert_eq!(media.state(), LoadState::Stub);
    }

    #[test]
    fn test_unknown_type_name_maps_to_unknown_type() {
        let media = Media::from_data(client(), json!({ "type": "Hologram" }).as_object().unwrap());
        assert_eq!(media.media_type(), Some(MediaType::UnknownType));
        assert_eq!("PdfDocument".parse::<MediaType>().unwrap(), MediaType::PdfDocument);
        assert_eq!(MediaType::MicrosoftOfficeDocument.to_string(), "MicrosoftOfficeDocument");
    }

    #[tokio::test]
    async fn test_delete_without_hashed_id_is_not_persisted() {
        let media = Media::new(client());
        let err = media.delete().await.unwrap_err();
        assert!(matches!(
            err,
            WistiaError::NotPersisted {
                entity_type: "media",
                operation: "delete"
            }
        ));
    }

    #[tokio::test]
    async fn test_embed_code_without_id_does_not_fetch() {
        // The client points at a closed port; any request would fail.
        let mut media = Media::new(client());
        assert_eq!(media.embed_code().await.unwrap(), "");
        assert_eq!(media.state(), LoadState::Stub);
    }

    #[test]
    fn test_serialized_media_has_no_credentials() {
        let media = Media::from_data(client(), json!({ "id": 1, "type": "Audio" }).as_object().unwrap());
        let value = serde_json::to_value(&media).unwrap();
        assert_eq!(value["type"], "Audio");
        assert!(!value.to_string().contains("test-key"));
    }
}
