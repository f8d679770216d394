//! Project model and trait implementations.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::client::WistiaClient;
use crate::error::{Result, WistiaError};
use crate::hydrate::{assign, assign_opt, expect_array, expect_object, Hydrate};
use crate::models::media::{LoadState, Media};
use crate::models::stats::Stats;
use crate::pagination::{Page, PaginationParams};
use crate::traits::{Get, List};

/// Script that renders the embeddable upload widget.
const UPLOAD_WIDGET_SCRIPT: &str = "https://static.wistia.com/javascripts/upload_widget.js";

/// A Wistia project.
///
/// Projects are the primary way an account's medias are organized; every
/// media belongs to exactly one project. A project returned by a list call
/// carries its media count but not its medias; [`Project::medias`] fetches
/// them when the two disagree.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(skip)]
    client: WistiaClient,
    #[serde(skip)]
    state: LoadState,

    id: Option<u64>,
    /// Primary identifier in API paths.
    public_id: Option<String>,
    name: Option<String>,
    description: Option<String>,
    media_count: u64,
    public: bool,
    anonymous_can_upload: bool,
    anonymous_can_download: bool,
    created: Option<String>,
    updated: Option<String>,
    medias: Vec<Media>,
}

impl Hydrate for Project {
    fn apply_field(&mut self, key: &str, value: &Value) -> bool {
        match key {
            "id" => assign_opt(&mut self.id, key, value),
            "publicId" | "hashedId" => assign_opt(&mut self.public_id, key, value),
            "name" => assign_opt(&mut self.name, key, value),
            "description" => assign_opt(&mut self.description, key, value),
            "mediaCount" => assign(&mut self.media_count, key, value),
            "public" => assign(&mut self.public, key, value),
            "anonymousCanUpload" => assign(&mut self.anonymous_can_upload, key, value),
            "anonymousCanDownload" => assign(&mut self.anonymous_can_download, key, value),
            "created" => assign_opt(&mut self.created, key, value),
            "updated" => assign_opt(&mut self.updated, key, value),
            "medias" => {
                match value.as_array() {
                    Some(items) => {
                        self.medias = items
                            .iter()
                            .filter_map(Value::as_object)
                            .map(|o| Media::from_data(self.client.clone(), o))
                            .collect();
                    }
                    None => tracing::debug!("skipping non-array medias field"),
                }
                true
            }
            _ => false,
        }
    }
}

fn project_path(public_id: &str) -> String {
    format!("projects/{}.json", urlencoding::encode(public_id))
}

impl Project {
    /// An empty, unsaved project bound to `client`.
    ///
    /// Use [`Account::create_project`](crate::Account::create_project) to
    /// create projects on Wistia.
    pub fn new(client: WistiaClient) -> Self {
        Self {
            client,
            state: LoadState::Stub,
            id: None,
            public_id: None,
            name: None,
            description: None,
            media_count: 0,
            public: false,
            anonymous_can_upload: false,
            anonymous_can_download: false,
            created: None,
            updated: None,
            medias: Vec::new(),
        }
    }

    /// A project populated from API data.
    ///
    /// A `medias` array in `data` becomes this project's media list.
    pub fn from_data(client: WistiaClient, data: &Map<String, Value>) -> Self {
        let mut project = Self::new(client);
        project.hydrate(data);
        project
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn id(&self) -> Option<u64> {
        self.id
    }

    /// Public ID, the project's primary identifier in the API.
    pub fn public_id(&self) -> Option<&str> {
        self.public_id.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Number of medias the API reports for this project.
    pub fn media_count(&self) -> u64 {
        self.media_count
    }

    /// Whether anonymous users can view this project.
    pub fn is_public(&self) -> bool {
        self.public
    }

    /// Whether anonymous users can upload. Required by [`Project::uploader_code`].
    pub fn anonymous_can_upload(&self) -> bool {
        self.anonymous_can_upload
    }

    pub fn anonymous_can_download(&self) -> bool {
        self.anonymous_can_download
    }

    pub fn created(&self) -> Option<&str> {
        self.created.as_deref()
    }

    pub fn updated(&self) -> Option<&str> {
        self.updated.as_deref()
    }

    /// Medias held right now, without fetching.
    pub fn loaded_medias(&self) -> &[Media] {
        &self.medias
    }

    /// Whether the media list matches the reported media count.
    pub fn medias_complete(&self) -> bool {
        self.medias.len() as u64 == self.media_count
    }

    /// Change the name locally. Call [`Project::save`] to send it.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn set_public(&mut self, public: bool) {
        self.public = public;
    }

    pub fn set_anonymous_can_upload(&mut self, allowed: bool) {
        self.anonymous_can_upload = allowed;
    }

    pub fn set_anonymous_can_download(&mut self, allowed: bool) {
        self.anonymous_can_download = allowed;
    }

    fn require_public_id(&self, operation: &'static str) -> Result<&str> {
        self.public_id.as_deref().ok_or(WistiaError::NotPersisted {
            entity_type: "project",
            operation,
        })
    }

    /// The project's medias.
    ///
    /// When the number of medias held differs from the reported media count
    /// (as for projects from a list call), the project is fetched again and
    /// re-hydrated before returning. A project whose counts already agree,
    /// including one with no medias at all, is returned without a request.
    /// The refetch happens at most once; afterwards the project is
    /// [`LoadState::Complete`] whatever the counts say.
    #[tracing::instrument(skip(self), fields(public_id = ?self.public_id))]
    pub async fn medias(&mut self) -> Result<&[Media]> {
        if self.state == LoadState::Stub && !self.medias_complete() {
            let path = project_path(self.require_public_id("load medias of")?);
            let data = self.client.get(&path).await?;
            self.hydrate(&expect_object(data)?);
            self.state = LoadState::Complete;

            if !self.medias_complete() {
                tracing::warn!(
                    media_count = self.media_count,
                    loaded = self.medias.len(),
                    "project media count still differs after refetch"
                );
            }
        }
        Ok(&self.medias)
    }

    /// Send name, visibility and anonymous access flags to Wistia.
    ///
    /// Returns the raw API response; local fields are not refreshed from it.
    ///
    /// # Errors
    ///
    /// Returns [`WistiaError::NotPersisted`] without making a request if the
    /// project has no public ID.
    #[tracing::instrument(skip(self), fields(public_id = ?self.public_id))]
    pub async fn save(&self) -> Result<Value> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct SaveParams<'a> {
            public: u8,
            anonymous_can_upload: u8,
            anonymous_can_download: u8,
            #[serde(skip_serializing_if = "Option::is_none")]
            name: Option<&'a str>,
        }

        let public_id = self.require_public_id("save")?;
        let params = SaveParams {
            public: u8::from(self.public),
            anonymous_can_upload: u8::from(self.anonymous_can_upload),
            anonymous_can_download: u8::from(self.anonymous_can_download),
            name: self.name.as_deref(),
        };
        self.client.put(&project_path(public_id), &params).await
    }

    /// Delete the project from Wistia. Returns the raw API response.
    #[tracing::instrument(skip(self), fields(public_id = ?self.public_id))]
    pub async fn delete(&self) -> Result<Value> {
        let public_id = self.require_public_id("delete")?;
        self.client.delete(&project_path(public_id)).await
    }

    /// All-time statistics for this project.
    #[tracing::instrument(skip(self), fields(public_id = ?self.public_id))]
    pub async fn stats(&self) -> Result<Stats> {
        let public_id = self.require_public_id("fetch stats for")?;
        let path = format!("stats/projects/{}.json", urlencoding::encode(public_id));
        let data = self.client.get(&path).await?;
        Ok(Stats::from_data(&expect_object(data)?))
    }

    /// HTML and script for an upload widget that adds medias to this project.
    ///
    /// The widget does not authenticate, so it only works when
    /// [`Project::anonymous_can_upload`] is enabled.
    pub fn uploader_code(&self) -> String {
        if !self.anonymous_can_upload {
            tracing::warn!(
                public_id = ?self.public_id,
                "upload widget requires anonymous uploads to be enabled"
            );
        }

        // JSON string syntax is valid JS; `<` is escaped so the ID cannot close the script tag
        let public_id = Value::from(self.public_id.as_deref().unwrap_or_default())
            .to_string()
            .replace('<', "\\u003c");
        format!(
            concat!(
                "<div id=\"wistia-upload-widget\" style=\"width: 500px; height: 75px;\"></div>\n",
                "<script src=\"{script}\"></script>\n",
                "<script>\n",
                "var widget1 = new wistia.UploadWidget({{ divId: 'wistia-upload-widget', publicProjectId: {public_id} }});\n",
                "</script>\n",
            ),
            script = UPLOAD_WIDGET_SCRIPT,
            public_id = public_id,
        )
    }
}

/// Query parameters for listing projects.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectListQuery {
    /// Sort field: `name`, `created` or `updated`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,

    /// 1 for ascending, 0 for descending.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<u8>,
}

#[async_trait]
impl Get for Project {
    type Id = String; // Public ID

    #[tracing::instrument(skip(client))]
    async fn get(client: &WistiaClient, public_id: String) -> Result<Self> {
        let data = client
            .get(&project_path(&public_id))
            .await
            .map_err(|e| e.into_not_found("project", &public_id))?;
        let mut project = Project::from_data(client.clone(), &expect_object(data)?);
        project.state = LoadState::Complete;
        Ok(project)
    }
}

#[async_trait]
impl List for Project {
    type Query = ProjectListQuery;

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
            query: &'a ProjectListQuery,
            #[serde(flatten)]
            paging: PaginationParams,
        }

        let paging = PaginationParams::for_page(page, per_page);
        let params = RequestParams { query, paging };

        let data = client.get_with_query("projects.json", &params).await?;
        let items = expect_array(data)?
            .iter()
            .filter_map(Value::as_object)
            .map(|o| Project::from_data(client.clone(), o))
            .collect();

        Ok(Page::new(items, paging))
    }
}
