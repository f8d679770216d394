//! Account model: the entry point that owns the API credential.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::client::WistiaClient;
use crate::error::Result;
use crate::hydrate::{assign_opt, expect_array, expect_object, Hydrate};
use crate::models::media::{Media, MediaListQuery};
use crate::models::project::{Project, ProjectListQuery};
use crate::models::stats::{ByDateQuery, DailyStats, DateInput, MonthlyStats, Stats};
use crate::pagination::Page;
use crate::traits::{Get, List};

const BY_DATE_PATH: &str = "stats/account/by_date.json";

/// A Wistia account, reached through its API key.
///
/// The account owns the client (and with it the credential). Projects and
/// medias it hands out share that client so they can load missing data
/// later. The key is never serialized.
///
/// # Example
///
/// ```no_run
/// use wistia::Account;
///
/// # async fn example() -> wistia::Result<()> {
/// let account = Account::connect("your-api-key").await?;
/// println!("{:?}", account.name());
///
/// for mut project in account.projects(false).await? {
///     let loaded = project.medias().await?.len();
///     println!("{:?}: {} medias", project.name(), loaded);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    #[serde(skip)]
    client: WistiaClient,

    id: Option<u64>,
    name: Option<String>,
    url: Option<String>,
}

impl Hydrate for Account {
    fn apply_field(&mut self, key: &str, value: &Value) -> bool {
        match key {
            "id" => assign_opt(&mut self.id, key, value),
            "name" => assign_opt(&mut self.name, key, value),
            "url" => assign_opt(&mut self.url, key, value),
            _ => false,
        }
    }
}

impl Account {
    /// Connect to the public Wistia API with `api_key` and load the account.
    pub async fn connect(api_key: &str) -> Result<Self> {
        Self::with_client(WistiaClient::with_api_key(api_key)?).await
    }

    /// Connect using `WISTIA_API_KEY` / `WISTIA_API_URL` and load the account.
    pub async fn from_env() -> Result<Self> {
        Self::with_client(WistiaClient::from_env()?).await
    }

    /// Load the account behind `client` with one request to `account.json`.
    pub async fn with_client(client: WistiaClient) -> Result<Self> {
        let mut account = Self::unloaded(client);
        account.refresh().await?;
        Ok(account)
    }

    /// An account seeded with already-fetched data. No request is made.
    pub fn from_data(client: WistiaClient, data: &Map<String, Value>) -> Self {
        let mut account = Self::unloaded(client);
        account.hydrate(data);
        account
    }

    fn unloaded(client: WistiaClient) -> Self {
        Self {
            client,
            id: None,
            name: None,
            url: None,
        }
    }

    /// Re-read the account's own fields from `account.json`.
    #[tracing::instrument(skip(self))]
    pub async fn refresh(&mut self) -> Result<()> {
        let data = self.client.get("account.json").await?;
        self.hydrate(&expect_object(data)?);
        Ok(())
    }

    /// The client used for every request made on this account's behalf.
    pub fn client(&self) -> &WistiaClient {
        &self.client
    }

    pub fn api_key(&self) -> &str {
        self.client.api_key()
    }

    /// Numeric account ID.
    pub fn id(&self) -> Option<u64> {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Main Wistia URL of the account.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Create a project named `name` and return it as Wistia stored it.
    #[tracing::instrument(skip(self))]
    pub async fn create_project(&self, name: &str) -> Result<Project> {
        let data = self.client.post("projects.json", &[("name", name)]).await?;
        Ok(Project::from_data(self.client.clone(), &expect_object(data)?))
    }

    /// Fetch one project, medias included, by public ID.
    pub async fn project(&self, public_id: &str) -> Result<Project> {
        Project::get(&self.client, public_id.to_string()).await
    }

    /// Every project on the account.
    ///
    /// Listed projects carry only their media count. With `recursive`, each
    /// project's medias are loaded before returning, at the cost of one
    /// request per project.
    #[tracing::instrument(skip(self))]
    pub async fn projects(&self, recursive: bool) -> Result<Vec<Project>> {
        let mut projects = Project::list_all(&self.client, &ProjectListQuery::default()).await?;

        if recursive {
            for project in &mut projects {
                project.medias().await?;
            }
        }

        Ok(projects)
    }

    /// One page of projects.
    pub async fn projects_page(&self, page: u32, per_page: u32) -> Result<Page<Project>> {
        Project::list_page(&self.client, &ProjectListQuery::default(), page, per_page).await
    }

    /// Fetch one media by numeric or hashed ID.
    pub async fn media(&self, id: &str) -> Result<Media> {
        Media::get(&self.client, id.to_string()).await
    }

    /// Every media on the account.
    pub async fn medias(&self) -> Result<Vec<Media>> {
        Media::list_all(&self.client, &MediaListQuery::default()).await
    }

    /// All-time statistics for the account.
    #[tracing::instrument(skip(self))]
    pub async fn stats(&self) -> Result<Stats> {
        let data = self.client.get("stats/account.json").await?;
        Ok(Stats::from_data(&expect_object(data)?))
    }

    /// Statistics for a single day.
    ///
    /// `date` may be a [`chrono::NaiveDate`], a `DateTime`, a date string or
    /// a Unix timestamp; see [`DateInput`]. A day the API has no record for
    /// comes back as zeroes.
    #[tracing::instrument(skip(self, date))]
    pub async fn daily_stats(&self, date: impl Into<DateInput>) -> Result<DailyStats> {
        let query = ByDateQuery::for_day(date)?;
        let data = self.client.get_with_query(BY_DATE_PATH, &query).await?;

        let mut daily = match expect_array(data)?.into_iter().next() {
            Some(first) => DailyStats::from_data(&expect_object(first)?),
            None => DailyStats::default(),
        };
        if daily.date.is_none() {
            daily.date = Some(query.start_date);
        }
        Ok(daily)
    }

    /// Statistics summed over every day of `month` (1-12) in `year`.
    ///
    /// The API has no monthly endpoint; the per-day records for the month
    /// are fetched in one request and added together.
    #[tracing::instrument(skip(self))]
    pub async fn monthly_stats(&self, month: u32, year: i32) -> Result<MonthlyStats> {
        let mut monthly = MonthlyStats::new(month, year)?;
        let query = ByDateQuery::for_month(month, year)?;
        let data = self.client.get_with_query(BY_DATE_PATH, &query).await?;

        for day in expect_array(data)?.iter().filter_map(Value::as_object) {
            monthly.add_day(&DailyStats::from_data(day));
        }

        Ok(monthly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_seeded_account_hydrates_without_key() {
        let client = WistiaClient::new("secret-key", "http://127.0.0.1:9").unwrap();
        let data = json!({
            "id": 42,
            "name": "Acme",
            "url": "https://acme.wistia.com",
            "key": "should-not-be-copied",
            "mediaCount": 7
        });
        let account = Account::from_data(client, data.as_object().unwrap());

        assert_eq!(account.id(), Some(42));
        assert_eq!(account.name(), Some("Acme"));
        assert_eq!(account.url(), Some("https://acme.wistia.com"));
        assert_eq!(account.api_key(), "secret-key");

        let serialized = serde_json::to_string(&account).unwrap();
        assert!(!serialized.contains("secret-key"));
        assert!(!serialized.contains("should-not-be-copied"));
    }
}
