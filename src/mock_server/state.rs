//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Wistia API server.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::sync::RwLock;

use crate::Stats;

/// The account behind every API key the mock accepts.
#[derive(Debug, Clone, Serialize)]
pub struct MockAccount {
    pub id: u64,
    pub name: String,
    pub url: String,
}

/// A stored project, serialized with the API's field names.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MockProject {
    pub id: u64,
    pub public_id: String,
    pub name: String,
    pub description: Option<String>,
    pub public: bool,
    pub anonymous_can_upload: bool,
    pub anonymous_can_download: bool,
    pub created: String,
    pub updated: String,
}

/// A stored media.
#[derive(Debug, Clone, Serialize)]
pub struct MockMedia {
    pub id: u64,
    pub hashed_id: String,
    pub name: String,
    pub description: String,
    pub duration: f64,
    #[serde(rename = "type")]
    pub media_type: String,
    pub created: String,
    pub updated: String,
    #[serde(rename = "embedCode")]
    pub embed_code: String,
    /// Public ID of the owning project.
    #[serde(skip)]
    pub project: String,
    #[serde(skip)]
    pub stats: Stats,
}

/// Shared state for the mock server.
///
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    pub account: Option<MockAccount>,

    /// Projects indexed by public ID.
    pub projects: BTreeMap<String, MockProject>,

    /// Medias indexed by hashed ID.
    pub medias: BTreeMap<String, MockMedia>,

    /// Account-wide figures per day.
    pub daily_stats: BTreeMap<NaiveDate, Stats>,

    /// All-time account figures.
    pub account_stats: Stats,

    next_id: u64,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self {
            next_id: 1000,
            ..Self::default()
        }
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    pub fn with_account(mut self, account: MockAccount) -> Self {
        self.account = Some(account);
        self
    }

    /// Add a project to the state.
    pub fn with_project(mut self, project: MockProject) -> Self {
        self.projects.insert(project.public_id.clone(), project);
        self
    }

    /// Add a media to the state.
    pub fn with_media(mut self, media: MockMedia) -> Self {
        self.medias.insert(media.hashed_id.clone(), media);
        self
    }

    /// Record account figures for one day.
    pub fn with_daily_stats(mut self, day: NaiveDate, stats: Stats) -> Self {
        self.daily_stats.insert(day, stats);
        self
    }

    pub fn with_account_stats(mut self, stats: Stats) -> Self {
        self.account_stats = stats;
        self
    }

    /// Medias of a project, in hashed ID order.
    pub fn medias_of(&self, public_id: &str) -> Vec<&MockMedia> {
        self.medias
            .values()
            .filter(|m| m.project == public_id)
            .collect()
    }

    /// Find a media by hashed ID or numeric ID.
    pub fn find_media(&self, id: &str) -> Option<&MockMedia> {
        self.medias.get(id).or_else(|| {
            let numeric: u64 = id.parse().ok()?;
            self.medias.values().find(|m| m.id == numeric)
        })
    }

    /// Project JSON as the API returns it.
    ///
    /// The single-project endpoint embeds medias; the list endpoint only
    /// reports the count.
    pub fn project_json(&self, project: &MockProject, with_medias: bool) -> Value {
        let medias = self.medias_of(&project.public_id);
        let mut value = json!(project);
        value["mediaCount"] = json!(medias.len());
        if with_medias {
            value["medias"] = Value::Array(medias.into_iter().map(media_summary).collect());
        }
        value
    }

    /// Create a project and return its public ID.
    pub fn create_project(&mut self, name: &str) -> String {
        self.next_id += 1;
        let public_id = format!("mockproj{}", self.next_id);
        let project = MockProject {
            id: self.next_id,
            public_id: public_id.clone(),
            name: name.to_string(),
            description: None,
            public: false,
            anonymous_can_upload: false,
            anonymous_can_download: false,
            created: "2012-10-12T00:00:00+00:00".to_string(),
            updated: "2012-10-12T00:00:00+00:00".to_string(),
        };
        self.projects.insert(public_id.clone(), project);
        public_id
    }

    /// Remove a project and its medias.
    pub fn delete_project(&mut self, public_id: &str) -> Option<MockProject> {
        let project = self.projects.remove(public_id)?;
        self.medias.retain(|_, m| m.project != public_id);
        Some(project)
    }

    /// Per-day records between two dates, inclusive.
    pub fn stats_by_date(&self, start: NaiveDate, end: NaiveDate) -> Vec<Value> {
        self.daily_stats
            .range(start..=end)
            .map(|(day, stats)| {
                json!({
                    "date": day.format("%Y-%m-%d").to_string(),
                    "load_count": stats.load_count,
                    "play_count": stats.play_count,
                    "hours_watched": stats.hours_watched,
                })
            })
            .collect()
    }

    /// Project figures: the sum of its medias'.
    pub fn project_stats(&self, public_id: &str) -> Stats {
        self.medias_of(public_id)
            .into_iter()
            .fold(Stats::default(), |mut total, m| {
                total.load_count += m.stats.load_count;
                total.play_count += m.stats.play_count;
                total.hours_watched += m.stats.hours_watched;
                total
            })
    }
}

/// A media as embedded in a project: no embed code.
pub fn media_summary(media: &MockMedia) -> Value {
    let mut value = json!(media);
    if let Some(map) = value.as_object_mut() {
        map.remove("embedCode");
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_server::Fixtures;

    #[test]
    fn test_project_json_counts_medias() {
        let state = MockState::new()
            .with_project(Fixtures::project("p1", "One"))
            .with_media(Fixtures::video(1, "m1", "p1"))
            .with_media(Fixtures::video(2, "m2", "p1"))
            .with_media(Fixtures::video(3, "m3", "other"));

        let project = state.projects.get("p1").unwrap();
        let summary = state.project_json(project, false);
        assert_eq!(summary["mediaCount"], 2);
        assert!(summary.get("medias").is_none());

        let full = state.project_json(project, true);
        let medias = full["medias"].as_array().unwrap();
        assert_eq!(medias.len(), 2);
        assert!(medias[0].get("embedCode").is_none());
    }

    #[test]
    fn test_find_media_by_either_id() {
        let state = MockState::new().with_media(Fixtures::video(77, "hash77", "p1"));
        assert_eq!(state.find_media("hash77").unwrap().id, 77);
        assert_eq!(state.find_media("77").unwrap().hashed_id, "hash77");
        assert!(state.find_media("78").is_none());
    }

    #[test]
    fn test_delete_project_removes_its_medias() {
        let mut state = MockState::new()
            .with_project(Fixtures::project("p1", "One"))
            .with_media(Fixtures::video(1, "m1", "p1"));

        assert!(state.delete_project("p1").is_some());
        assert!(state.medias.is_empty());
        assert!(state.delete_project("p1").is_none());
    }

    #[test]
    fn test_stats_by_date_is_inclusive() {
        let day = |d| NaiveDate::from_ymd_opt(2012, 2, d).unwrap();
        let state = MockState::new()
            .with_daily_stats(day(1), Stats::default())
            .with_daily_stats(day(2), Stats::default())
            .with_daily_stats(day(3), Stats::default());

        let records = state.stats_by_date(day(2), day(3));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["date"], "2012-02-02");
    }
}
