//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use chrono::{Datelike, NaiveDate};

use super::state::{MockAccount, MockMedia, MockProject};
use crate::Stats;

/// Collection of fixture factories for test data.
pub struct Fixtures;

impl Fixtures {
    // =========================================================================
    // Account Fixtures
    // =========================================================================

    pub fn account(id: u64, name: &str) -> MockAccount {
        MockAccount {
            id,
            name: name.to_string(),
            url: format!("https://{}.wistia.com", name.to_lowercase().replace(' ', "-")),
        }
    }

    // =========================================================================
    // Project Fixtures
    // =========================================================================

    /// Create a private project with no description.
    pub fn project(public_id: &str, name: &str) -> MockProject {
        MockProject {
            id: public_id.bytes().map(u64::from).sum(),
            public_id: public_id.to_string(),
            name: name.to_string(),
            description: None,
            public: false,
            anonymous_can_upload: false,
            anonymous_can_download: false,
            created: "2012-09-01T10:00:00+00:00".to_string(),
            updated: "2012-09-01T10:00:00+00:00".to_string(),
        }
    }

    /// Create a public project that accepts anonymous uploads.
    pub fn open_project(public_id: &str, name: &str) -> MockProject {
        MockProject {
            public: true,
            anonymous_can_upload: true,
            ..Self::project(public_id, name)
        }
    }

    // =========================================================================
    // Media Fixtures
    // =========================================================================

    /// Create a video in the given project.
    pub fn video(id: u64, hashed_id: &str, project: &str) -> MockMedia {
        MockMedia {
            id,
            hashed_id: hashed_id.to_string(),
            name: format!("{}.mp4", hashed_id),
            description: String::new(),
            duration: 42.5,
            media_type: "Video".to_string(),
            created: "2012-09-02T10:00:00+00:00".to_string(),
            updated: "2012-09-02T10:00:00+00:00".to_string(),
            embed_code: format!(
                "<iframe src=\"https://fast.wistia.net/embed/iframe/{}\"></iframe>",
                hashed_id
            ),
            project: project.to_string(),
            stats: Stats::default(),
        }
    }

    /// Create an image in the given project.
    pub fn image(id: u64, hashed_id: &str, project: &str) -> MockMedia {
        MockMedia {
            name: format!("{}.png", hashed_id),
            duration: 0.0,
            media_type: "Image".to_string(),
            ..Self::video(id, hashed_id, project)
        }
    }

    // =========================================================================
    // Stats Fixtures
    // =========================================================================

    pub fn stats(load_count: u64, play_count: u64, hours_watched: f64) -> Stats {
        Stats {
            load_count,
            play_count,
            hours_watched,
        }
    }

    /// The same figures for every day of a month.
    pub fn month_of_days(month: u32, year: i32, stats: Stats) -> Vec<(NaiveDate, Stats)> {
        let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
            return vec![];
        };
        first
            .iter_days()
            .take_while(|day| day.month() == month)
            .map(|day| (day, stats.clone()))
            .collect()
    }

    // =========================================================================
    // Scenario Fixtures
    // =========================================================================

    /// Create a complete test scenario.
    ///
    /// Returns an account with two projects: one holding a video and an
    /// image, one empty. Every day of February 2012 has (1, 1, 0.5).
    pub fn default_scenario() -> DefaultScenario {
        let mut intro = Self::video(101, "med1aaa", "proj1abc");
        intro.name = "intro.mp4".to_string();
        intro.stats = Self::stats(30, 12, 2.5);

        let mut poster = Self::image(102, "med2bbb", "proj1abc");
        poster.name = "poster.png".to_string();
        poster.stats = Self::stats(8, 0, 0.0);

        let mut demo = Self::open_project("proj1abc", "Demo Reel");
        demo.description = Some("Showreel and artwork".to_string());

        DefaultScenario {
            account: Self::account(1, "Test Account"),
            projects: vec![demo, Self::project("proj2def", "Empty Project")],
            medias: vec![intro, poster],
            daily_stats: Self::month_of_days(2, 2012, Self::stats(1, 1, 0.5)),
            account_stats: Self::stats(100, 40, 12.5),
        }
    }
}

/// A complete test scenario with related data.
pub struct DefaultScenario {
    pub account: MockAccount,
    pub projects: Vec<MockProject>,
    pub medias: Vec<MockMedia>,
    pub daily_stats: Vec<(NaiveDate, Stats)>,
    pub account_stats: Stats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_of_days_covers_leap_february() {
        let days = Fixtures::month_of_days(2, 2012, Stats::default());
        assert_eq!(days.len(), 29);
        assert_eq!(days[28].0, NaiveDate::from_ymd_opt(2012, 2, 29).unwrap());
    }

    #[test]
    fn test_month_of_days_rejects_bad_month() {
        assert!(Fixtures::month_of_days(13, 2012, Stats::default()).is_empty());
    }

    #[test]
    fn test_default_scenario_medias_belong_to_first_project() {
        let scenario = Fixtures::default_scenario();
        assert!(scenario.medias.iter().all(|m| m.project == "proj1abc"));
        assert_eq!(scenario.projects[0].public_id, "proj1abc");
    }
}
