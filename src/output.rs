//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::{Account, DailyStats, Media, MonthlyStats, Project, Stats};

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

fn header(title: String) -> Vec<String> {
    let divider = "─".repeat(title.chars().count().max(30));
    vec![title, divider]
}

fn stats_lines(stats: &Stats) -> Vec<String> {
    let mut lines = vec![
        format!("Loads:          {}", stats.load_count),
        format!("Plays:          {}", stats.play_count),
        format!("Hours Watched:  {:.2}", stats.hours_watched),
    ];
    if let Some(rate) = stats.play_rate() {
        lines.push(format!("Play Rate:      {:.1}%", rate * 100.0));
    }
    lines
}

impl PrettyPrint for Account {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Account: {}", self.name().unwrap_or("(unnamed)")));

        if let Some(id) = self.id() {
            lines.push(format!("ID:             {}", id));
        }

        if let Some(url) = self.url() {
            lines.push(format!("URL:            {}", url));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Project {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!(
            "Project: {}",
            self.public_id().unwrap_or("(unsaved)")
        ));

        if let Some(name) = self.name() {
            lines.push(format!("Name:           {}", name));
        }

        lines.push(format!("Medias:         {}", self.media_count()));
        lines.push(format!(
            "Visibility:     {}",
            if self.is_public() { "public" } else { "private" }
        ));
        lines.push(format!(
            "Anonymous:      upload {}, download {}",
            if self.anonymous_can_upload() { "yes" } else { "no" },
            if self.anonymous_can_download() { "yes" } else { "no" }
        ));

        if let Some(created) = self.created() {
            lines.push(format!("Created:        {}", created));
        }

        for media in self.loaded_medias() {
            lines.push(format!(
                "  - {} [{}] {}",
                media.hashed_id().unwrap_or("?"),
                media.media_type().map_or("?", |t| t.as_str()),
                media.name().unwrap_or_default()
            ));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Media {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Media: {}", self.hashed_id().unwrap_or("(unknown)")));

        if let Some(name) = self.name() {
            lines.push(format!("Name:           {}", name));
        }

        if let Some(media_type) = self.media_type() {
            lines.push(format!("Type:           {}", media_type));
        }

        if let Some(duration) = self.duration() {
            lines.push(format!("Duration:       {:.1}s", duration));
        }

        if let Some(description) = self.description().filter(|d| !d.is_empty()) {
            lines.push(format!("Description:    {}", description));
        }

        if let Some(created) = self.created() {
            lines.push(format!("Created:        {}", created));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Stats {
    fn pretty_print(&self) -> String {
        let mut lines = header("Stats: all time".to_string());
        lines.extend(stats_lines(self));
        lines.join("\n")
    }
}

impl PrettyPrint for DailyStats {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Stats: {}", self.date.as_deref().unwrap_or("?")));
        lines.extend(stats_lines(&self.stats));
        lines.join("\n")
    }
}

impl PrettyPrint for MonthlyStats {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Stats: {} {}", self.month_name(), self.year()));
        lines.push(format!("Range:          {}", self.range_label()));
        lines.extend(stats_lines(&self.stats));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WistiaClient;

    #[test]
    fn test_project_pretty_print_format() {
        let client = WistiaClient::new("test-key", "http://127.0.0.1:9").unwrap();
        let data = serde_json::json!({
            "publicId": "pub123",
            "name": "My Project",
            "mediaCount": 1,
            "medias": [{ "hashed_id": "abc", "type": "Video", "name": "clip.mp4" }]
        });
        let project = Project::from_data(client, data.as_object().unwrap());

        let output = project.pretty_print();
        assert!(output.starts_with("Project: pub123"));
        assert!(output.contains("Name:           My Project"));
        assert!(output.contains("abc [Video] clip.mp4"));
    }

    #[test]
    fn test_monthly_pretty_print_shows_range() {
        let monthly = MonthlyStats::new(2, 2012).unwrap();
        let output = monthly.pretty_print();
        assert!(output.starts_with("Stats: February 2012"));
        assert!(output.contains("02/01/2012-02/29/2012"));
        // No loads, so no play rate line
        assert!(!output.contains("Play Rate"));
    }
}
