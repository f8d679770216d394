//! CLI argument parsing tests.

use clap::Parser;
use wistia::cli::{Cli, Command, Entity};

#[test]
fn test_cli_parses_get_subcommand() {
    let cli = Cli::parse_from(["wistia", "get", "media", "abc123"]);

    assert!(!cli.json);
    match cli.command {
        Command::Get { entity, id } => {
            assert_eq!(entity, Entity::Media);
            assert_eq!(id, "abc123");
        }
        _ => panic!("Expected Get command"),
    }
}

#[test]
fn test_cli_parses_list_with_plural_alias() {
    let cli = Cli::parse_from(["wistia", "list", "projects", "--recursive"]);

    match cli.command {
        Command::List {
            entity,
            page,
            per_page,
            recursive,
        } => {
            assert_eq!(entity, Entity::Project);
            assert_eq!(page, None);
            assert_eq!(per_page, None);
            assert!(recursive);
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_cli_parses_list_pagination() {
    let cli = Cli::parse_from(["wistia", "list", "medias", "--page", "2", "--per-page", "50"]);

    match cli.command {
        Command::List {
            entity,
            page,
            per_page,
            ..
        } => {
            assert_eq!(entity, Entity::Media);
            assert_eq!(page, Some(2));
            assert_eq!(per_page, Some(50));
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_cli_parses_stats_for_month() {
    let cli = Cli::parse_from(["wistia", "stats", "--month", "2", "--year", "2012"]);

    match cli.command {
        Command::Stats { date, month, year } => {
            assert_eq!(date, None);
            assert_eq!(month, Some(2));
            assert_eq!(year, Some(2012));
        }
        _ => panic!("Expected Stats command"),
    }
}

#[test]
fn test_cli_stats_month_requires_year() {
    let result = Cli::try_parse_from(["wistia", "stats", "--month", "2"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_stats_date_conflicts_with_month() {
    let result = Cli::try_parse_from([
        "wistia", "stats", "--date", "2012-10-12", "--month", "2", "--year", "2012",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_cli_parses_update_project_flags() {
    let cli = Cli::parse_from([
        "wistia",
        "update-project",
        "abc123",
        "--name",
        "Reel",
        "--public",
        "true",
        "--anonymous-upload",
        "false",
    ]);

    match cli.command {
        Command::UpdateProject {
            public_id,
            name,
            public,
            anonymous_upload,
            anonymous_download,
        } => {
            assert_eq!(public_id, "abc123");
            assert_eq!(name.as_deref(), Some("Reel"));
            assert_eq!(public, Some(true));
            assert_eq!(anonymous_upload, Some(false));
            assert_eq!(anonymous_download, None);
        }
        _ => panic!("Expected UpdateProject command"),
    }
}

#[test]
fn test_cli_json_flag_is_global() {
    let cli = Cli::parse_from(["wistia", "account", "--json"]);

    assert!(cli.json);
    assert!(matches!(cli.command, Command::Account));
}

#[test]
fn test_cli_api_key_flag() {
    let cli = Cli::parse_from(["wistia", "--api-key", "k123", "-vv", "dump"]);

    assert_eq!(cli.api_key.as_deref(), Some("k123"));
    assert_eq!(cli.verbose, 2);
    assert!(matches!(cli.command, Command::Dump));
}

#[test]
fn test_cli_rejects_unknown_entity() {
    let result = Cli::try_parse_from(["wistia", "get", "playlist", "x"]);
    assert!(result.is_err());
}
