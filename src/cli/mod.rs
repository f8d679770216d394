//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the wistia binary.

use clap::{Parser, Subcommand, ValueEnum};

/// Wistia API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "wistia", about = "Wistia API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Wistia API password.
    #[arg(long, global = true, env = "WISTIA_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Override the API base URL.
    #[arg(long, global = true, env = "WISTIA_API_URL")]
    pub api_url: Option<String>,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the account the API key belongs to.
    Account,

    /// Print the account, its all-time, daily and monthly stats, and every
    /// project with its medias.
    Dump,

    /// Get a single entity by ID.
    Get {
        /// The type of entity to get.
        entity: Entity,

        /// Public ID (projects) or numeric/hashed ID (medias).
        id: String,
    },

    /// List entities.
    List {
        /// The type of entity to list.
        entity: Entity,

        /// Page number (1-indexed). Without it or --per-page, every page is fetched.
        #[arg(long)]
        page: Option<u32>,

        /// Number of items per page (max 100).
        #[arg(long)]
        per_page: Option<u32>,

        /// Load each project's medias as well.
        #[arg(long)]
        recursive: bool,
    },

    /// Show account statistics: all-time, one day, or one month.
    Stats {
        /// A day (YYYY-MM-DD, RFC 3339 or Unix seconds).
        #[arg(long, conflicts_with_all = ["month", "year"])]
        date: Option<String>,

        /// Month number, 1-12.
        #[arg(long, requires = "year")]
        month: Option<u32>,

        /// Year of the month.
        #[arg(long, requires = "month")]
        year: Option<i32>,
    },

    /// Create a project.
    CreateProject {
        /// Name of the new project.
        name: String,
    },

    /// Update a project's name or access flags.
    UpdateProject {
        /// Public ID of the project.
        public_id: String,

        /// New name.
        #[arg(long)]
        name: Option<String>,

        /// Whether anonymous users can view the project.
        #[arg(long)]
        public: Option<bool>,

        /// Whether anonymous users can upload.
        #[arg(long)]
        anonymous_upload: Option<bool>,

        /// Whether anonymous users can download.
        #[arg(long)]
        anonymous_download: Option<bool>,
    },

    /// Delete an entity.
    Delete {
        /// The type of entity to delete.
        entity: Entity,

        /// Public ID (projects) or hashed ID (medias).
        id: String,
    },

    /// Print the upload widget HTML for a project.
    Uploader {
        /// Public ID of the project.
        public_id: String,
    },
}

/// Entity types that can be operated on.
#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum Entity {
    /// A Wistia project.
    #[value(alias = "projects")]
    Project,
    /// A media file.
    #[value(alias = "medias")]
    Media,
}
