//! Wistia API client library.
//!
//! A Rust library for the Wistia video hosting REST API. An [`Account`]
//! owns the API key; the [`Project`]s and [`Media`]s it returns keep a
//! handle to the same client so they can load missing fields on demand.
//!
//! # Quick Start
//!
//! ```no_run
//! use wistia::Account;
//!
//! #[tokio::main]
//! async fn main() -> wistia::Result<()> {
//!     // Connect with WISTIA_API_KEY and load the account
//!     let account = Account::from_env().await?;
//!     println!("Account: {:?}", account.name());
//!
//!     // List projects, loading each one's medias
//!     for project in account.projects(true).await? {
//!         println!("{:?} ({} medias)", project.name(), project.media_count());
//!     }
//!
//!     // Totals for February 2012, summed from the per-day figures
//!     let month = account.monthly_stats(2, 2012).await?;
//!     println!("{} plays in {}", month.stats.play_count, month.month_name());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`WistiaClient`] sends authenticated requests and decodes JSON.
//! - [`Hydrate`] copies the JSON fields an entity knows about into it and
//!   drops the rest, so upstream additions never break decoding.
//! - [`Get`] and [`List`] fetch entities by ID or page by page.
//! - Statistics come back as [`Stats`], [`DailyStats`] and
//!   [`MonthlyStats`]; monthly figures are summed client-side.
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `WISTIA_API_KEY` (required) - Your Wistia API password
//! - `WISTIA_API_URL` (optional) - Base URL (defaults to `https://api.wistia.com/v1/`)

mod client;
mod error;
mod hydrate;
mod models;
mod pagination;
mod traits;

pub mod cli;
#[cfg(feature = "test-server")]
pub mod mock_server;
mod output;

// Re-export core types
pub use client::WistiaClient;
pub use error::{Result, WistiaError};
pub use hydrate::{expect_array, expect_object, Hydrate};
pub use output::PrettyPrint;
pub use pagination::{Page, PaginationParams, MAX_PER_PAGE};

// Re-export traits
pub use traits::{Get, List, DEFAULT_PAGE_SIZE};

// Re-export models
pub use models::{
    // Account
    Account,
    // Project types
    Project,
    ProjectListQuery,
    // Media types
    LoadState,
    Media,
    MediaListQuery,
    MediaType,
    // Stats types
    ByDateQuery,
    DailyStats,
    DateInput,
    MonthlyStats,
    Stats,
};

// Re-export date helpers
pub use models::{days_in_month, last_day_of_month};
