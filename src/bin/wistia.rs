//! Wistia API CLI binary.
//!
//! A command-line interface for interacting with the Wistia API.

use std::process::ExitCode;

use chrono::{Datelike, Utc};
use clap::Parser;
use serde::Serialize;
use tabled::{Table, Tabled};
use tracing::Level;
use wistia::cli::{Cli, Command, Entity};
use wistia::{
    Account, Get, List, Media, MediaListQuery, Page, PrettyPrint, Project, ProjectListQuery,
    WistiaClient, WistiaError,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let client = match build_client(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set WISTIA_API_KEY environment variable or pass --api-key");
            return ExitCode::FAILURE;
        }
    };

    match run(client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn build_client(cli: &Cli) -> wistia::Result<WistiaClient> {
    let api_key = cli
        .api_key
        .as_deref()
        .ok_or_else(|| WistiaError::ConfigMissing("no API key given".to_string()))?;

    match cli.api_url.as_deref() {
        Some(url) => WistiaClient::new(api_key, url),
        None => WistiaClient::with_api_key(api_key),
    }
}

async fn run(client: WistiaClient, cli: Cli) -> wistia::Result<()> {
    let json = cli.json;
    match cli.command {
        Command::Account => {
            let account = Account::with_client(client).await?;
            output_single(&account, json)
        }
        Command::Dump => handle_dump(client, json).await,
        Command::Get { entity, id } => handle_get(&client, entity, &id, json).await,
        Command::List {
            entity,
            page,
            per_page,
            recursive,
        } => handle_list(&client, entity, page, per_page, recursive, json).await,
        Command::Stats { date, month, year } => {
            handle_stats(client, date, month.zip(year), json).await
        }
        Command::CreateProject { name } => {
            let account = Account::with_client(client).await?;
            let project = account.create_project(&name).await?;
            output_single(&project, json)
        }
        Command::UpdateProject {
            public_id,
            name,
            public,
            anonymous_upload,
            anonymous_download,
        } => {
            let mut project = Project::get(&client, public_id).await?;
            if let Some(name) = name {
                project.set_name(name);
            }
            if let Some(public) = public {
                project.set_public(public);
            }
            if let Some(allowed) = anonymous_upload {
                project.set_anonymous_can_upload(allowed);
            }
            if let Some(allowed) = anonymous_download {
                project.set_anonymous_can_download(allowed);
            }
            let response = project.save().await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Command::Delete { entity, id } => {
            let response = match entity {
                Entity::Project => Project::get(&client, id).await?.delete().await?,
                Entity::Media => Media::get(&client, id).await?.delete().await?,
            };
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Command::Uploader { public_id } => {
            let project = Project::get(&client, public_id).await?;
            print!("{}", project.uploader_code());
            Ok(())
        }
    }
}

async fn handle_dump(client: WistiaClient, json: bool) -> wistia::Result<()> {
    let account = Account::with_client(client).await?;
    let today = Utc::now();

    let stats = account.stats().await?;
    let daily = account.daily_stats(today).await?;
    let monthly = account.monthly_stats(today.month(), today.year()).await?;
    let projects = account.projects(true).await?;

    if json {
        let dump = serde_json::json!({
            "account": account,
            "stats": stats,
            "daily_stats": daily,
            "monthly_stats": monthly,
            "projects": projects,
        });
        println!("{}", serde_json::to_string_pretty(&dump)?);
        return Ok(());
    }

    println!("{}\n", account.pretty_print());
    println!("{}\n", stats.pretty_print());
    println!("{}\n", daily.pretty_print());
    println!("{}\n", monthly.pretty_print());
    for project in &projects {
        println!("{}\n", project.pretty_print());
    }
    Ok(())
}

async fn handle_get(
    client: &WistiaClient,
    entity: Entity,
    id: &str,
    json: bool,
) -> wistia::Result<()> {
    match entity {
        Entity::Project => {
            let project = Project::get(client, id.to_string()).await?;
            output_single(&project, json)
        }
        Entity::Media => {
            let mut media = Media::get(client, id.to_string()).await?;
            media.embed_code().await?;
            output_single(&media, json)
        }
    }
}

async fn handle_list(
    client: &WistiaClient,
    entity: Entity,
    page: Option<u32>,
    per_page: Option<u32>,
    recursive: bool,
    json: bool,
) -> wistia::Result<()> {
    // A page size alone means the first page of that size
    let page = page.or(per_page.map(|_| 1));
    let per_page = per_page.unwrap_or(wistia::DEFAULT_PAGE_SIZE);

    match entity {
        Entity::Project => {
            let query = ProjectListQuery::default();
            let (mut projects, footer) = match page {
                Some(page) => {
                    let page = Project::list_page(client, &query, page, per_page).await?;
                    let footer = page_footer(&page);
                    (page.items, footer)
                }
                None => {
                    let items = Project::list_all(client, &query).await?;
                    let footer = format!("{} total items", items.len());
                    (items, footer)
                }
            };
            if recursive {
                for project in &mut projects {
                    project.medias().await?;
                }
            }
            output_list(&projects, &footer, json, |p| ProjectRow::from(p))
        }
        Entity::Media => {
            let query = MediaListQuery::default();
            let (medias, footer) = match page {
                Some(page) => {
                    let page = Media::list_page(client, &query, page, per_page).await?;
                    let footer = page_footer(&page);
                    (page.items, footer)
                }
                None => {
                    let items = Media::list_all(client, &query).await?;
                    let footer = format!("{} total items", items.len());
                    (items, footer)
                }
            };
            output_list(&medias, &footer, json, |m| MediaRow::from(m))
        }
    }
}

async fn handle_stats(
    client: WistiaClient,
    date: Option<String>,
    month: Option<(u32, i32)>,
    json: bool,
) -> wistia::Result<()> {
    let account = Account::with_client(client).await?;
    match (date, month) {
        (Some(date), _) => output_single(&account.daily_stats(date).await?, json),
        (None, Some((month, year))) => {
            output_single(&account.monthly_stats(month, year).await?, json)
        }
        (None, None) => output_single(&account.stats().await?, json),
    }
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> wistia::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn page_footer<T>(page: &Page<T>) -> String {
    if page.has_more {
        format!("Page {} (more available)", page.page)
    } else {
        format!("Page {} (end)", page.page)
    }
}

fn output_list<T, R, F>(items: &[T], footer: &str, json: bool, to_row: F) -> wistia::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else {
        let rows: Vec<R> = items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
        println!("\n{footer}");
    }
    Ok(())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct ProjectRow {
    public_id: String,
    name: String,
    medias: u64,
    public: bool,
}

impl From<&Project> for ProjectRow {
    fn from(p: &Project) -> Self {
        Self {
            public_id: p.public_id().unwrap_or_default().to_string(),
            name: p.name().unwrap_or_default().to_string(),
            medias: p.media_count(),
            public: p.is_public(),
        }
    }
}

#[derive(Tabled)]
struct MediaRow {
    hashed_id: String,
    #[tabled(rename = "type")]
    media_type: String,
    name: String,
    duration: String,
}

impl From<&Media> for MediaRow {
    fn from(m: &Media) -> Self {
        Self {
            hashed_id: m.hashed_id().unwrap_or_default().to_string(),
            media_type: m.media_type().map(|t| t.to_string()).unwrap_or_default(),
            name: m.name().unwrap_or_default().to_string(),
            duration: m
                .duration()
                .map(|d| format!("{d:.1}s"))
                .unwrap_or_default(),
        }
    }
}
