//! Basic example demonstrating the Wistia API client.
//!
//! Run with:
//! ```
//! WISTIA_API_KEY=your-key cargo run --example basic
//! ```

use chrono::{Datelike, Utc};
use wistia::{Account, WistiaClient};

#[tokio::main]
async fn main() -> wistia::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating Wistia client...");
    let client = WistiaClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    let account = Account::with_client(client).await?;
    println!(
        "Account: {} ({})",
        account.name().unwrap_or("unnamed"),
        account.url().unwrap_or("no url")
    );

    // All-time, today and this month
    println!("\n--- Statistics ---");
    let stats = account.stats().await?;
    println!(
        "All time: {} loads, {} plays, {:.1} hours",
        stats.load_count, stats.play_count, stats.hours_watched
    );

    let today = Utc::now();
    let daily = account.daily_stats(today).await?;
    println!(
        "Today ({}): {} plays",
        daily.date.as_deref().unwrap_or("?"),
        daily.stats.play_count
    );

    let monthly = account.monthly_stats(today.month(), today.year()).await?;
    println!(
        "{} {} ({}): {} plays",
        monthly.month_name(),
        monthly.year(),
        monthly.range_label(),
        monthly.stats.play_count
    );

    // First page of projects, then one project's medias
    println!("\n--- Listing Projects (first page) ---");
    let page = account.projects_page(1, 10).await?;
    println!("Found {} projects", page.len());

    for project in &page {
        println!(
            "  - {} ({}): {} medias",
            project.name().unwrap_or("unnamed"),
            project.public_id().unwrap_or("?"),
            project.media_count()
        );
    }

    let mut projects = page.items;
    if let Some(project) = projects.first_mut() {
        println!("\n--- Medias of {} ---", project.name().unwrap_or("unnamed"));
        let medias = project.medias().await?.to_vec();

        for mut media in medias.into_iter().take(5) {
            let embed = media.embed_code().await?.len();
            println!(
                "  - {} [{}] {} bytes of embed code",
                media.name().unwrap_or("unnamed"),
                media.media_type().map_or("?", |t| t.as_str()),
                embed
            );
        }
    }

    println!("\nDone!");
    Ok(())
}
