//! CLI administration tool for overmind-shortener.
//!
//! Manages short links and checks the database without going through the
//! HTTP API or its admin guard.
//!
//! # Usage
//!
//! ```bash
//! # List the 20 most recent links
//! cargo run --bin admin -- links list --limit 20
//!
//! # Create a link with a generated or custom code
//! cargo run --bin admin -- links create https://example.com
//! cargo run --bin admin -- links create https://example.com --code Ab12
//!
//! # Delete a link
//! cargo run --bin admin -- links delete Ab12
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Reads the same variables as the server; see `overmind_shortener::config`.

use overmind_shortener::application::services::{DEFAULT_LIST_LIMIT, LinkService};
use overmind_shortener::config::{self, Config};
use overmind_shortener::infrastructure::persistence::{SqliteLinkRepository, pool};
use overmind_shortener::utils::url_safety::check_url_safety;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::SqlitePool;
use std::sync::Arc;

/// CLI tool for managing overmind-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage short links
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// List the most recently created links
    List {
        /// Maximum number of links to show
        #[arg(short, long, default_value_t = DEFAULT_LIST_LIMIT)]
        limit: i64,
    },

    /// Create a short link
    Create {
        /// Long URL to shorten (prompted for if omitted)
        url: Option<String>,

        /// Custom 4-character code (generated if omitted)
        #[arg(short, long)]
        code: Option<String>,
    },

    /// Delete a short link
    Delete {
        /// Code of the link to delete
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection and count links
    Check,
}

type Service = LinkService<SqliteLinkRepository>;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    let db = pool::connect(&config.database_url, config.pool_settings())
        .await
        .context("Failed to connect to database")?;
    pool::migrate(&db)
        .await
        .context("Failed to apply migrations")?;

    match cli.command {
        Commands::Links { action } => handle_link_action(action, &db, &config).await?,
        Commands::Db { action } => handle_db_action(action, &db).await?,
    }

    db.close().await;
    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, db: &SqlitePool, config: &Config) -> Result<()> {
    let repo = Arc::new(SqliteLinkRepository::new(Arc::new(db.clone())));
    let service = LinkService::new(repo, config.site_url.clone());

    match action {
        LinkAction::List { limit } => list_links(&service, limit).await?,
        LinkAction::Create { url, code } => create_link(&service, url, code).await?,
        LinkAction::Delete { code, yes } => delete_link(&service, code, yes).await?,
    }

    Ok(())
}

/// Lists recent links, newest first.
///
/// # Output Format
///
/// ```text
/// 📋 Links
///
///   Code  Clicks   Created            URL
///   ───────────────────────────────────────────────────────────
///   Ab12  3        2025-01-15 10:30   https://example.com
/// ```
async fn list_links(service: &Service, limit: i64) -> Result<()> {
    println!("{}", "📋 Links".bright_blue().bold());
    println!();

    let links = service
        .list(limit)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        println!(
            "  Create one with: {} admin links create <URL>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<5} {:<8} {:<18} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        let created = link
            .created_at_utc()
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());

        println!(
            "  {:<5} {:<8} {:<18} {}",
            link.code.cyan(),
            link.clicks.to_string().bright_green(),
            created.bright_black(),
            link.long_url
        );
    }

    println!();
    println!("  Shown: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Creates a short link after the same URL safety check the API applies.
async fn create_link(service: &Service, url: Option<String>, code: Option<String>) -> Result<()> {
    println!("{}", "🔗 Create Short Link".bright_blue().bold());
    println!();

    let long_url = match url {
        Some(u) => u,
        None => Input::new().with_prompt("Long URL").interact_text()?,
    };

    check_url_safety(&long_url).map_err(|e| anyhow::anyhow!("Rejected URL: {}", e))?;

    let link = service
        .create(long_url, code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!("{}", "✅ Link created successfully!".green().bold());
    println!();
    println!("  Code:      {}", link.code.cyan().bold());
    println!("  Short URL: {}", service.short_url(&link.code).bright_yellow());
    println!("  Long URL:  {}", link.long_url);
    println!();

    Ok(())
}

/// Deletes a link with confirmation prompt (default: No).
async fn delete_link(service: &Service, code: String, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑  Delete Short Link".bright_blue().bold());
    println!();

    let link = service
        .peek(&code)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Link not found")?;

    println!("  Code:   {}", link.code.cyan());
    println!("  URL:    {}", link.long_url);
    println!("  Clicks: {}", link.clicks.to_string().bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let deleted = service
        .delete(&code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    if deleted {
        println!("{}", "✅ Link deleted".green().bold());
    } else {
        println!("{}", "⚠️  Link was already gone".yellow());
    }
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, db: &SqlitePool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            let version: String = sqlx::query_scalar("SELECT sqlite_version()")
                .fetch_one(db)
                .await?;
            let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
                .fetch_one(db)
                .await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  SQLite: {}", version.bright_white());
            println!("  Links:  {}", links.to_string().bright_green().bold());
        }
    }

    Ok(())
}
