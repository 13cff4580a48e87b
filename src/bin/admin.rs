//! CLI administration tool for url-keyspace.
//!
//! Inspects and manages short URLs and their metrics directly against the
//! database, without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Show the key a URL gets for an owner (no database needed)
//! cargo run --bin admin -- key derive https://example.com --owner u1
//!
//! # List an owner's short URLs
//! cargo run --bin admin -- links list --owner u1 --limit 20
//!
//! # Delete a short URL
//! cargo run --bin admin -- links delete EAaArVR --owner u1
//!
//! # Metrics
//! cargo run --bin admin -- metrics performance EAaArVR
//! cargo run --bin admin -- metrics top --owner u1
//!
//! # Database checks
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server (see `url_keyspace::config`); `DATABASE_URL` is required
//! for every command except `key derive`.

use url_keyspace::application::services::{CreationService, MetricsCollector};
use url_keyspace::config::{self, Config, mask_connection_string};
use url_keyspace::infrastructure::cache::connect_cache;
use url_keyspace::infrastructure::persistence::{PgMetricsRepository, PgUrlRepository};
use url_keyspace::server::connect_pool;
use url_keyspace::utils::key_deriver::{DEFAULT_KEY_LENGTH, KeyDeriver};
use url_keyspace::utils::url_validator::validate_url;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::mpsc;

/// CLI tool for managing url-keyspace.
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
    /// Key derivation
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },

    /// Manage short URLs
    Links {
        #[command(subcommand)]
        action: LinksAction,
    },

    /// Resolution metrics
    Metrics {
        #[command(subcommand)]
        action: MetricsAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum KeyAction {
    /// Print the key derived for a URL and owner
    Derive {
        url: String,

        #[arg(short, long)]
        owner: String,

        /// Key length (defaults to KEY_LENGTH or 7)
        #[arg(short, long)]
        length: Option<usize>,
    },
}

#[derive(Subcommand)]
enum LinksAction {
    /// List an owner's short URLs, newest first
    List {
        #[arg(short, long)]
        owner: String,

        #[arg(short, long, default_value_t = 10)]
        limit: i64,

        #[arg(long, default_value_t = 0)]
        offset: i64,
    },

    /// Delete one of an owner's short URLs
    Delete {
        key: String,

        #[arg(short, long)]
        owner: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum MetricsAction {
    /// Hits, unique clients and mean latency of a key
    Performance { key: String },

    /// An owner's most resolved keys
    Top {
        #[arg(short, long)]
        owner: String,

        #[arg(short, long, default_value_t = 5)]
        limit: i64,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info and table sizes
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Commands::Key {
        action: KeyAction::Derive { url, owner, length },
    } = &cli.command
    {
        return derive_key(url, owner, *length);
    }

    let config = config::load_from_env().context("Failed to load configuration")?;
    let pool = connect_pool(&config).await?;

    match cli.command {
        Commands::Key { .. } => {}
        Commands::Links { action } => handle_links_action(action, &config, &pool).await?,
        Commands::Metrics { action } => handle_metrics_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &config, &pool).await?,
    }

    pool.close().await;
    Ok(())
}

fn derive_key(url: &str, owner: &str, length: Option<usize>) -> Result<()> {
    let length = length
        .or_else(|| std::env::var("KEY_LENGTH").ok()?.parse().ok())
        .unwrap_or(DEFAULT_KEY_LENGTH);
    let deriver = KeyDeriver::new(length).map_err(|e| anyhow::anyhow!("{}", e))?;
    let url = validate_url(url).context("Invalid URL")?;

    println!("{}", "🔑 Derived key".bright_blue().bold());
    println!("  URL:   {}", url.cyan());
    println!("  Owner: {}", owner.cyan());
    println!("  Key:   {}", deriver.derive(&url, owner).bright_yellow().bold());

    Ok(())
}

async fn handle_links_action(action: LinksAction, config: &Config, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgUrlRepository::new(Arc::new(pool.clone())));
    let cache = connect_cache(config).await;
    let deriver = KeyDeriver::new(config.key_length).map_err(|e| anyhow::anyhow!("{}", e))?;
    let service = CreationService::new(repo, cache, deriver);

    match action {
        LinksAction::List {
            owner,
            limit,
            offset,
        } => {
            let page = service
                .list(&owner, limit, offset)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to list short URLs: {}", e))?;

            println!(
                "{} {}",
                "📋 Short URLs of".bright_blue().bold(),
                owner.cyan().bold()
            );
            println!();

            if page.items.is_empty() {
                println!("{}", "  No short URLs found".yellow());
                return Ok(());
            }

            println!(
                "  {:<17} {:<20} {}",
                "Key".bright_white().bold(),
                "Created".bright_white().bold(),
                "Original URL".bright_white().bold()
            );
            println!("  {}", "─".repeat(75).bright_black());

            for record in &page.items {
                println!(
                    "  {:<17} {:<20} {}",
                    record.key.bright_yellow(),
                    record
                        .created_at
                        .format("%Y-%m-%d %H:%M")
                        .to_string()
                        .bright_black(),
                    record.original_url
                );
            }

            println!();
            println!(
                "  Showing {}-{} of {}",
                offset + 1,
                offset + page.items.len() as i64,
                page.total.to_string().bright_white().bold()
            );
        }
        LinksAction::Delete { key, owner, yes } => {
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Delete {} and its metrics?", key))
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }

            let deleted = service
                .delete(&key, &owner)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to delete: {}", e))?;

            if deleted {
                println!("{}", "✅ Short URL deleted".green().bold());
            } else {
                println!(
                    "{}",
                    format!("⚠️  No short URL {} owned by {}", key, owner).yellow()
                );
            }
        }
    }

    Ok(())
}

async fn handle_metrics_action(action: MetricsAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgMetricsRepository::new(Arc::new(pool.clone())));
    // Read-only use: nothing is ever recorded through this collector.
    let (tx, _rx) = mpsc::channel(1);
    let collector = MetricsCollector::new(repo, tx);

    match action {
        MetricsAction::Performance { key } => {
            let perf = collector
                .performance(&key)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to load metrics: {}", e))?;

            println!("{} {}", "📊 Performance of".bright_blue().bold(), key.cyan());
            println!();
            println!(
                "  Hits:           {}",
                perf.total_hits.to_string().bright_green().bold()
            );
            println!(
                "  Unique clients: {}",
                perf.unique_clients.to_string().bright_green().bold()
            );
            println!(
                "  Avg response:   {}",
                match perf.avg_response_time {
                    Some(ms) => format!("{:.2} ms", ms).bright_green().bold(),
                    None => "n/a".bright_black(),
                }
            );
        }
        MetricsAction::Top { owner, limit } => {
            let top = collector
                .top_keys(&owner, limit)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to load metrics: {}", e))?;

            println!("{} {}", "🏆 Top keys of".bright_blue().bold(), owner.cyan());
            println!();

            if top.is_empty() {
                println!("{}", "  No resolutions recorded".yellow());
            }

            for (rank, entry) in top.iter().enumerate() {
                println!(
                    "  {:>2}. {:<17} {}",
                    rank + 1,
                    entry.key.bright_yellow(),
                    entry.hit_count.to_string().bright_green().bold()
                );
            }
        }
    }

    println!();
    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, config: &Config, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").execute(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;
            let urls: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
                .fetch_one(pool)
                .await?;
            let events: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM metrics")
                .fetch_one(pool)
                .await?;

            println!(
                "  Database:      {}",
                mask_connection_string(&config.database_url).bright_white()
            );
            println!("  PostgreSQL:    {}", version.bright_white());
            println!("  Short URLs:    {}", urls.to_string().bright_green().bold());
            println!(
                "  Metric events: {}",
                events.to_string().bright_green().bold()
            );
            println!();
        }
    }

    Ok(())
}
