//! CLI administration tool for link-minimizer.
//!
//! Runs short URL operations directly against the configured storage and
//! cache, without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL
//! cargo run --bin admin -- shorten https://example.com/some/long/path
//!
//! # Show a short code with its click count
//! cargo run --bin admin -- info aB3xY
//!
//! # Check storage and cache connectivity
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server, see [`link_minimizer::config`].

use link_minimizer::api::dto::short_url::UrlPayload;
use link_minimizer::application::services::ShortUrlService;
use link_minimizer::config::{self, Config};
use link_minimizer::server::{build_cache, build_repository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use validator::Validate;

/// CLI tool for managing link-minimizer.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Create (or reuse) a short code for a URL
    Shorten {
        /// Absolute http(s) URL to shorten
        url: String,
    },

    /// Show the record behind a short code
    Info {
        /// Short code to look up
        code: String,
    },

    /// Storage operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Storage diagnostic subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check storage and cache connectivity
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Failed to load configuration")?;

    match cli.command {
        Commands::Shorten { url } => shorten(&config, url).await?,
        Commands::Info { code } => info(&config, &code).await?,
        Commands::Db { action } => handle_db_action(action, &config).await?,
    }

    Ok(())
}

async fn build_service(config: &Config) -> Result<ShortUrlService> {
    let repository = build_repository(config).await?;
    let cache = build_cache(config).await;

    Ok(ShortUrlService::new(
        repository,
        cache,
        config.short_url_settings(),
    ))
}

/// Shortens `url`, printing the resulting code.
async fn shorten(config: &Config, url: String) -> Result<()> {
    println!("{}", "🔗 Shorten URL".bright_blue().bold());
    println!();

    let payload = UrlPayload { long_url: url };
    if let Err(e) = payload.validate() {
        println!("{}", "❌ Invalid URL".red().bold());
        println!("  {}", e.to_string().bright_black());
        anyhow::bail!("Invalid URL: {}", payload.long_url);
    }

    let service = build_service(config).await?;
    let short_url = service
        .create(&payload.long_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to shorten URL: {}", e))?;

    println!("  Long URL:   {}", short_url.long_url.cyan());
    println!(
        "  Short code: {}",
        short_url.short_code.bright_yellow().bold()
    );
    println!();
    println!("{}", "✅ Done".green().bold());
    println!();

    Ok(())
}

/// Prints the record behind `code`.
async fn info(config: &Config, code: &str) -> Result<()> {
    println!("{}", "ℹ️  Short URL".bright_blue().bold());
    println!();

    let service = build_service(config).await?;
    let short_url = service
        .get_by_short_code(code)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    let Some(short_url) = short_url else {
        println!("{}", "  Short code not found".yellow());
        println!();
        return Ok(());
    };

    println!("  ID:         {}", short_url.id.to_string().bright_black());
    println!(
        "  Short code: {}",
        short_url.short_code.bright_yellow().bold()
    );
    println!("  Long URL:   {}", short_url.long_url.cyan());
    println!(
        "  Clicks:     {}",
        short_url.click_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles storage diagnostic commands.
async fn handle_db_action(action: DbAction, config: &Config) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking storage connection...".bright_blue());

            let repository = build_repository(config).await?;
            repository
                .ping()
                .await
                .map_err(|e| anyhow::anyhow!("Storage check failed: {}", e))?;
            println!(
                "{}",
                format!("✅ Storage connection OK ({})", config.storage_backend)
                    .green()
                    .bold()
            );

            let cache = build_cache(config).await;
            if cache.health_check().await {
                println!(
                    "{}",
                    format!("✅ Cache OK ({})", cache.backend_name())
                        .green()
                        .bold()
                );
            } else {
                println!(
                    "{}",
                    format!("⚠️  Cache unavailable ({})", cache.backend_name()).yellow()
                );
            }
        }
    }

    Ok(())
}
