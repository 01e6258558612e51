mod commands;
mod output;

use std::time::Duration;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use yadisk_api::{CancellationToken, Client, Context};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "yadisk")]
#[command(about = "Inspect a Yandex.Disk account through the REST API")]
struct Cli {
    /// OAuth access token
    #[arg(long, env = "YADISK_TOKEN", hide_env_values = true)]
    token: String,

    /// API base URL (defaults to the public Yandex.Disk API)
    #[arg(long, env = "YADISK_BASE_URL")]
    base_url: Option<String>,

    /// Give up on the request after this many seconds
    #[arg(long, default_value = "30", global = true)]
    timeout: u64,

    /// Output format: table, json, csv, or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show quota, usage, and system folders
    Disk,
    /// Show metadata of a file or folder
    Resource(commands::resource::ResourceArgs),
    /// Print the raw response body of a GET request
    Raw(commands::raw::RawArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("yadisk_api=info,yadisk_cli=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        "csv" => OutputFormat::Csv,
        "md" | "markdown" => OutputFormat::Markdown,
        _ => OutputFormat::Table,
    };

    let client = match &cli.base_url {
        Some(url) => Client::with_base_url(url, &cli.token),
        None => Client::new(&cli.token),
    }
    .context("Failed to create API client")?;

    let token = CancellationToken::new();
    let ctx = Context::background()
        .with_cancellation(token.clone())
        .with_timeout(Duration::from_secs(cli.timeout));
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupted, cancelling request");
            token.cancel();
        }
    });

    match &cli.command {
        Commands::Disk => commands::disk::run(&client, &ctx, &format).await?,
        Commands::Resource(args) => commands::resource::run(args, &client, &ctx, &format).await?,
        Commands::Raw(args) => commands::raw::run(args, &client, &ctx).await?,
    }

    Ok(())
}
