//! gofund-scraper - Fetch a fundraising campaign page and print its donation total.

use anyhow::Result;
use clap::Parser;
use gofund_scraper::commands::TotalCommand;
use gofund_scraper::config::{Config, OutputFormat};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "gofund-scraper",
    version,
    about = "Print the donation total shown on a fundraising campaign page",
    long_about = "Fetches a campaign page once (with retries and browser emulation) and prints \
                  the first dollar amount found in its donation total element."
)]
struct Cli {
    /// Campaign page URL
    #[arg(long, env = "GOFUND_URL")]
    url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Pause after a successful response in milliseconds
    #[arg(long)]
    delay: Option<u64>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, env = "GOFUND_PROXY")]
    proxy: Option<String>,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Print every matched amount, not just the first
    #[arg(short, long)]
    all: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only the result
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    if let Some(url) = cli.url {
        config.url = url;
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }
    if let Some(delay) = cli.delay {
        config.politeness_delay_ms = delay;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }
    if let Some(format) = cli.format {
        config.format = format;
    }
    if cli.all {
        config.all = true;
    }

    let cmd = TotalCommand::new(config);
    let output = cmd.execute().await?;
    println!("{}", output);

    Ok(())
}
