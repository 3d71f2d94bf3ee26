//! Donation total command: fetch the campaign page once and report its total.

use crate::config::Config;
use crate::format::Formatter;
use crate::gofundme::{parser, CampaignClient, CampaignTotals, PageFetch};
use anyhow::{Context, Result};
use tracing::{info, warn};

/// Fetches the configured campaign page and extracts the donation total.
pub struct TotalCommand {
    config: Config,
}

impl TotalCommand {
    /// Creates a new total command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Fetches the page and returns formatted output.
    pub async fn execute(&self) -> Result<String> {
        let client = CampaignClient::new(&self.config).context("Failed to create HTTP client")?;

        self.execute_with_client(&client).await
    }

    /// Fetches the page with a provided client (for testing).
    pub async fn execute_with_client(&self, client: &impl PageFetch) -> Result<String> {
        let totals = self.extract_with_client(client).await?;

        let formatter = Formatter::new(self.config.format).with_all(self.config.all);
        formatter.format_totals(&totals)
    }

    /// Fetches and parses the page without formatting.
    pub async fn extract_with_client(&self, client: &impl PageFetch) -> Result<CampaignTotals> {
        let url = self.config.url.as_str();
        let html = client.fetch(url).await?;
        let totals = parser::parse_campaign(&html, url);

        match totals.total() {
            Some(total) => info!("Donation total: {} ({} match(es))", total, totals.count()),
            None => warn!("No donation total found on {}", url),
        }

        Ok(totals)
    }
}
