//! Output formatting for extracted totals (plain text, JSON).

use crate::config::OutputFormat;
use crate::gofundme::CampaignTotals;
use anyhow::{Context, Result};
use serde::Serialize;

/// Printed when the page has no total element with an amount.
pub const NO_MATCH_MESSAGE: &str =
    "No matches found. The content may be rendered dynamically with JavaScript.";

/// Printed in place of the absent value.
pub const NO_VALUE: &str = "None";

#[derive(Serialize)]
struct JsonReport<'a> {
    url: &'a str,
    total: Option<&'a str>,
    amounts: &'a [String],
}

/// Formats extraction results for output.
pub struct Formatter {
    format: OutputFormat,
    all: bool,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format, all: false }
    }

    /// Lists every amount rather than only the total (text output).
    pub fn with_all(mut self, all: bool) -> Self {
        self.all = all;
        self
    }

    /// Formats the result of one extraction run.
    pub fn format_totals(&self, totals: &CampaignTotals) -> Result<String> {
        match self.format {
            OutputFormat::Text => Ok(self.text(totals)),
            OutputFormat::Json => self.json(totals),
        }
    }

    fn text(&self, totals: &CampaignTotals) -> String {
        match totals.total() {
            None => format!("{}\n{}", NO_MATCH_MESSAGE, NO_VALUE),
            Some(_) if self.all => totals.amounts.join("\n"),
            Some(total) => total.to_string(),
        }
    }

    fn json(&self, totals: &CampaignTotals) -> Result<String> {
        let report =
            JsonReport { url: &totals.url, total: totals.total(), amounts: &totals.amounts };
        serde_json::to_string_pretty(&report).context("Failed to serialize totals as JSON")
    }
}
