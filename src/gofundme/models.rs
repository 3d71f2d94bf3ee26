//! Data model for an extraction run.

use serde::{Deserialize, Serialize};

/// Amounts found on a campaign page, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignTotals {
    /// Page the amounts were read from
    pub url: String,
    /// Cleaned amounts (commas removed), one per matching element
    pub amounts: Vec<String>,
}

impl CampaignTotals {
    /// Creates an empty result for the given URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), amounts: Vec::new() }
    }

    /// The displayed donation total: the first amount on the page.
    pub fn total(&self) -> Option<&str> {
        self.amounts.first().map(String::as_str)
    }

    /// Returns true if no amount was found.
    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    /// Returns the number of amounts found.
    pub fn count(&self) -> usize {
        self.amounts.len()
    }
}
