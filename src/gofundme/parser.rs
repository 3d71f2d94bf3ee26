//! HTML extraction of the donation total from a campaign page.

use crate::gofundme::models::CampaignTotals;
use crate::gofundme::selectors::{DOLLAR_AMOUNT, TOTAL};
use scraper::{ElementRef, Html};
use tracing::{debug, trace};

/// Parses a campaign page into its list of displayed amounts.
pub fn parse_campaign(html: &str, url: &str) -> CampaignTotals {
    let mut totals = CampaignTotals::new(url);
    totals.amounts = extract_amounts(html);

    debug!("Extracted {} amount(s) from {}", totals.count(), url);
    totals
}

/// Extracts cleaned dollar amounts from every total element, in document order.
///
/// Elements whose text has no `$ ... r` run are skipped. A page rendered
/// client-side yields an empty list.
pub fn extract_amounts(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    document
        .select(&TOTAL)
        .filter_map(|element| {
            let text = stripped_text(element);
            trace!("Candidate text: {:?}", text);
            clean_amount(&text)
        })
        .collect()
}

/// Visible text with every text node trimmed and empty nodes dropped.
///
/// Text inside `<script>` and `<style>` is not visible and is skipped.
pub fn stripped_text(element: ElementRef) -> String {
    element
        .descendants()
        .filter(|node| !node.ancestors().filter_map(ElementRef::wrap).any(is_hidden))
        .filter_map(|node| node.value().as_text().map(|text| text.trim()))
        .filter(|s| !s.is_empty())
        .collect()
}

fn is_hidden(element: ElementRef) -> bool {
    matches!(element.value().name(), "script" | "style")
}

/// Captures the text between `$` and the next `r`, minus whitespace and commas.
pub fn clean_amount(text: &str) -> Option<String> {
    let caps = DOLLAR_AMOUNT.captures(text)?;
    Some(caps.get(1)?.as_str().trim().replace(',', ""))
}
