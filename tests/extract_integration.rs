//! Integration tests for total extraction using fixture files.

use gofund_scraper::gofundme::parser::{extract_amounts, parse_campaign};

const CAMPAIGN_FIXTURE: &str = include_str!("fixtures/campaign.html");
const DYNAMIC_FIXTURE: &str = include_str!("fixtures/dynamic.html");

#[test]
fn test_extract_campaign_fixture() {
    let amounts = extract_amounts(CAMPAIGN_FIXTURE);

    // "312 donations" and "Thanks everyone" carry no amount; the bare
    // hrt-font-bold span lacks the other two classes.
    assert_eq!(amounts, vec!["12345", "500"]);
}

#[test]
fn test_campaign_total_is_first_match() {
    let totals = parse_campaign(CAMPAIGN_FIXTURE, "https://gofund.me/ff8591f9f");
    assert_eq!(totals.total(), Some("12345"));
    assert_eq!(totals.count(), 2);
}

#[test]
fn test_dynamic_page_yields_nothing() {
    let totals = parse_campaign(DYNAMIC_FIXTURE, "https://gofund.me/ff8591f9f");
    assert!(totals.is_empty());
    assert_eq!(totals.total(), None);
}

#[test]
fn test_extraction_is_idempotent() {
    let first = extract_amounts(CAMPAIGN_FIXTURE);
    let second = extract_amounts(CAMPAIGN_FIXTURE);
    assert_eq!(first, second);
}
