//! gofund-scraper - Fetch a fundraising campaign page and read its donation total
//!
//! One GET with browser emulation and a retry policy, then a fixed selector
//! and pattern over the returned HTML.

pub mod commands;
pub mod config;
pub mod format;
pub mod gofundme;

pub use config::Config;
pub use gofundme::models::CampaignTotals;
pub use gofundme::parser::extract_amounts;
