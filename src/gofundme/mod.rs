//! Campaign page fetching, parsing, and data models.

pub mod client;
pub mod models;
pub mod parser;
pub mod retry;
pub mod selectors;
pub mod sleep;

pub use client::{CampaignClient, FetchError, PageFetch};
pub use models::CampaignTotals;
pub use retry::RetryPolicy;
pub use sleep::{Pause, RecordingSleeper, Sleeper, TokioSleeper};
