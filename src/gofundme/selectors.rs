//! CSS selectors and text patterns for campaign page parsing.
//!
//! The donation total is styled with a fixed trio of utility classes. If the
//! site changes its markup, extraction quietly returns nothing; update the
//! selector here and add a fixture under `tests/fixtures/`.

use regex_lite::Regex;
use scraper::Selector;
use std::sync::LazyLock;

/// Element carrying the displayed donation total.
pub static TOTAL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".hrt-text-body-lg.hrt-font-bold.hrt-mb-0").unwrap());

/// Shortest run between a `$` and the next `r` (as in "$5,342 raised").
pub static DOLLAR_AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\$(.*?)r").unwrap());
