//! Best-effort headline scraping.
//!
//! Pulls one free-text news snippet for a symbol from the quote page and
//! extracts the first heading inside the headline list. This is fragile
//! to upstream markup changes and makes no contract beyond best effort:
//! every failure mode — network, parse, missing node — collapses into a
//! placeholder string at the display boundary. This is the only
//! component in the system permitted to swallow errors; its output is
//! supplementary to the analysis, never an input.

use scraper::{Html, Selector};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://finance.yahoo.com";
const HEADLINE_LIST_SELECTOR: &str = r#"ul[class="My(0) P(0) Wow(bw) Ov(h)"]"#;

/// Tagged outcome of a headline fetch.
///
/// Callers that only want display text should go through
/// [`Headline::display_text`]; the variants exist so tests and future
/// consumers can distinguish "no headline today" from "unreachable".
#[derive(Debug, Clone, PartialEq)]
pub enum Headline {
    Found(String),
    NotFound,
    FetchError(String),
}

impl Headline {
    /// Collapse the outcome into the string shown to the user.
    pub fn display_text(&self) -> String {
        match self {
            Headline::Found(text) => text.clone(),
            Headline::NotFound => "No recent headline found.".to_string(),
            Headline::FetchError(reason) => format!("Error fetching news: {reason}"),
        }
    }
}

/// Fetches one headline per symbol from the news page.
pub struct HeadlineFetcher {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HeadlineFetcher {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the fetcher at an alternate endpoint (used by tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent("Mozilla/5.0")
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetch the first headline for a symbol. Never returns an error and
    /// never panics; failures become [`Headline::FetchError`].
    pub fn fetch_headline(&self, symbol: &str) -> Headline {
        let url = format!(
            "{}/quote/{symbol}?p={symbol}&.tsrc=fin-srch",
            self.base_url
        );

        let body = match self.client.get(&url).send().and_then(|r| r.text()) {
            Ok(body) => body,
            Err(e) => return Headline::FetchError(e.to_string()),
        };

        extract_first_heading(&body)
    }
}

impl Default for HeadlineFetcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Find the first `h3` inside the headline list region.
fn extract_first_heading(body: &str) -> Headline {
    let document = Html::parse_document(body);

    let list_selector = match Selector::parse(HEADLINE_LIST_SELECTOR) {
        Ok(s) => s,
        Err(e) => return Headline::FetchError(format!("bad selector: {e:?}")),
    };
    let heading_selector = match Selector::parse("h3") {
        Ok(s) => s,
        Err(e) => return Headline::FetchError(format!("bad selector: {e:?}")),
    };

    let Some(section) = document.select(&list_selector).next() else {
        return Headline::NotFound;
    };

    match section.select(&heading_selector).next() {
        Some(heading) => {
            let text = heading.text().collect::<String>().trim().to_string();
            if text.is_empty() {
                Headline::NotFound
            } else {
                Headline::Found(text)
            }
        }
        None => Headline::NotFound,
    }
}
