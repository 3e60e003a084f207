//! Table-limit scrapers.
//!
//! Defines the `PageFetcher` and `TableLimitSource` traits and provides
//! sources for two public pages that publish roulette table limits:
//! - livedealer.org: live-casino limits table, one max bet per row
//! - roulette77.us: betting-limits explainer, max bets in its last row
//!
//! Fetching and extraction are split so extraction can be tested on
//! fixture HTML. Neither source has any data dependency on the simulators.

pub mod livedealer;
pub mod roulette77;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use scraper::Selector;
use tracing::{debug, info, warn};

use crate::config::ScraperConfig;
use crate::types::{ScrapeError, SimError, TableLimit};

pub use livedealer::LiveDealerSource;
pub use roulette77::Roulette77Source;

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// Abstraction over HTTP page retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the page body as text.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// A page that publishes table limits, and how to pull them out of its HTML.
pub trait TableLimitSource: Send + Sync {
    fn name(&self) -> &str;

    fn url(&self) -> &str;

    /// Extract the raw limit strings (e.g. `"$10,000"`) from page HTML.
    fn extract(&self, html: &str) -> Result<Vec<String>, ScrapeError>;
}

// ---------------------------------------------------------------------------
// HTTP fetcher
// ---------------------------------------------------------------------------

pub struct HttpFetcher {
    http: Client,
}

impl HttpFetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .context("Failed to build HTTP client for scrapers")?;
        Ok(Self { http })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!(url, "Fetching page");

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("Request to {url} failed"))?;

        if !resp.status().is_success() {
            let status = resp.status();
            anyhow::bail!("{url} returned {status}");
        }

        resp.text()
            .await
            .with_context(|| format!("Failed to read body from {url}"))
    }
}

// ---------------------------------------------------------------------------
// Scraping
// ---------------------------------------------------------------------------

/// Outcome of scraping one source.
#[derive(Debug, Clone)]
pub struct ScrapeReport {
    pub source: String,
    pub url: String,
    pub fetched_at: DateTime<Utc>,
    pub result: Result<Vec<String>, ScrapeError>,
}

/// The two built-in sources.
pub fn default_sources() -> Vec<Box<dyn TableLimitSource>> {
    vec![Box::new(LiveDealerSource), Box::new(Roulette77Source)]
}

/// Fetch and extract a single source.
pub async fn scrape_source(fetcher: &dyn PageFetcher, source: &dyn TableLimitSource) -> ScrapeReport {
    let result = match fetcher.fetch(source.url()).await {
        Ok(html) => source.extract(&html),
        Err(e) => Err(ScrapeError::Http {
            source_name: source.name().to_string(),
            message: format!("{e:#}"),
        }),
    };

    match &result {
        Ok(limits) => info!(source = source.name(), count = limits.len(), "Table limits scraped"),
        Err(e) => warn!(source = source.name(), error = %e, "Scrape failed"),
    }

    ScrapeReport {
        source: source.name().to_string(),
        url: source.url().to_string(),
        fetched_at: Utc::now(),
        result,
    }
}

/// Scrape every source concurrently. One failing source does not hide
/// the others.
pub async fn scrape_all(
    fetcher: &dyn PageFetcher,
    sources: &[Box<dyn TableLimitSource>],
) -> Vec<ScrapeReport> {
    let tasks = sources.iter().map(|s| scrape_source(fetcher, s.as_ref()));
    futures::future::join_all(tasks).await
}

// ---------------------------------------------------------------------------
// Limit parsing
// ---------------------------------------------------------------------------

/// Parse a published limit such as `"$10,000"`, `"€5 000"` or `"50K"`.
pub fn parse_limit(raw: &str) -> Result<i64, SimError> {
    let invalid = || SimError::InvalidParameter {
        name: "table_limit",
        value: raw.to_string(),
    };

    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | '€' | '£' | ',') && !c.is_whitespace())
        .collect();

    let (digits, multiplier) = match cleaned.chars().last() {
        Some('k' | 'K') => (&cleaned[..cleaned.len() - 1], 1_000i64),
        Some('m' | 'M') => (&cleaned[..cleaned.len() - 1], 1_000_000i64),
        _ => (cleaned.as_str(), 1i64),
    };

    let value = match digits.parse::<i64>() {
        Ok(n) => n.checked_mul(multiplier).ok_or_else(invalid)?,
        Err(_) => {
            // Fractional shorthand like "2.5K".
            let f: f64 = digits.parse().map_err(|_| invalid())?;
            let scaled = f * multiplier as f64;
            if !scaled.is_finite() || scaled.fract() != 0.0 || scaled > i64::MAX as f64 {
                return Err(invalid());
            }
            scaled as i64
        }
    };

    TableLimit::new(value).map_err(|_| invalid())?;
    Ok(value)
}

/// Collect every parseable limit across successful reports, sorted and
/// deduplicated.
pub fn parse_limits(reports: &[ScrapeReport]) -> Vec<i64> {
    let mut limits: Vec<i64> = reports
        .iter()
        .filter_map(|r| r.result.as_ref().ok())
        .flatten()
        .filter_map(|raw| match parse_limit(raw) {
            Ok(limit) => Some(limit),
            Err(e) => {
                warn!(raw = %raw, error = %e, "Skipping unparseable limit");
                None
            }
        })
        .collect();
    limits.sort_unstable();
    limits.dedup();
    limits
}

// ---------------------------------------------------------------------------
// HTML helpers
// ---------------------------------------------------------------------------

pub(crate) fn markup(source: &str, message: impl Into<String>) -> ScrapeError {
    ScrapeError::Markup {
        source_name: source.to_string(),
        message: message.into(),
    }
}

pub(crate) fn selector(source: &str, css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| markup(source, format!("invalid selector {css:?}: {e:?}")))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
