//! Scraper pipeline: fetch both pages, extract, parse into limits.

use spinlab::platforms::{
    default_sources, parse_limits, scrape_all, LiveDealerSource, Roulette77Source, TableLimitSource,
};
use spinlab::types::ScrapeError;

use crate::fake_fetcher::FakeFetcher;

const LIVEDEALER_PAGE: &str = r#"
<html><body>
<table class="sortable responsive-table">
  <thead><tr><th>Studio</th><th>Blackjack</th><th>Baccarat</th><th>Min</th><th>Roulette max</th></tr></thead>
  <tbody>
    <tr><td>Evolution</td><td>$5,000</td><td>$10,000</td><td>$0.20</td><td>$10,000</td></tr>
    <tr><td>Ezugi</td><td>$2,000</td><td>$5,000</td><td>$1</td><td>$5,000</td></tr>
    <tr><td>Boutique</td><td>-</td><td>-</td><td>$1</td><td>Ask</td></tr>
  </tbody>
</table>
</body></html>
"#;

const ROULETTE77_PAGE: &str = r#"
<html><body>
<table class="classic-table classic-table--min600">
  <tr><th></th><th>Low</th><th></th><th>Mid</th><th></th><th>High</th><th></th></tr>
  <tr><td>Min</td><td></td><td>$1</td><td></td><td>$25</td><td></td><td>$100</td></tr>
  <tr><td>Max</td><td></td><td>$500</td><td></td><td>$5,000</td><td></td><td>$25K</td></tr>
</table>
</body></html>
"#;

fn live_url() -> String {
    LiveDealerSource.url().to_string()
}

fn r77_url() -> String {
    Roulette77Source.url().to_string()
}

#[tokio::test]
async fn test_scrape_all_extracts_both_sources() {
    let fetcher = FakeFetcher::new()
        .with_page(&live_url(), LIVEDEALER_PAGE)
        .with_page(&r77_url(), ROULETTE77_PAGE);

    let reports = scrape_all(&fetcher, &default_sources()).await;

    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].source, "livedealer");
    assert_eq!(
        reports[0].result.as_ref().unwrap(),
        &vec!["$10,000".to_string(), "$5,000".to_string(), "Ask".to_string()]
    );
    assert_eq!(reports[1].source, "roulette77");
    assert_eq!(
        reports[1].result.as_ref().unwrap(),
        &vec!["$500".to_string(), "$5,000".to_string(), "$25K".to_string()]
    );

    let mut requested = fetcher.requests();
    requested.sort();
    let mut expected = vec![live_url(), r77_url()];
    expected.sort();
    assert_eq!(requested, expected);
}

#[tokio::test]
async fn test_parsed_limits_are_sorted_and_deduplicated() {
    let fetcher = FakeFetcher::new()
        .with_page(&live_url(), LIVEDEALER_PAGE)
        .with_page(&r77_url(), ROULETTE77_PAGE);

    let reports = scrape_all(&fetcher, &default_sources()).await;

    // "Ask" is skipped; $5,000 appears on both pages.
    assert_eq!(parse_limits(&reports), vec![500, 5_000, 10_000, 25_000]);
}

#[tokio::test]
async fn test_http_failure_is_isolated_to_its_source() {
    let fetcher = FakeFetcher::new()
        .with_failure(&live_url(), "503 Service Unavailable")
        .with_page(&r77_url(), ROULETTE77_PAGE);

    let reports = scrape_all(&fetcher, &default_sources()).await;

    match &reports[0].result {
        Err(ScrapeError::Http { source_name, message }) => {
            assert_eq!(source_name, "livedealer");
            assert!(message.contains("503"));
        }
        other => panic!("expected HTTP error, got {other:?}"),
    }
    assert!(reports[1].result.is_ok());
    assert_eq!(parse_limits(&reports), vec![500, 5_000, 25_000]);
}

#[tokio::test]
async fn test_changed_markup_reports_markup_error() {
    let fetcher = FakeFetcher::new()
        .with_page(&live_url(), "<html><body><div>redesigned</div></body></html>")
        .with_page(&r77_url(), "<html><body></body></html>");

    let reports = scrape_all(&fetcher, &default_sources()).await;

    assert!(reports
        .iter()
        .all(|r| matches!(r.result, Err(ScrapeError::Markup { .. }))));
    assert!(parse_limits(&reports).is_empty());
}
