// src/aggregate.rs

use tracing::{error, info, instrument, warn};

use crate::config::{Config, FailurePolicy};
use crate::dataset::UnifiedDataset;
use crate::error::ScrapeError;
use crate::fetch::PageFetcher;
use crate::sources::resolve_sources;
use crate::table::extract_table;

/// Resolve every projection page, extract each one in meeting order and
/// merge them into one dataset.
#[instrument(level = "info", skip_all, fields(policy = ?config.failure_policy))]
pub async fn scrape_all(
    config: &Config,
    fetcher: &dyn PageFetcher,
) -> Result<UnifiedDataset, ScrapeError> {
    let sources = resolve_sources(config, fetcher).await?;

    let mut pages = Vec::with_capacity(sources.len());
    let mut skipped = Vec::new();
    for reference in &sources {
        match extract_table(config, fetcher, reference).await {
            Ok(page) => pages.push(page),
            Err(e) => match config.failure_policy {
                FailurePolicy::Abort => {
                    error!(url = %reference.url, stage = %e.stage(), error = %e, "aborting");
                    return Err(e);
                }
                FailurePolicy::SkipFailed => {
                    warn!(url = %reference.url, stage = %e.stage(), error = %e, "skipping source");
                    skipped.push(reference.url.clone());
                }
            },
        }
    }

    if !skipped.is_empty() {
        warn!(count = skipped.len(), ?skipped, "some sources were skipped");
    }

    let dataset = UnifiedDataset::from_pages(&pages);
    if dataset.is_empty() {
        return Err(ScrapeError::NoData);
    }

    info!(
        pages = pages.len(),
        rows = dataset.len(),
        columns = dataset.columns.len(),
        "scrape complete"
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::fixture::FixtureFetcher;
    use crate::output::write_csv;
    use url::Url;

    const INDEX_URL: &str = "https://fixture.test/monetarypolicy/fomccalendars.htm";
    const JAN: &str = "https://fixture.test/monetarypolicy/fomcprojtabl20120125.htm";
    const APR: &str = "https://fixture.test/monetarypolicy/fomcprojtabl20120425.htm";

    fn config() -> Config {
        Config::for_site(
            Url::parse(INDEX_URL).unwrap(),
            Url::parse("https://fixture.test/").unwrap(),
        )
    }

    // April listed first: output order must come from the dates, not the page.
    const INDEX: &str = r#"<html><body>
        <a href="/monetarypolicy/fomcprojtabl20120425.htm">April</a>
        <a href="/monetarypolicy/fomcprojtabl20120125.htm">January</a>
    </body></html>"#;

    fn projection_page(rows: &[(&str, &str)]) -> String {
        let body: String = rows
            .iter()
            .map(|(m, n)| format!("<tr><td>{}</td><td>{}</td></tr>", m, n))
            .collect();
        format!(
            "<html><body><h4>Figure 2. Assessments of appropriate monetary policy</h4>\
             <table><thead><tr><th>Midpoint of target range</th><th>2012</th></tr></thead>\
             <tbody>{}</tbody></table></body></html>",
            body
        )
    }

    fn fixture() -> FixtureFetcher {
        FixtureFetcher::new()
            .with_page(INDEX_URL, INDEX)
            .with_page(JAN, &projection_page(&[("0.25", "11"), ("0.50", " ")]))
            .with_page(APR, &projection_page(&[("0.25", "10"), ("0.75", "1")]))
    }

    #[tokio::test]
    async fn two_meetings_end_to_end() {
        let fetcher = fixture();
        let ds = scrape_all(&config(), &fetcher).await.unwrap();

        assert_eq!(ds.columns, vec!["date", "midpoint", "2012"]);
        assert_eq!(ds.len(), 4);
        let dates: Vec<_> = (0..4).map(|i| ds.value(i, "date").unwrap()).collect();
        assert_eq!(dates, vec!["2012-01-25", "2012-01-25", "2012-04-25", "2012-04-25"]);
        assert_eq!(fetcher.requested(), vec![INDEX_URL, JAN, APR]);

        let mut buf = Vec::new();
        write_csv(&ds, &mut buf).unwrap();
        let csv = String::from_utf8(buf).unwrap();
        assert_eq!(
            csv,
            "date,midpoint,2012\n\
             2012-01-25,0.25,11\n\
             2012-01-25,0.50,\n\
             2012-04-25,0.25,10\n\
             2012-04-25,0.75,1\n"
        );
    }

    #[tokio::test]
    async fn abort_policy_stops_on_first_bad_page() {
        let fetcher = FixtureFetcher::new()
            .with_page(INDEX_URL, INDEX)
            .with_page(JAN, "<html><body><p>redesigned</p></body></html>")
            .with_page(APR, &projection_page(&[("0.25", "10")]));

        let err = scrape_all(&config(), &fetcher).await.unwrap_err();
        assert!(matches!(err, ScrapeError::AnchorNotFound { ref url } if url == JAN));
        assert_eq!(fetcher.requested(), vec![INDEX_URL, JAN]);
    }

    #[tokio::test]
    async fn skip_policy_continues_past_bad_page() {
        let fetcher = FixtureFetcher::new()
            .with_page(INDEX_URL, INDEX)
            .with_page(APR, &projection_page(&[("0.25", "10")]));
        let mut cfg = config();
        cfg.failure_policy = FailurePolicy::SkipFailed;

        let ds = scrape_all(&cfg, &fetcher).await.unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.value(0, "date"), Some("2012-04-25"));
    }

    #[tokio::test]
    async fn nothing_extracted_is_an_error() {
        let fetcher = FixtureFetcher::new().with_page(INDEX_URL, "<html><body></body></html>");
        let err = scrape_all(&config(), &fetcher).await.unwrap_err();
        assert!(matches!(err, ScrapeError::NoData));
    }
}
