// src/sources/index.rs

use scraper::{Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::{parse_date, SourceReference};
use crate::config::{Config, LINK_MARKER, LINK_SUFFIX};
use crate::error::{ScrapeError, Stage};
use crate::fetch::PageFetcher;

/// Fetch the meeting calendar and return every projection-table page on it,
/// oldest meeting first.
#[instrument(level = "info", skip_all, fields(index = %config.index_url))]
pub async fn resolve_sources(
    config: &Config,
    fetcher: &dyn PageFetcher,
) -> Result<Vec<SourceReference>, ScrapeError> {
    let url = config.index_url.as_str();
    let html = fetcher
        .fetch(url)
        .await
        .map_err(|source| ScrapeError::Fetch {
            stage: Stage::IndexResolution,
            url: url.to_string(),
            source,
        })?;

    let refs = parse_index(&html, &config.site_base);
    info!(count = refs.len(), "resolved projection pages");
    Ok(refs)
}

/// Collect `<a href>` targets containing both the marker and `.htm`, resolved
/// against `site_base` and sorted (stably) by meeting date. Links whose date
/// cannot be read are dropped with a warning.
pub fn parse_index(html: &str, site_base: &Url) -> Vec<SourceReference> {
    let doc = Html::parse_document(html);
    let sel = Selector::parse("a[href]").expect("selector should parse");

    let mut refs = Vec::new();
    for href in doc.select(&sel).filter_map(|a| a.value().attr("href")) {
        if !(href.contains(LINK_MARKER) && href.contains(LINK_SUFFIX)) {
            continue;
        }
        let url = match site_base.join(href) {
            Ok(u) => u,
            Err(e) => {
                warn!(%href, error = %e, "skipping unresolvable link");
                continue;
            }
        };
        match parse_date(url.as_str()) {
            Ok(meeting_date) => {
                debug!(url = %url, %meeting_date, "found projection page");
                refs.push(SourceReference {
                    url: url.to_string(),
                    meeting_date,
                });
            }
            Err(e) => warn!(%href, error = %e, "skipping link without a usable date"),
        }
    }

    if refs.is_empty() {
        warn!("index page has no projection-table links");
    }

    refs.sort_by_key(|r| r.meeting_date);
    refs
}
