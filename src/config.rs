// src/config.rs

use std::time::Duration;
use url::Url;

/// Page listing every FOMC meeting, with links to the projection tables.
pub const DEFAULT_INDEX_URL: &str = "https://www.federalreserve.gov/monetarypolicy/fomccalendars.htm";

/// Scheme + host that relative links on the index page are resolved against.
pub const DEFAULT_SITE_BASE: &str = "https://www.federalreserve.gov/";

/// Filename marker shared by all projection-table pages.
pub const LINK_MARKER: &str = "fomcprojtabl";

/// Suffix every projection-table link carries.
pub const LINK_SUFFIX: &str = ".htm";

/// Heading text (lowercase) that sits just above the dot-plot table.
pub const DEFAULT_ANCHOR_PHRASE: &str = "assessments of appropriate monetary policy";

/// Heading levels the anchor phrase may appear under.
pub const DEFAULT_HEADING_TAGS: &[&str] = &["h4", "h5"];

/// What the aggregator does when a single source page fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop the whole run at the first failing page.
    #[default]
    Abort,
    /// Log the failure, drop the page and keep going.
    SkipFailed,
}

/// HTTP transport settings.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub timeout: Duration,
    pub max_retries: u32,
    pub initial_backoff_ms: u64,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_retries: 3,
            initial_backoff_ms: 500,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Everything the scraper needs to know about the site it targets.
#[derive(Debug, Clone)]
pub struct Config {
    pub index_url: Url,
    pub site_base: Url,
    pub anchor_phrase: String,
    pub heading_tags: Vec<String>,
    pub failure_policy: FailurePolicy,
    pub fetch: FetchConfig,
}

impl Config {
    /// Config pointed at another host, keeping the federalreserve.gov page conventions.
    /// `site_base` must end in `/` for relative links to resolve under it.
    pub fn for_site(index_url: Url, site_base: Url) -> Self {
        Self {
            index_url,
            site_base,
            ..Self::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            index_url: Url::parse(DEFAULT_INDEX_URL).expect("default index URL should parse"),
            site_base: Url::parse(DEFAULT_SITE_BASE).expect("default site base should parse"),
            anchor_phrase: DEFAULT_ANCHOR_PHRASE.to_string(),
            heading_tags: DEFAULT_HEADING_TAGS.iter().map(|t| t.to_string()).collect(),
            failure_policy: FailurePolicy::default(),
            fetch: FetchConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_federal_reserve() {
        let cfg = Config::default();
        assert_eq!(cfg.index_url.as_str(), DEFAULT_INDEX_URL);
        assert_eq!(cfg.site_base.host_str(), Some("www.federalreserve.gov"));
        assert_eq!(cfg.heading_tags, vec!["h4", "h5"]);
        assert_eq!(cfg.failure_policy, FailurePolicy::Abort);
    }

    #[test]
    fn for_site_keeps_page_conventions() {
        let cfg = Config::for_site(
            Url::parse("http://127.0.0.1:8080/index.htm").unwrap(),
            Url::parse("http://127.0.0.1:8080/").unwrap(),
        );
        assert_eq!(cfg.anchor_phrase, DEFAULT_ANCHOR_PHRASE);
        assert_eq!(cfg.site_base.port(), Some(8080));
    }
}
