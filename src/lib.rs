pub mod aggregate;
pub mod config;
pub mod dataset;
pub mod error;
pub mod fetch;
pub mod output;
pub mod sources;
pub mod table;

pub use aggregate::scrape_all;
pub use config::{Config, FailurePolicy, FetchConfig};
pub use dataset::UnifiedDataset;
pub use error::{ScrapeError, Stage};
pub use fetch::{FetchError, HttpFetcher, PageFetcher};
pub use sources::{parse_date, resolve_sources, SourceReference};
pub use table::{extract_table, PageDataset};
