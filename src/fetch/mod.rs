// src/fetch/mod.rs

use async_trait::async_trait;
use thiserror::Error;

mod http;

pub use http::HttpFetcher;

/// Why a page could not be retrieved.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP status {status}")]
    Status { status: u16 },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl FetchError {
    /// Worth another attempt: transport failures, timeouts, 429 and 5xx.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Status { status } => *status == 429 || (500..600).contains(status),
            FetchError::Transport(_) => true,
        }
    }
}

/// Turns a URL into raw page text.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

#[cfg(test)]
pub(crate) mod fixture {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Serves canned pages keyed by URL; anything else is a 404.
    #[derive(Default)]
    pub struct FixtureFetcher {
        pages: HashMap<String, String>,
        requested: Mutex<Vec<String>>,
    }

    impl FixtureFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_page(mut self, url: &str, html: &str) -> Self {
            self.pages.insert(url.to_string(), html.to_string());
            self
        }

        pub fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageFetcher for FixtureFetcher {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.requested.lock().unwrap().push(url.to_string());
            self.pages
                .get(url)
                .cloned()
                .ok_or(FetchError::Status { status: 404 })
        }
    }
}
