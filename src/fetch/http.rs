// src/fetch/http.rs

use async_trait::async_trait;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, warn};

use super::{FetchError, PageFetcher};
use crate::config::FetchConfig;

/// `reqwest`-backed fetcher with a request timeout and exponential backoff on
/// transient failures.
pub struct HttpFetcher {
    client: Client,
    max_retries: u32,
    initial_backoff_ms: u64,
}

impl HttpFetcher {
    pub fn new(cfg: &FetchConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(cfg.timeout)
            .user_agent(cfg.user_agent.as_str())
            .build()?;
        Ok(Self {
            client,
            max_retries: cfg.max_retries,
            initial_backoff_ms: cfg.initial_backoff_ms,
        })
    }

    async fn get_text_core(&self, url: &str) -> Result<String, FetchError> {
        debug!(%url, "fetching");
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }
        Ok(resp.text().await?)
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        with_retry(url, self.max_retries, self.initial_backoff_ms, || {
            self.get_text_core(url)
        })
        .await
    }
}

/// Delay before retry number `attempt` (1-based): `initial * 2^(attempt-1)`.
pub(crate) fn backoff_delay(initial_backoff_ms: u64, attempt: u32) -> Duration {
    let factor = 2u64.saturating_pow(attempt.saturating_sub(1));
    Duration::from_millis(initial_backoff_ms.saturating_mul(factor))
}

/// Runs `op` until it succeeds, fails permanently, or `max_retries` extra
/// attempts have been spent.
pub(crate) async fn with_retry<F, Fut>(
    url: &str,
    max_retries: u32,
    initial_backoff_ms: u64,
    mut op: F,
) -> Result<String, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<String, FetchError>>,
{
    let mut attempts = 0;
    loop {
        match op().await {
            Ok(t) => return Ok(t),
            Err(e) if e.is_transient() && attempts < max_retries => {
                attempts += 1;
                let delay = backoff_delay(initial_backoff_ms, attempts);
                warn!(%url, attempt = attempts, delay_ms = delay.as_millis() as u64, error = %e, "retrying");
                sleep(delay).await;
            }
            Err(e) => {
                if e.is_transient() {
                    error!(%url, error = %e, "exhausted retries");
                }
                return Err(e);
            }
        }
    }
}
