use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use std::thread;
use std::time::Duration;

use crate::config::ScraperConfig;
use crate::error::{ErrorKind, FetchFailure, ScrapeError};

/// Body text of a page, or why it could not be had.
pub type FetchOutcome = Result<String, FetchFailure>;

/// Anything that can turn a URL into page text.
pub trait PageSource {
    fn fetch(&self, url: &str) -> FetchOutcome;
}

/// Blocking client with the browser identity and timeout from the config.
pub fn build_client(config: &ScraperConfig, timeout: Duration) -> Result<Client, ScrapeError> {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&config.accept_language) {
        headers.insert(ACCEPT_LANGUAGE, value);
    }

    let mut builder = Client::builder()
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .timeout(timeout);
    if let Some(proxy) = &config.proxy {
        builder = builder.proxy(reqwest::Proxy::all(proxy).map_err(ScrapeError::Client)?);
    }
    builder.build().map_err(ScrapeError::Client)
}

/// Delay before retry number `attempt` (1-based).
pub fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base * attempt
}

#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    max_retries: u32,
    backoff: Duration,
}

impl Fetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self, ScrapeError> {
        Ok(Fetcher {
            client: build_client(config, config.timeout)?,
            max_retries: config.max_retries,
            backoff: config.backoff,
        })
    }

    fn attempt(&self, url: &str) -> FetchOutcome {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchFailure::from_reqwest(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::new(
                ErrorKind::HttpStatus,
                format!("HTTP {} from {}", status, url),
            ));
        }

        response.text().map_err(|e| FetchFailure::from_reqwest(&e))
    }
}

impl PageSource for Fetcher {
    /// GET `url`, retrying network errors, timeouts and non-2xx statuses
    /// with a linearly growing delay. The failure returned is the last one.
    fn fetch(&self, url: &str) -> FetchOutcome {
        let mut attempt = 0;
        loop {
            match self.attempt(url) {
                Ok(body) => {
                    log::debug!("fetched {} ({} bytes)", url, body.len());
                    return Ok(body);
                }
                Err(failure) if attempt < self.max_retries => {
                    attempt += 1;
                    let delay = backoff_delay(self.backoff, attempt);
                    log::info!(
                        "attempt {} for {} failed ({}), retrying in {:?}",
                        attempt,
                        url,
                        failure,
                        delay
                    );
                    thread::sleep(delay);
                }
                Err(failure) => {
                    log::warn!("giving up on {} after {} attempts: {}", url, attempt + 1, failure);
                    return Err(failure);
                }
            }
        }
    }
}
