//! HTTP client for campaign pages using wreq for TLS fingerprint emulation.

use crate::config::Config;
use crate::gofundme::retry::RetryPolicy;
use crate::gofundme::sleep::{Pause, Sleeper, TokioSleeper};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};
use wreq::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, USER_AGENT};
use wreq::redirect::Policy;
use wreq::Client;
use wreq_util::Emulation;

/// The only method this client issues.
const METHOD: &str = "GET";

/// Errors from fetching a campaign page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Client or server error status that is not retried.
    #[error("HTTP {status} {reason} for url: {url}")]
    Status { url: String, status: u16, reason: String },

    /// Retryable status that persisted through every retry.
    #[error("Too many {status} error responses for url: {url} ({attempts} attempts)")]
    RetriesExhausted { url: String, status: u16, attempts: u32 },

    /// Connection failure, timeout, or other transport error.
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: wreq::Error,
    },

    /// Response arrived but its body could not be read.
    #[error("Failed to read response body: {0}")]
    Body(#[source] wreq::Error),
}

impl FetchError {
    /// HTTP status behind the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } | FetchError::RetriesExhausted { status, .. } => {
                Some(*status)
            }
            FetchError::Transport { .. } | FetchError::Body(_) => None,
        }
    }
}

/// Trait for page fetching - enables mocking for tests.
#[async_trait]
pub trait PageFetch: Send + Sync {
    /// Fetches a page and returns its body text.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Campaign page client with browser impersonation, retries and a politeness delay.
pub struct CampaignClient<S = TokioSleeper> {
    client: Client,
    retry: RetryPolicy,
    headers: HeaderMap,
    politeness_delay: Duration,
    sleeper: S,
}

impl CampaignClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: &Config) -> Result<Self> {
        CampaignClient::with_sleeper(config, TokioSleeper)
    }
}

impl<S: Sleeper> CampaignClient<S> {
    /// Creates a new client that takes its pauses through `sleeper`.
    pub fn with_sleeper(config: &Config, sleeper: S) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);

        let mut builder = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .redirect(Policy::default())
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            retry: config.retry.clone(),
            headers: browser_headers(config)?,
            politeness_delay: Duration::from_millis(config.politeness_delay_ms),
            sleeper,
        })
    }

    /// Returns the retry policy in effect.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// GETs `url`, retrying per the policy, then pauses once before returning the body.
    pub async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        let mut retries: u32 = 0;

        loop {
            debug!("{} {} (attempt {})", METHOD, url, retries + 1);

            let response = match self.send(url).await {
                Ok(response) => response,
                Err(err) => {
                    if self.retry.allows_method(METHOD) && self.retry.has_retries_left(retries) {
                        retries += 1;
                        let wait = self.retry.backoff(retries);
                        warn!(
                            "Request failed ({}), retry {}/{} in {:?}",
                            err, retries, self.retry.total, wait
                        );
                        self.pause(Pause::Backoff, wait).await;
                        continue;
                    }
                    return Err(FetchError::Transport { url: url.to_string(), source: err });
                }
            };

            let status = response.status();
            let code = status.as_u16();
            debug!("Response status: {}", status);

            if self.retry.is_retryable_status(METHOD, code) {
                if self.retry.has_retries_left(retries) {
                    retries += 1;
                    let retry_after =
                        response.headers().get("retry-after").and_then(|v| v.to_str().ok());
                    let wait = self.retry.wait_for(retries, code, retry_after);
                    warn!("Got {}, retry {}/{} in {:?}", status, retries, self.retry.total, wait);
                    self.pause(Pause::Backoff, wait).await;
                    continue;
                }
                return Err(FetchError::RetriesExhausted {
                    url: url.to_string(),
                    status: code,
                    attempts: retries + 1,
                });
            }

            if status.is_client_error() || status.is_server_error() {
                return Err(FetchError::Status {
                    url: url.to_string(),
                    status: code,
                    reason: status.canonical_reason().unwrap_or_default().to_string(),
                });
            }

            let body = response.text().await.map_err(FetchError::Body)?;

            self.pause(Pause::Politeness, self.politeness_delay).await;
            return Ok(body);
        }
    }

    async fn send(&self, url: &str) -> Result<wreq::Response, wreq::Error> {
        self.client
            .get(url)
            .emulation(Emulation::Chrome131)
            .headers(self.headers.clone())
            .send()
            .await
    }

    async fn pause(&self, pause: Pause, duration: Duration) {
        if duration.is_zero() {
            return;
        }
        debug!("Pausing {:?} ({:?})", duration, pause);
        self.sleeper.sleep(pause, duration).await;
    }
}

/// Headers that replace the emulation profile's defaults.
fn browser_headers(config: &Config) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(&config.user_agent).context("Invalid User-Agent header")?,
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_str(&config.accept_language)
            .context("Invalid Accept-Language header")?,
    );
    Ok(headers)
}

#[async_trait]
impl<S: Sleeper> PageFetch for CampaignClient<S> {
    async fn fetch(&self, url: &str) -> Result<String> {
        info!("Fetching campaign page: {}", url);
        Ok(self.fetch_page(url).await?)
    }
}
