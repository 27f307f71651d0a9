/*!
 * Client for the public Google Translate web endpoint.
 *
 * The endpoint needs no key and answers with nested JSON arrays:
 * `[[["translated", "source", ...], ...], null, "detected-language", ...]`.
 */

use async_trait::async_trait;
use log::{debug, warn};
use parking_lot::Mutex;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::{Duration, Instant};
use url::Url;

use super::{Provider, backoff_delay_ms, transport_error};
use crate::errors::ProviderError;

/// Default endpoint
pub const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com";

/// Longest text the web endpoint accepts in a single request
pub const MAX_CHARS_PER_REQUEST: usize = 5000;

/// Google web translate client
#[derive(Debug)]
pub struct GoogleTranslate {
    /// Base URL, without the `/translate_a/single` path
    base_url: String,
    /// Pooled HTTP client
    client: Client,
    /// Maximum number of retry attempts
    max_retries: u32,
    /// Base backoff time in milliseconds for exponential backoff
    backoff_base_ms: u64,
    /// Optional rate limit in requests per minute
    rate_limit: Option<u32>,
    /// Earliest instant the next request may start
    next_slot: Mutex<Option<Instant>>,
}

/// One text to translate
#[derive(Debug, Clone)]
pub struct GoogleRequest {
    pub text: String,
    pub source_language: String,
    pub target_language: String,
}

impl GoogleRequest {
    pub fn new(
        text: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            source_language: source_language.into(),
            target_language: target_language.into(),
        }
    }
}

/// Parsed endpoint answer
#[derive(Debug, Clone, PartialEq)]
pub struct GoogleResponse {
    /// Concatenated translated segments
    pub text: String,
    /// Source language reported by the endpoint
    pub detected_source: Option<String>,
}

impl GoogleTranslate {
    /// Create a client with default retry settings.
    pub fn new() -> Self {
        Self::new_with_config(DEFAULT_ENDPOINT, 30, 3, 1000, None)
    }

    /// Create a client with configuration.
    ///
    /// An empty endpoint selects the public one.
    pub fn new_with_config(
        endpoint: impl Into<String>,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_ms: u64,
        rate_limit: Option<u32>,
    ) -> Self {
        let endpoint = endpoint.into();
        let base_url = if endpoint.trim().is_empty() {
            DEFAULT_ENDPOINT.to_string()
        } else {
            endpoint.trim_end_matches('/').to_string()
        };

        Self {
            base_url,
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs.max(1)))
                .pool_idle_timeout(Duration::from_secs(90))
                .pool_max_idle_per_host(10)
                .build()
                .unwrap_or_default(),
            max_retries,
            backoff_base_ms,
            rate_limit,
            next_slot: Mutex::new(None),
        }
    }

    /// Full request URL for one text.
    pub fn request_url(&self, request: &GoogleRequest) -> Result<Url, ProviderError> {
        Url::parse_with_params(
            &format!("{}/translate_a/single", self.base_url),
            &[
                ("client", "gtx"),
                ("sl", request.source_language.as_str()),
                ("tl", request.target_language.as_str()),
                ("dt", "t"),
                ("q", request.text.as_str()),
            ],
        )
        .map_err(|e| ProviderError::RequestFailed(format!("Invalid endpoint URL: {}", e)))
    }

    /// Wait for the next free slot when a rate limit is configured.
    async fn throttle(&self) {
        let Some(rate_limit) = self.rate_limit.filter(|r| *r > 0) else {
            return;
        };
        let interval = Duration::from_millis(60_000 / rate_limit as u64);

        let wait = {
            let mut next_slot = self.next_slot.lock();
            let now = Instant::now();
            let start = next_slot.map_or(now, |slot| slot.max(now));
            *next_slot = Some(start + interval);
            start - now
        };

        if !wait.is_zero() {
            tokio::time::sleep(wait).await;
        }
    }

    async fn send_once(&self, url: &Url) -> Result<GoogleResponse, ProviderError> {
        self.throttle().await;

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimitExceeded(truncate(&body, 200)));
        }
        if !status.is_success() {
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: truncate(&body, 200),
            });
        }

        parse_response(&body)
    }
}

impl Default for GoogleTranslate {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Provider for GoogleTranslate {
    type Request = GoogleRequest;
    type Response = GoogleResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let url = self.request_url(&request)?;
        let mut attempt = 0;

        loop {
            match self.send_once(&url).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    let backoff_ms = backoff_delay_ms(self.backoff_base_ms, attempt);
                    warn!(
                        "Google translate request failed ({}), retry {}/{} in {}ms",
                        e, attempt, self.max_retries, backoff_ms
                    );
                    tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let response = self.complete(GoogleRequest::new("Hello", "en", "fr")).await?;
        debug!("Google translate reachable, probe answered '{}'", response.text);
        Ok(())
    }

    fn extract_text(response: &Self::Response) -> String {
        response.text.clone()
    }
}

/// Parse the nested-array body of the web endpoint.
pub fn parse_response(body: &str) -> Result<GoogleResponse, ProviderError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| ProviderError::ParseError(format!("Invalid JSON: {}", e)))?;

    let segments = value
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| ProviderError::ParseError("Missing translation segments".to_string()))?;

    let text = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect::<String>();

    let detected_source = value.get(2).and_then(Value::as_str).map(str::to_string);

    Ok(GoogleResponse {
        text,
        detected_source,
    })
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", text.chars().take(max_chars).collect::<String>())
    } else {
        text.to_string()
    }
}
