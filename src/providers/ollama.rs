use async_trait::async_trait;
use log::{error, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{Provider, backoff_delay_ms, transport_error};
use crate::errors::ProviderError;

/// Ollama client for interacting with Ollama API
#[derive(Debug)]
pub struct Ollama {
    /// Base URL of the Ollama API
    base_url: String,
    /// HTTP client for making requests
    client: Client,
    /// Maximum number of retry attempts
    max_retries: u32,
    /// Base backoff time in milliseconds for exponential backoff
    backoff_base_ms: u64,
    /// Optional rate limit in requests per minute
    rate_limit: Option<u32>,
}

/// Generate request for the Ollama API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Model name to use for generation
    model: String,
    /// Prompt to generate from
    prompt: String,
    /// System message to guide the model
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    /// Additional model parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerationOptions>,
    /// Whether to stream the response
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
}

/// Generation options for the Ollama API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Temperature for generation (default: 0.8)
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// Generation response from the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Model name
    #[serde(default)]
    pub model: String,
    /// Generated text
    pub response: String,
    /// Whether the generation is complete
    #[serde(default)]
    pub done: bool,
}

impl GenerationRequest {
    /// Create a new generation request
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            system: None,
            options: None,
            stream: Some(false),
        }
    }

    /// Set the system prompt
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.options = Some(GenerationOptions {
            temperature: Some(temperature),
        });
        self
    }
}

impl Ollama {
    /// Create a new Ollama client with configuration
    ///
    /// Uses connection pooling for better performance with concurrent requests.
    /// Note: Ollama typically uses HTTP/1.1, so we don't force HTTP/2.
    pub fn new_with_config(
        host: impl Into<String>,
        port: u16,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_ms: u64,
        rate_limit: Option<u32>,
    ) -> Self {
        let host = host.into();

        // Keep an explicit scheme, default to plain http
        let base_url = match host.split_once("://") {
            Some((scheme, rest)) => format!("{}://{}:{}", scheme, rest.trim_end_matches('/'), port),
            None => format!("http://{}:{}", host, port),
        };

        Self {
            base_url,
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs.max(1)))
                .http1_only()
                .pool_idle_timeout(Duration::from_secs(90))
                .pool_max_idle_per_host(20)
                .tcp_keepalive(Duration::from_secs(60))
                .build()
                .unwrap_or_default(),
            max_retries,
            backoff_base_ms,
            rate_limit,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Generate text from the Ollama API with retry logic
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse, ProviderError> {
        let url = format!("{}/api/generate", self.base_url);
        let mut attempt = 0;

        loop {
            if attempt > 0 {
                if let Some(rate_limit) = self.rate_limit.filter(|r| *r > 0) {
                    // Convert requests per minute to milliseconds
                    let delay_ms = 60_000 / rate_limit as u64;
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
            }

            let result = self.generate_once(&url, request).await;
            match result {
                Ok(response) => return Ok(response),
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    let backoff_ms = backoff_delay_ms(self.backoff_base_ms, attempt);
                    warn!(
                        "Ollama API error: {} - attempt {}/{}, retrying in {}ms",
                        e,
                        attempt,
                        self.max_retries + 1,
                        backoff_ms
                    );
                    tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn generate_once(
        &self,
        url: &str,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, ProviderError> {
        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let response_text = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            error!("Ollama API error ({}): {}", status, response_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: response_text,
            });
        }

        parse_generation_body(&response_text)
    }

    /// Get the Ollama API version
    pub async fn version(&self) -> Result<String, ProviderError> {
        let url = format!("{}/api/version", self.base_url);
        let response: serde_json::Value = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(transport_error)?
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse Ollama version response: {}", e)))?;

        response["version"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ProviderError::ParseError("Invalid version format in response".to_string()))
    }
}

#[async_trait]
impl Provider for Ollama {
    type Request = GenerationRequest;
    type Response = GenerationResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        self.generate(&request).await
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.version().await.map(|_| ())
    }

    fn extract_text(response: &Self::Response) -> String {
        response.response.trim().to_string()
    }
}

/// Parse a generate body, accepting both a single object and a JSONL stream.
pub fn parse_generation_body(body: &str) -> Result<GenerationResponse, ProviderError> {
    if let Ok(response) = serde_json::from_str::<GenerationResponse>(body) {
        return Ok(response);
    }

    // Streamed answer: one JSON object per line, text spread over the lines
    let mut text = String::new();
    let mut model = String::new();
    let mut done = false;
    let mut parsed_any = false;

    for line in body.lines().filter(|l| !l.trim().is_empty()) {
        let Ok(value) = serde_json::from_str::<serde_json::Value>(line) else {
            continue;
        };
        parsed_any = true;
        if let Some(part) = value.get("response").and_then(|v| v.as_str()) {
            text.push_str(part);
        }
        if let Some(name) = value.get("model").and_then(|v| v.as_str()) {
            model = name.to_string();
        }
        done |= value.get("done").and_then(|v| v.as_bool()).unwrap_or(false);
    }

    if !parsed_any {
        let preview: String = body.chars().take(500).collect();
        error!("Failed to parse Ollama API response. Raw response (first 500 chars): {}", preview);
        return Err(ProviderError::ParseError(
            "Ollama response contains invalid JSON".to_string(),
        ));
    }

    Ok(GenerationResponse {
        model,
        response: text,
        done,
    })
}
