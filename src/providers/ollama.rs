use async_trait::async_trait;
use log::{error, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::{send_error, status_error, Provider};

/// Client for a local Ollama server's `/api/generate` endpoint
#[derive(Debug)]
pub struct Ollama {
    /// Server URL without trailing slash
    base_url: String,
    model: String,
    client: Client,
    temperature: f32,
    /// Retries after the first failed attempt
    max_retries: u32,
    /// First retry delay, doubled on every further retry
    backoff_base_ms: u64,
}

/// Non-streaming generate call
#[derive(Debug, Serialize)]
pub struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    system: &'a str,
    stream: bool,
    options: SamplingOptions,
}

/// Model parameters sent with a generate call
#[derive(Debug, Serialize)]
pub struct SamplingOptions {
    temperature: f32,
}

/// Reply of a non-streaming generate call
#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    /// Generated text
    pub response: String,
    #[serde(default)]
    pub done: bool,
}

impl Ollama {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            client: Client::builder()
                .timeout(timeout)
                // Ollama speaks HTTP/1.1
                .http1_only()
                .build()
                .unwrap_or_default(),
            temperature: 0.0,
            max_retries: 2,
            backoff_base_ms: 500,
        }
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set retry behaviour
    pub fn with_retries(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    fn request<'a>(&'a self, system: &'a str, prompt: &'a str) -> GenerateRequest<'a> {
        GenerateRequest {
            model: &self.model,
            prompt,
            system,
            stream: false,
            options: SamplingOptions {
                temperature: self.temperature,
            },
        }
    }

    /// Delay before retry `attempt`, doubling from the base and capped at `u64::MAX`
    fn backoff_delay_ms(&self, attempt: u32) -> u64 {
        2u64.checked_pow(attempt)
            .map_or(u64::MAX, |factor| self.backoff_base_ms.saturating_mul(factor))
    }

    /// Run a generate call, retrying transient failures with exponential backoff
    pub async fn generate(&self, request: &GenerateRequest<'_>) -> Result<GenerateResponse, ProviderError> {
        let url = format!("{}/api/generate", self.base_url);

        let mut attempt = 0;
        loop {
            match self.post_once(&url, request).await {
                Ok(response) => return Ok(response),
                // Client-side errors will not improve on retry
                Err(e @ ProviderError::AuthenticationError(_))
                | Err(e @ ProviderError::ParseError(_)) => return Err(e),
                Err(e) if attempt < self.max_retries => {
                    let delay = self.backoff_delay_ms(attempt);
                    warn!("Ollama attempt {} failed: {}. Retrying in {}ms", attempt + 1, e, delay);
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                    attempt += 1;
                }
                Err(e) => {
                    error!("Ollama gave up after {} attempts: {}", attempt + 1, e);
                    return Err(e);
                }
            }
        }
    }

    async fn post_once(&self, url: &str, request: &GenerateRequest<'_>) -> Result<GenerateResponse, ProviderError> {
        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| send_error("Ollama", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, body));
        }

        response
            .json::<GenerateResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(format!("Ollama: {}", e)))
    }
}

#[async_trait]
impl Provider for Ollama {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, ProviderError> {
        let response = self.generate(&self.request(system, prompt)).await?;
        Ok(response.response)
    }

    fn name(&self) -> &str {
        "Ollama"
    }
}
