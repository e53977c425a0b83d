/*!
 * Provider implementations for the translation suggestion service.
 *
 * This module contains client implementations for various LLM providers:
 * - Ollama: Local LLM server
 * - Anthropic: Anthropic API integration
 * - Gemini: Google Generative Language API integration
 * - Mock: Canned responses for tests
 */

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::fmt::Debug;
use std::time::Duration;
use url::Url;

use crate::app_config::{AssistantConfig, AssistantProvider};
use crate::errors::ProviderError;

/// Common trait for all LLM providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably by the assistant.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Complete a prompt and return the raw response text
    ///
    /// # Arguments
    /// * `system` - Instructions for the model
    /// * `prompt` - The user prompt
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The generated text or an error
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, ProviderError>;

    /// Provider name for log messages
    fn name(&self) -> &str;
}

/// Build the provider selected in the assistant config
pub fn from_config(config: &AssistantConfig) -> Result<Box<dyn Provider>> {
    let endpoint = config.get_endpoint();
    Url::parse(&endpoint).with_context(|| format!("Invalid provider endpoint: {}", endpoint))?;

    let model = config.get_model();
    let timeout = Duration::from_secs(config.get_timeout_secs());
    let temperature = config.temperature;

    let provider: Box<dyn Provider> = match config.provider {
        AssistantProvider::Ollama => Box::new(
            ollama::Ollama::new(endpoint, model, timeout).with_temperature(temperature),
        ),
        AssistantProvider::Anthropic => {
            let api_key = non_empty_key(config)?;
            Box::new(
                anthropic::Anthropic::new(api_key, endpoint, model, timeout)
                    .with_temperature(temperature),
            )
        }
        AssistantProvider::Gemini => {
            let api_key = non_empty_key(config)?;
            Box::new(
                gemini::Gemini::new(api_key, endpoint, model, timeout).with_temperature(temperature),
            )
        }
    };
    Ok(provider)
}

fn non_empty_key(config: &AssistantConfig) -> Result<String> {
    let api_key = config.get_api_key();
    if api_key.is_empty() {
        return Err(anyhow!(
            "Assistant API key is required for {} provider",
            config.provider.display_name()
        ));
    }
    Ok(api_key)
}

/// Map a transport failure onto a provider error
pub(crate) fn send_error(provider: &str, error: reqwest::Error) -> ProviderError {
    if error.is_connect() || error.is_timeout() {
        ProviderError::ConnectionError(format!("{}: {}", provider, error))
    } else {
        ProviderError::RequestFailed(format!("{}: {}", provider, error))
    }
}

/// Map a non-success HTTP status onto a provider error
pub(crate) fn status_error(status: StatusCode, body: String) -> ProviderError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::AuthenticationError(body),
        _ => ProviderError::ApiError {
            status_code: status.as_u16(),
            message: body,
        },
    }
}

pub mod anthropic;
pub mod gemini;
pub mod mock;
pub mod ollama;
