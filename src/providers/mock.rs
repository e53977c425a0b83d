/*!
 * Mock provider implementations for testing.
 *
 * This module provides a mock provider that simulates different behaviors:
 * - `MockProvider::working()` - Answers `token=TOKEN` for every listed token
 * - `MockProvider::with_response(..)` - Always returns the given text
 * - `MockProvider::failing()` - Always fails with a connection error
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Behavior mode for the mock provider
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Upper-cases every token found after the `List:` marker of the prompt
    Working,
    /// Returns a fixed response text
    Fixed(String),
    /// Always fails with a connection error
    Failing,
    /// Returns an empty response
    Empty,
}

/// Mock provider for testing suggestion behavior
#[derive(Debug, Clone)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of completed calls
    request_count: Arc<AtomicUsize>,
    /// Last prompt received
    last_prompt: Arc<Mutex<Option<String>>>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            last_prompt: Arc::new(Mutex::new(None)),
        }
    }

    /// Create a working mock provider
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock that always answers `response`
    pub fn with_response(response: impl Into<String>) -> Self {
        Self::new(MockBehavior::Fixed(response.into()))
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that returns empty responses
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Number of calls made so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// The most recent prompt
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().ok().and_then(|prompt| prompt.clone())
    }

    /// Answer every token of a `List: a, b, c` prompt with its upper-case form
    pub fn generate_suggestions(prompt: &str) -> String {
        let list = prompt
            .rsplit_once("List:")
            .map(|(_, list)| list)
            .unwrap_or("");
        list.split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| format!("{}={}", token, token.to_uppercase()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(&self, _system: &str, prompt: &str) -> Result<String, ProviderError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_prompt.lock() {
            *last = Some(prompt.to_string());
        }

        match &self.behavior {
            MockBehavior::Working => Ok(Self::generate_suggestions(prompt)),
            MockBehavior::Fixed(response) => Ok(response.clone()),
            MockBehavior::Failing => Err(ProviderError::ConnectionError(
                "Mock provider is unreachable".to_string(),
            )),
            MockBehavior::Empty => Ok(String::new()),
        }
    }

    fn name(&self) -> &str {
        "Mock"
    }
}
