use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO)
    pub source_language: String,

    /// Target language code (ISO)
    pub target_language: String,

    /// Classification and rendering rules
    #[serde(default)]
    pub rules: TranslationRules,

    /// AI assistant config
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Heuristics that drive normalization, classification and fallback rendering.
///
/// None of these values carry linguistic meaning; they are kept configurable
/// so a deployment can tune them without touching the pipeline.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TranslationRules {
    /// Tokens with fewer characters than this are particles, the rest are core
    #[serde(default = "default_core_min_len")]
    pub core_min_len: usize,

    /// Characters removed by the normalizer
    #[serde(default = "default_stripped_punctuation")]
    pub stripped_punctuation: String,

    /// Opening mark for tokens missing from the glossary
    #[serde(default = "default_unknown_open")]
    pub unknown_open: String,

    /// Closing mark for tokens missing from the glossary
    #[serde(default = "default_unknown_close")]
    pub unknown_close: String,

    /// Opening mark for unresolved particles
    #[serde(default = "default_particle_open")]
    pub particle_open: String,

    /// Closing mark for unresolved particles
    #[serde(default = "default_particle_close")]
    pub particle_close: String,

    /// How many missing core tokens a protocol error lists
    #[serde(default = "default_missing_preview_limit")]
    pub missing_preview_limit: usize,
}

impl Default for TranslationRules {
    fn default() -> Self {
        Self {
            core_min_len: default_core_min_len(),
            stripped_punctuation: default_stripped_punctuation(),
            unknown_open: default_unknown_open(),
            unknown_close: default_unknown_close(),
            particle_open: default_particle_open(),
            particle_close: default_particle_close(),
            missing_preview_limit: default_missing_preview_limit(),
        }
    }
}

impl TranslationRules {
    /// Wrap a token that was never registered
    pub fn mark_unknown(&self, token: &str) -> String {
        format!("{}{}{}", self.unknown_open, token, self.unknown_close)
    }

    /// Wrap a particle that was registered but left unresolved
    pub fn mark_particle(&self, token: &str) -> String {
        format!("{}{}{}", self.particle_open, token, self.particle_close)
    }

    /// Check the rules for values that would break the pipeline
    pub fn validate(&self) -> Result<()> {
        if self.core_min_len == 0 {
            return Err(anyhow!("core_min_len must be at least 1"));
        }
        if self.stripped_punctuation.chars().any(char::is_whitespace) {
            return Err(anyhow!("stripped_punctuation must not contain whitespace"));
        }
        if self.unknown_open == self.particle_open && self.unknown_close == self.particle_close {
            return Err(anyhow!(
                "Unknown-token and unresolved-particle markers must differ"
            ));
        }
        Ok(())
    }
}

/// Suggestion provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AssistantProvider {
    // @provider: Ollama
    #[default]
    Ollama,
    // @provider: Anthropic
    Anthropic,
    // @provider: Google Gemini
    Gemini,
}

impl AssistantProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Ollama => "Ollama",
            Self::Anthropic => "Anthropic",
            Self::Gemini => "Gemini",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Ollama => "ollama".to_string(),
            Self::Anthropic => "anthropic".to_string(),
            Self::Gemini => "gemini".to_string(),
        }
    }

    // @returns: Whether the hosted API needs a key
    pub fn requires_api_key(&self) -> bool {
        !matches!(self, Self::Ollama)
    }
}

impl std::fmt::Display for AssistantProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for AssistantProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "anthropic" => Ok(Self::Anthropic),
            "gemini" => Ok(Self::Gemini),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Model name
    #[serde(default = "String::new")]
    pub model: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: AssistantProvider) -> Self {
        match provider_type {
            AssistantProvider::Ollama => Self {
                provider_type: "ollama".to_string(),
                model: default_ollama_model(),
                api_key: String::new(),
                endpoint: default_ollama_endpoint(),
                timeout_secs: default_timeout_secs(),
            },
            AssistantProvider::Anthropic => Self {
                provider_type: "anthropic".to_string(),
                model: default_anthropic_model(),
                api_key: String::new(),
                endpoint: default_anthropic_endpoint(),
                timeout_secs: default_hosted_timeout_secs(),
            },
            AssistantProvider::Gemini => Self {
                provider_type: "gemini".to_string(),
                model: default_gemini_model(),
                api_key: String::new(),
                endpoint: default_gemini_endpoint(),
                timeout_secs: default_hosted_timeout_secs(),
            },
        }
    }
}

/// AI assistant configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AssistantConfig {
    /// Provider used for suggestions
    #[serde(default)]
    pub provider: AssistantProvider,

    /// Available suggestion providers
    #[serde(default)]
    pub available_providers: Vec<ProviderConfig>,

    /// System prompt template for suggestions
    /// Placeholders: {source_language}, {target_language}
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Temperature parameter for text generation (0.0 to 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            provider: AssistantProvider::default(),
            available_providers: vec![
                ProviderConfig::new(AssistantProvider::Ollama),
                ProviderConfig::new(AssistantProvider::Anthropic),
                ProviderConfig::new(AssistantProvider::Gemini),
            ],
            system_prompt: default_system_prompt(),
            temperature: default_temperature(),
        }
    }
}

impl AssistantConfig {
    /// Get the active provider configuration from the available_providers array
    pub fn get_active_provider_config(&self) -> Option<&ProviderConfig> {
        self.get_provider_config(&self.provider)
    }

    /// Get a specific provider configuration by type
    pub fn get_provider_config(&self, provider_type: &AssistantProvider) -> Option<&ProviderConfig> {
        let provider_str = provider_type.to_lowercase_string();
        self.available_providers
            .iter()
            .find(|p| p.provider_type == provider_str)
    }

    /// Mutable access to the active provider configuration, created on demand
    pub fn active_provider_config_mut(&mut self) -> &mut ProviderConfig {
        let provider_str = self.provider.to_lowercase_string();
        let index = match self
            .available_providers
            .iter()
            .position(|p| p.provider_type == provider_str)
        {
            Some(index) => index,
            None => {
                self.available_providers
                    .push(ProviderConfig::new(self.provider.clone()));
                self.available_providers.len() - 1
            }
        };
        &mut self.available_providers[index]
    }

    /// Get the model for the active provider
    pub fn get_model(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.model.is_empty() {
                return provider_config.model.clone();
            }
        }

        match self.provider {
            AssistantProvider::Ollama => default_ollama_model(),
            AssistantProvider::Anthropic => default_anthropic_model(),
            AssistantProvider::Gemini => default_gemini_model(),
        }
    }

    /// Get the API key for the active provider
    pub fn get_api_key(&self) -> String {
        self.get_active_provider_config()
            .map(|p| p.api_key.clone())
            .unwrap_or_default()
    }

    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.endpoint.is_empty() {
                return provider_config.endpoint.clone();
            }
        }

        match self.provider {
            AssistantProvider::Ollama => default_ollama_endpoint(),
            AssistantProvider::Anthropic => default_anthropic_endpoint(),
            AssistantProvider::Gemini => default_gemini_endpoint(),
        }
    }

    /// Get the request timeout for the active provider
    pub fn get_timeout_secs(&self) -> u64 {
        self.get_active_provider_config()
            .map(|p| p.timeout_secs)
            .filter(|secs| *secs > 0)
            .unwrap_or_else(default_timeout_secs)
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<&LogLevel> for log::LevelFilter {
    fn from(level: &LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_core_min_len() -> usize {
    4
}

fn default_stripped_punctuation() -> String {
    ";,.".to_string()
}

fn default_unknown_open() -> String {
    "{".to_string()
}

fn default_unknown_close() -> String {
    "}".to_string()
}

fn default_particle_open() -> String {
    "[".to_string()
}

fn default_particle_close() -> String {
    "]".to_string()
}

fn default_missing_preview_limit() -> usize {
    3
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_hosted_timeout_secs() -> u64 {
    60
}

fn default_temperature() -> f32 {
    0.0
}

fn default_ollama_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_anthropic_endpoint() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_gemini_endpoint() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_ollama_model() -> String {
    "llama3.2:3b".to_string()
}

fn default_anthropic_model() -> String {
    "claude-3-haiku-20240307".to_string()
}

fn default_gemini_model() -> String {
    "gemini-pro".to_string()
}

fn default_system_prompt() -> String {
    "Translate from {source_language} to {target_language}. Strict 1:1 literality: one translation per word, no commentary. Format: token=translation, one per line.".to_string()
}

impl Config {
    /// Load a configuration file, creating a default one when it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))
        } else {
            warn!("Config file not found at '{}', creating default config.", path.display());
            let config = Config::default();
            config.save(path)?;
            Ok(config)
        }
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let _source_name = crate::language_utils::get_language_name(&self.source_language)?;
        let _target_name = crate::language_utils::get_language_name(&self.target_language)?;

        self.rules.validate()?;

        Ok(())
    }

    /// Validate the settings needed to call the AI assistant
    pub fn validate_assistant(&self) -> Result<()> {
        let provider = &self.assistant.provider;
        if provider.requires_api_key() && self.assistant.get_api_key().is_empty() {
            return Err(anyhow!(
                "Assistant API key is required for {} provider",
                provider.display_name()
            ));
        }
        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: "la".to_string(),
            target_language: "es".to_string(),
            rules: TranslationRules::default(),
            assistant: AssistantConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
