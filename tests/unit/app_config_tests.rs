/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use isotrans::app_config::{AssistantProvider, Config, LogLevel, ProviderConfig, TranslationRules};

use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.source_language, "la");
    assert_eq!(config.target_language, "es");
    assert_eq!(config.rules.core_min_len, 4);
    assert_eq!(config.rules.stripped_punctuation, ";,.");
    assert_eq!(config.rules.missing_preview_limit, 3);
    assert_eq!(config.assistant.provider, AssistantProvider::Ollama);
    assert_eq!(config.assistant.available_providers.len(), 3);
    assert_eq!(config.log_level, LogLevel::Info);

    let ollama = config
        .assistant
        .get_provider_config(&AssistantProvider::Ollama)
        .expect("Ollama provider config should exist");
    assert_eq!(ollama.model, "llama3.2:3b");
    assert_eq!(ollama.endpoint, "http://localhost:11434");
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.source_language = "xyz".to_string();
    assert!(config.validate().is_err());
    config.source_language = "lat".to_string();
    assert!(config.validate().is_ok());

    config.rules.core_min_len = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_validateAssistant_withHostedProvider_shouldRequireApiKey() {
    let mut config = Config::default();
    assert!(config.validate_assistant().is_ok());

    config.assistant.provider = AssistantProvider::Gemini;
    assert!(config.validate_assistant().is_err());

    config.assistant.active_provider_config_mut().api_key = "secret".to_string();
    assert!(config.validate_assistant().is_ok());
}

#[test]
fn test_activeProviderConfigMut_withMissingEntry_shouldCreateDefaults() {
    let mut config = Config::default();
    config.assistant.available_providers.clear();
    config.assistant.provider = AssistantProvider::Anthropic;

    config.assistant.active_provider_config_mut().model = "claude-custom".to_string();

    assert_eq!(config.assistant.available_providers.len(), 1);
    assert_eq!(config.assistant.get_model(), "claude-custom");
    assert_eq!(config.assistant.get_endpoint(), "https://api.anthropic.com");
    assert_eq!(config.assistant.get_timeout_secs(), 60);
}

#[test]
fn test_assistantConfig_withEmptyProviderFields_shouldFallBackToDefaults() {
    let mut config = Config::default();
    config.assistant.available_providers = vec![ProviderConfig {
        provider_type: "ollama".to_string(),
        model: String::new(),
        api_key: String::new(),
        endpoint: String::new(),
        timeout_secs: 0,
    }];

    assert_eq!(config.assistant.get_model(), "llama3.2:3b");
    assert_eq!(config.assistant.get_endpoint(), "http://localhost:11434");
    assert_eq!(config.assistant.get_timeout_secs(), 30);
}

#[test]
fn test_assistantProvider_fromStr_shouldBeCaseInsensitive() {
    assert_eq!("Gemini".parse::<AssistantProvider>().unwrap(), AssistantProvider::Gemini);
    assert_eq!("ANTHROPIC".parse::<AssistantProvider>().unwrap(), AssistantProvider::Anthropic);
    assert!("openai".parse::<AssistantProvider>().is_err());
    assert_eq!(AssistantProvider::Gemini.to_string(), "gemini");
}

#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let config = Config::load_or_create(&path)?;
    assert!(path.exists());
    assert_eq!(config.target_language, "es");

    let reloaded = Config::load_or_create(&path)?;
    assert_eq!(reloaded.rules, config.rules);
    Ok(())
}

#[test]
fn test_loadOrCreate_withCustomRules_shouldReadThem() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{
            "source_language": "la",
            "target_language": "en",
            "rules": { "core_min_len": 3, "unknown_open": "<", "unknown_close": ">" },
            "log_level": "debug"
        }"#,
    )?;

    let config = Config::load_or_create(&path)?;
    assert_eq!(config.target_language, "en");
    assert_eq!(config.rules.core_min_len, 3);
    assert_eq!(config.rules.mark_unknown("lupus"), "<lupus>");
    assert_eq!(config.rules.mark_particle("et"), "[et]");
    assert_eq!(config.log_level, LogLevel::Debug);
    Ok(())
}

#[test]
fn test_loadOrCreate_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;
    assert!(Config::load_or_create(&path).is_err());
    Ok(())
}

#[test]
fn test_rules_default_shouldValidate() {
    assert!(TranslationRules::default().validate().is_ok());
}
