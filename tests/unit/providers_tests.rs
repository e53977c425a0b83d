/*!
 * Tests for provider construction and the mock provider
 */

use isotrans::app_config::{AssistantConfig, AssistantProvider};
use isotrans::errors::ProviderError;
use isotrans::providers::mock::MockProvider;
use isotrans::providers::{self, Provider};

fn hosted_config(provider: AssistantProvider) -> AssistantConfig {
    let mut config = AssistantConfig {
        provider,
        ..Default::default()
    };
    config.active_provider_config_mut().api_key = "test-key".to_string();
    config
}

#[test]
fn test_fromConfig_withKeys_shouldBuildEachProvider() {
    let anthropic = providers::from_config(&hosted_config(AssistantProvider::Anthropic)).unwrap();
    assert_eq!(anthropic.name(), "Anthropic");

    let gemini = providers::from_config(&hosted_config(AssistantProvider::Gemini)).unwrap();
    assert_eq!(gemini.name(), "Gemini");
}

#[test]
fn test_fromConfig_withoutKey_shouldNameProvider() {
    let config = AssistantConfig {
        provider: AssistantProvider::Anthropic,
        ..Default::default()
    };
    let error = providers::from_config(&config).unwrap_err();
    assert!(error.to_string().contains("Anthropic"));
}

#[test]
fn test_complete_withWorkingAndFailingMock_shouldCountRequests() {
    tokio_test::block_on(async {
        let working = MockProvider::working();
        assert!(working.complete("Reply with OK.", "Hello").await.is_ok());
        assert_eq!(working.request_count(), 1);

        let failing = MockProvider::failing();
        assert!(matches!(
            failing.complete("Reply with OK.", "Hello").await,
            Err(ProviderError::ConnectionError(_))
        ));
    });
}

#[test]
fn test_mockEmpty_shouldReturnEmptyText() {
    tokio_test::block_on(async {
        let provider: Box<dyn Provider> = Box::new(MockProvider::empty());
        assert_eq!(provider.complete("system", "List: lupus").await.unwrap(), "");
    });
}
