/*!
 * Integration tests for application lifecycle
 */

use anyhow::Result;
use std::fs;

use isotrans::app_config::Config;
use isotrans::app_controller::{Controller, RunRequest};
use isotrans::assistant::AutocompleteOutcome;
use isotrans::errors::{AppError, CommandError, ImportError};
use isotrans::providers::mock::MockProvider;

use crate::common;

const EXPECTED_RENDERING: &str = "armas y-al-hombre canto de-Troya [qui] primero [ab] costas a-Italia por-el-hado prófugo y-lavinias vino playas";

/// Test the controller with custom configuration
#[test]
fn test_controller_withInvalidLanguage_shouldFail() {
    let config = Config {
        target_language: "zz".to_string(),
        ..Config::default()
    };
    assert!(Controller::with_config(config).is_err());
}

#[test]
fn test_run_withGlossaryFile_shouldWriteRendering() -> Result<()> {
    let controller = Controller::with_config(Config::default())?;
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_source(temp_dir.path(), "aeneid.txt")?;
    let glossary = common::create_test_glossary(temp_dir.path(), "glossary.txt")?;
    let output = controller.default_output_path(&input);

    let request = RunRequest {
        input,
        glossaries: vec![glossary],
        output: Some(output.clone()),
        ..RunRequest::default()
    };
    let report = tokio_test::block_on(controller.run(&request))?;

    assert_eq!(output, temp_dir.path().join("aeneid.es.txt"));
    assert_eq!(report.rendered, EXPECTED_RENDERING);
    assert_eq!(report.tokens, 14);
    assert!(report.assist.is_none());
    assert_eq!(fs::read_to_string(&output)?, EXPECTED_RENDERING);
    Ok(())
}

#[test]
fn test_run_withMissingCoreTokens_shouldFailWithoutOutput() -> Result<()> {
    let controller = Controller::with_config(Config::default())?;
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "short.txt", "lupus est")?;
    let output = temp_dir.path().join("short.es.txt");

    let request = RunRequest {
        input,
        output: Some(output.clone()),
        ..RunRequest::default()
    };
    let error = tokio_test::block_on(controller.run(&request)).unwrap_err();

    match error {
        AppError::Protocol(protocol) => assert_eq!(protocol.missing_preview(), ["lupus"]),
        other => panic!("unexpected error: {}", other),
    }
    assert!(!output.exists());
    Ok(())
}

#[test]
fn test_run_withCommands_shouldApplyThemAfterImports() -> Result<()> {
    let controller = Controller::with_config(Config::default())?;
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "short.txt", "lupus est")?;
    let glossary = common::create_test_file(temp_dir.path(), "g.txt", "lupus=loba\n")?;

    let request = RunRequest {
        input,
        glossaries: vec![glossary],
        commands: vec!["[ADD lupus=lobo]".to_string(), "[AÑADE est=es]".to_string()],
        ..RunRequest::default()
    };
    let report = tokio_test::block_on(controller.run(&request))?;

    assert_eq!(report.rendered, "lobo es");
    assert!(report.output_path.is_none());
    Ok(())
}

#[test]
fn test_prepare_withBadCommand_shouldReturnCommandError() -> Result<()> {
    let controller = Controller::with_config(Config::default())?;
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "short.txt", "lupus")?;

    let request = RunRequest {
        input,
        commands: vec!["[DELETE lupus]".to_string()],
        ..RunRequest::default()
    };

    assert!(matches!(
        controller.prepare(&request),
        Err(AppError::Command(CommandError::Unknown(_)))
    ));
    Ok(())
}

#[test]
fn test_importGlossaryFile_withMissingFile_shouldReturnImportError() -> Result<()> {
    let controller = Controller::with_config(Config::default())?;
    let temp_dir = common::create_temp_dir()?;
    let mut session = controller.new_session();

    let result = controller.import_glossary_file(&mut session, &temp_dir.path().join("nope.txt"));

    assert!(matches!(result, Err(ImportError::Unreadable { .. })));
    Ok(())
}

#[test]
fn test_runWithProvider_shouldFillGlossaryThenTranslate() -> Result<()> {
    let controller = Controller::with_config(Config::default())?;
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "short.txt", "lupus est")?;
    let provider = MockProvider::with_response("lupus=lobo");

    let request = RunRequest {
        input,
        ..RunRequest::default()
    };
    let report = tokio_test::block_on(controller.run_with_provider(&request, &provider))?;

    assert_eq!(report.rendered, "lobo [est]");
    assert_eq!(
        report.assist,
        Some(AutocompleteOutcome::Completed { merged: 1, skipped: 0 })
    );
    Ok(())
}

#[test]
fn test_runWithProvider_withFailingProvider_shouldStillHitTheGate() -> Result<()> {
    let controller = Controller::with_config(Config::default())?;
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "short.txt", "lupus est")?;

    let request = RunRequest {
        input,
        ..RunRequest::default()
    };
    let result = tokio_test::block_on(controller.run_with_provider(&request, &MockProvider::failing()));

    assert!(matches!(result, Err(AppError::Protocol(_))));
    Ok(())
}

#[test]
fn test_run_withMissingInput_shouldReturnFileError() -> Result<()> {
    let controller = Controller::with_config(Config::default())?;
    let request = RunRequest {
        input: "does/not/exist.txt".into(),
        ..RunRequest::default()
    };

    let result = tokio_test::block_on(controller.run(&request));

    assert!(matches!(result, Err(AppError::File(ref msg)) if msg.contains("exist.txt")));
    Ok(())
}
