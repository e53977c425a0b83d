/*!
 * Tests for terminal-style glossary commands
 */

use isotrans::errors::CommandError;
use isotrans::lexicon::{Category, Command, EntryStatus, Phase};

use crate::common;

#[test]
fn test_add_overExistingParticle_shouldPromoteToAssignedCore() {
    let mut session = common::registered_session("lupus est");
    assert_eq!(session.glossary().get("est").unwrap().category, Category::Particle);

    let command: Command = "[ADD est=es]".parse().unwrap();
    assert_eq!(session.execute(&command), "Added: est");

    let entry = session.glossary().get("est").unwrap();
    assert_eq!(entry.category, Category::Core);
    assert_eq!(entry.status, EntryStatus::Assigned);
    assert_eq!(entry.token_tgt, "es");
}

#[test]
fn test_add_withLowercaseSpanishKeyword_shouldParse() {
    let command: Command = "[añade lupus=lobo]".parse().unwrap();
    assert_eq!(
        command,
        Command::Add {
            token: "lupus".to_string(),
            translation: "lobo".to_string()
        }
    );
}

#[test]
fn test_add_withEmptyTranslation_shouldBeFormatError() {
    let error = "[ADD lupus=]".parse::<Command>().unwrap_err();
    assert_eq!(error, CommandError::Format("[ADD lupus=]".to_string()));
}

#[test]
fn test_reset_shouldDiscardEverything() {
    let mut session = common::registered_session("lupus est");
    session.glossary_mut().assign("lupus", "lobo");
    session.translate().unwrap();
    assert_eq!(session.phase(), Phase::Translated);

    let message = session.execute(&"[ REINICIAR ]".parse().unwrap());

    assert_eq!(message, "Session reset.");
    assert_eq!(session.phase(), Phase::Waiting);
    assert!(session.source_text().is_empty());
    assert!(session.glossary().is_empty());
    assert!(session.rendered_tokens().is_empty());
}
