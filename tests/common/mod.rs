/*!
 * Common test utilities for the isotrans test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use isotrans::lexicon::Session;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a sample Latin source file for testing
pub fn create_test_source(dir: &Path, filename: &str) -> Result<PathBuf> {
    let content = "Arma virumque cano, Troiae qui primus ab oris\n\
                   Italiam, fato profugus; Laviniaque venit [v. 2]\n\
                   litora.";
    create_test_file(dir, filename, content)
}

/// Creates a glossary file covering every core token of the sample source
pub fn create_test_glossary(dir: &Path, filename: &str) -> Result<PathBuf> {
    let content = "Arma=armas\n\
                   virumque=y-al-hombre\n\
                   cano=canto\n\
                   Troiae=de-Troya\n\
                   primus=primero\n\
                   oris=costas\n\
                   Italiam=a-Italia\n\
                   fato=por-el-hado\n\
                   profugus=prófugo\n\
                   Laviniaque=y-lavinias\n\
                   venit=vino\n\
                   litora=playas\n";
    create_test_file(dir, filename, content)
}

/// Session holding the normalized and registered `text`
pub fn registered_session(text: &str) -> Session {
    let mut session = Session::default();
    session.normalize(text);
    session.register_lexicon();
    session
}
