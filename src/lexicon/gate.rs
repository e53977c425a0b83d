/*!
 * Integrity gate: blocks translation while core bindings are missing.
 */

use crate::errors::ProtocolError;

use super::glossary::Glossary;

/// Result of an integrity check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrityReport {
    /// Core tokens without translation, in glossary order
    pub missing: Vec<String>,
}

impl IntegrityReport {
    pub fn is_ok(&self) -> bool {
        self.missing.is_empty()
    }

    /// Turn a failed report into a protocol error listing at most `preview_limit` tokens.
    pub fn ensure_complete(&self, preview_limit: usize) -> Result<(), ProtocolError> {
        if self.is_ok() {
            return Ok(());
        }
        Err(ProtocolError::IncompleteGlossary {
            missing_preview: self.missing.iter().take(preview_limit).cloned().collect(),
            total: self.missing.len(),
        })
    }
}

/// Every core entry with an empty translation is missing, whatever its status.
/// Particles never block.
pub fn check_integrity(glossary: &Glossary) -> IntegrityReport {
    IntegrityReport {
        missing: glossary.missing_core_tokens(),
    }
}
