/*!
 * Lexical registration: tokenize normalized text and populate the glossary.
 */

use log::{debug, info};
use std::fmt;

use super::glossary::Glossary;

/// Split normalized text into `(position, token)` pairs.
///
/// Splits on single spaces. Empty pieces produced by consecutive spaces are
/// skipped but still advance the position counter.
pub fn tokenize(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split(' ')
        .enumerate()
        .filter(|(_, token)| !token.is_empty())
}

/// Outcome of a registration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// The source text was empty; the glossary was not touched
    NothingToProcess,
    /// Tokens were registered
    Registered {
        /// Entries created by this run
        new_entries: usize,
        /// Tokens read from the source text
        tokens: usize,
    },
}

impl RegistrationOutcome {
    pub fn new_entries(&self) -> usize {
        match self {
            Self::NothingToProcess => 0,
            Self::Registered { new_entries, .. } => *new_entries,
        }
    }
}

impl fmt::Display for RegistrationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NothingToProcess => write!(f, "No source text."),
            Self::Registered { new_entries, .. } => {
                write!(f, "Analysis complete. {} new terms.", new_entries)
            }
        }
    }
}

/// Register every token of `source_text` in `glossary`.
///
/// Re-running on the same or an extended text only appends occurrences to
/// known entries, so translations and categories set in between survive.
pub fn register(source_text: &str, glossary: &mut Glossary, core_min_len: usize) -> RegistrationOutcome {
    if source_text.is_empty() {
        debug!("Registration skipped: empty source text");
        return RegistrationOutcome::NothingToProcess;
    }

    let mut new_entries = 0;
    let mut tokens = 0;
    for (position, token) in tokenize(source_text) {
        tokens += 1;
        if glossary.record_occurrence(token, position, core_min_len) {
            new_entries += 1;
        }
    }

    info!("Registered {} tokens, {} new glossary entries", tokens, new_entries);
    RegistrationOutcome::Registered { new_entries, tokens }
}
