/*!
 * Substitution pass producing one output token per source token.
 */

use log::{debug, warn};

use crate::app_config::TranslationRules;

use super::glossary::{Category, Glossary};
use super::registrar::tokenize;

/// Substitute every token of `source_text` from the glossary.
///
/// Never fails: tokens the glossary cannot resolve get a bracketed fallback
/// so that the output keeps one entry per source token.
pub fn substitute(source_text: &str, glossary: &Glossary, rules: &TranslationRules) -> Vec<String> {
    tokenize(source_text)
        .map(|(position, token)| match glossary.get(token) {
            None => {
                warn!("Token {:?} at position {} is not in the glossary", token, position);
                rules.mark_unknown(token)
            }
            Some(entry) if entry.is_resolved() => entry.token_tgt.clone(),
            Some(entry) => match entry.category {
                Category::Core => {
                    debug!("Core token {:?} rendered without translation", token);
                    rules.mark_unknown(token)
                }
                Category::Particle => rules.mark_particle(token),
            },
        })
        .collect()
}

/// Join rendered tokens with single spaces.
pub fn join(tokens: &[String]) -> String {
    tokens.join(" ")
}
