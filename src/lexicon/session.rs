/*!
 * Translation session: the state machine that owns one document's glossary.
 *
 * ```text
 * WAITING --normalize + register--> LEXICON_READY --translate--> TRANSLATED
 * TRANSLATED --translate--> TRANSLATED
 * any --reset--> WAITING
 * ```
 */

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::app_config::TranslationRules;
use crate::errors::ProtocolError;

use super::gate::{check_integrity, IntegrityReport};
use super::glossary::{Glossary, ImportSummary};
use super::normalizer::Normalizer;
use super::registrar::{register, RegistrationOutcome};
use super::renderer::{join, substitute};

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    #[default]
    Waiting,
    LexiconReady,
    Translated,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Waiting => write!(f, "WAITING"),
            Self::LexiconReady => write!(f, "LEXICON_READY"),
            Self::Translated => write!(f, "TRANSLATED"),
        }
    }
}

/// Summary of a successful translation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslationSummary {
    /// Rendered tokens, equal to the number of source tokens
    pub tokens: usize,
}

impl fmt::Display for TranslationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Translation complete. {} tokens rendered.", self.tokens)
    }
}

/// In-memory state for translating one document.
#[derive(Debug, Clone)]
pub struct Session {
    rules: TranslationRules,
    normalizer: Normalizer,
    source_text: String,
    glossary: Glossary,
    rendered_tokens: Vec<String>,
    phase: Phase,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(TranslationRules::default())
    }
}

impl Session {
    /// Create an empty session using the given rules.
    pub fn new(rules: TranslationRules) -> Self {
        Self {
            normalizer: Normalizer::new(&rules.stripped_punctuation),
            rules,
            source_text: String::new(),
            glossary: Glossary::new(),
            rendered_tokens: Vec::new(),
            phase: Phase::Waiting,
        }
    }

    pub fn rules(&self) -> &TranslationRules {
        &self.rules
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn glossary(&self) -> &Glossary {
        &self.glossary
    }

    /// Write access for the editing collaborator.
    pub fn glossary_mut(&mut self) -> &mut Glossary {
        &mut self.glossary
    }

    pub fn rendered_tokens(&self) -> &[String] {
        &self.rendered_tokens
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Normalize `raw_text` and make it the session's source text.
    pub fn normalize(&mut self, raw_text: &str) -> &str {
        self.source_text = self.normalizer.normalize(raw_text);
        debug!("Normalized source text to {} chars", self.source_text.len());
        &self.source_text
    }

    /// Register the current source text in the glossary.
    pub fn register_lexicon(&mut self) -> RegistrationOutcome {
        let outcome = register(&self.source_text, &mut self.glossary, self.rules.core_min_len);
        if let RegistrationOutcome::Registered { .. } = outcome {
            self.phase = Phase::LexiconReady;
        }
        outcome
    }

    /// Bulk import of `token=translation` lines.
    pub fn import_glossary(&mut self, text: &str) -> ImportSummary {
        self.glossary.import_lines(text)
    }

    /// Query the integrity gate without translating.
    pub fn check_integrity(&self) -> IntegrityReport {
        check_integrity(&self.glossary)
    }

    /// Run the gate, then the substitution pass.
    ///
    /// On a gate failure nothing is changed: the previous rendering and phase
    /// are kept.
    pub fn translate(&mut self) -> Result<TranslationSummary, ProtocolError> {
        self.check_integrity()
            .ensure_complete(self.rules.missing_preview_limit)?;

        self.rendered_tokens = substitute(&self.source_text, &self.glossary, &self.rules);
        self.phase = Phase::Translated;

        let summary = TranslationSummary {
            tokens: self.rendered_tokens.len(),
        };
        info!("{}", summary);
        Ok(summary)
    }

    /// Join the stored rendering. Does not re-run the translation.
    pub fn render(&self) -> String {
        join(&self.rendered_tokens)
    }

    /// Discard source text, glossary and rendering.
    pub fn reset(&mut self) {
        self.source_text.clear();
        self.glossary = Glossary::new();
        self.rendered_tokens.clear();
        self.phase = Phase::Waiting;
        info!("Session reset");
    }
}
