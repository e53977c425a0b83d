/*!
 * AI-assisted glossary completion.
 *
 * Sends the unresolved tokens of a session to a [`Provider`], parses the
 * `token=translation` lines it answers with and merges them into entries
 * that are still empty. Provider failures are reported, never raised:
 * the glossary can always be completed by hand instead.
 */

use anyhow::Result;
use log::{debug, error, info};
use std::fmt;

use crate::app_config::Config;
use crate::language_utils::get_language_name;
use crate::lexicon::glossary::parse_assignment;
use crate::lexicon::Session;
use crate::providers::Provider;

/// Prompt sent to the suggestion provider.
#[derive(Debug, Clone)]
pub struct SuggestionPrompt {
    /// Template with `{source_language}` and `{target_language}` placeholders
    template: String,
    source_language: String,
    target_language: String,
}

impl SuggestionPrompt {
    /// Create a prompt from a template and two language names.
    pub fn new(template: &str, source_language: &str, target_language: &str) -> Self {
        Self {
            template: template.to_string(),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
        }
    }

    /// Build the prompt from config, resolving ISO codes to language names.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            &config.assistant.system_prompt,
            &get_language_name(&config.source_language)?,
            &get_language_name(&config.target_language)?,
        ))
    }

    /// The rendered system instructions.
    pub fn system(&self) -> String {
        self.template
            .replace("{source_language}", &self.source_language)
            .replace("{target_language}", &self.target_language)
    }

    /// The user message listing the tokens to translate.
    pub fn user(&self, tokens: &[String]) -> String {
        format!("List: {}", tokens.join(", "))
    }
}

/// Suggestions parsed out of a provider response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionBatch {
    pub pairs: Vec<(String, String)>,
    /// Non-blank lines that were not `token=translation`
    pub skipped: usize,
}

/// Parse a provider response, skipping anything that is not `token=translation`.
pub fn parse_suggestions(response: &str) -> SuggestionBatch {
    let mut batch = SuggestionBatch::default();
    for line in response.lines().filter(|line| !line.trim().is_empty()) {
        match parse_assignment(line) {
            Some((token, translation)) => batch
                .pairs
                .push((token.to_string(), translation.to_string())),
            None => {
                debug!("Ignoring suggestion line {:?}", line);
                batch.skipped += 1;
            }
        }
    }
    batch
}

/// What an autocomplete run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutocompleteOutcome {
    /// Nothing to ask for
    AlreadyComplete,
    /// Suggestions were merged
    Completed {
        /// Entries filled by this run
        merged: usize,
        /// Response lines that could not be parsed
        skipped: usize,
    },
    /// The provider could not be reached or answered with an error
    Failed(String),
}

impl fmt::Display for AutocompleteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyComplete => write!(f, "Glossary already complete."),
            Self::Completed { merged, .. } => write!(f, "AI completed {} terms.", merged),
            Self::Failed(message) => write!(f, "AI error: {}", message),
        }
    }
}

/// Ask `provider` for every unresolved token and merge the answers.
///
/// Only entries still present and still empty when the answer arrives are
/// filled, with status `AI_SUGGESTED`.
pub async fn autocomplete(
    session: &mut Session,
    provider: &dyn Provider,
    prompt: &SuggestionPrompt,
) -> AutocompleteOutcome {
    let pending = session.glossary().unresolved_tokens();
    if pending.is_empty() {
        return AutocompleteOutcome::AlreadyComplete;
    }

    info!("Requesting {} suggestions from {}", pending.len(), provider.name());
    let response = match provider.complete(&prompt.system(), &prompt.user(&pending)).await {
        Ok(response) => response,
        Err(e) => {
            error!("{} suggestion request failed: {}", provider.name(), e);
            return AutocompleteOutcome::Failed(e.to_string());
        }
    };

    let batch = parse_suggestions(&response);
    let glossary = session.glossary_mut();
    let merged = batch
        .pairs
        .iter()
        .filter(|(token, translation)| glossary.merge_suggestion(token, translation))
        .count();

    info!("Merged {} of {} suggestions", merged, batch.pairs.len());
    AutocompleteOutcome::Completed {
        merged,
        skipped: batch.skipped,
    }
}
