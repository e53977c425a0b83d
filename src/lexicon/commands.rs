/*!
 * Terminal-style glossary commands.
 *
 * `[ADD token=translation]` binds a token as a confirmed core entry and
 * `[RESET]` clears the session. The Spanish spellings `[AÑADE ...]` and
 * `[REINICIAR]` are accepted as well.
 */

use log::info;
use std::str::FromStr;

use crate::errors::CommandError;

use super::glossary::parse_assignment;
use super::session::Session;

const ADD_KEYWORDS: [&str; 2] = ["ADD", "AÑADE"];
const RESET_KEYWORDS: [&str; 2] = ["RESET", "REINICIAR"];

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create or overwrite `token` as CORE / ASSIGNED
    Add { token: String, translation: String },
    /// Reset the session
    Reset,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let body = trimmed
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or_else(|| CommandError::Unknown(trimmed.to_string()))?
            .trim();

        if RESET_KEYWORDS.iter().any(|keyword| body.eq_ignore_ascii_case(keyword)) {
            return Ok(Command::Reset);
        }

        let (keyword, rest) = body.split_once(char::is_whitespace).unwrap_or((body, ""));
        if !ADD_KEYWORDS.iter().any(|k| keyword.to_uppercase() == *k) {
            return Err(CommandError::Unknown(trimmed.to_string()));
        }

        let (token, translation) =
            parse_assignment(rest).ok_or_else(|| CommandError::Format(trimmed.to_string()))?;
        Ok(Command::Add {
            token: token.to_string(),
            translation: translation.to_string(),
        })
    }
}

impl Session {
    /// Apply a command and return a message for the user.
    pub fn execute(&mut self, command: &Command) -> String {
        match command {
            Command::Add { token, translation } => {
                self.glossary_mut().upsert_assigned(token, translation);
                info!("Command added {:?} = {:?}", token, translation);
                format!("Added: {}", token)
            }
            Command::Reset => {
                self.reset();
                "Session reset.".to_string()
            }
        }
    }
}
