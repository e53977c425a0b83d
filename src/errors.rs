/*!
 * Error types for the isotrans application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors raised by the translation protocol itself.
///
/// This is the only error the core pipeline can produce. It is never
/// retried automatically: the glossary has to be completed and the
/// translation re-run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// One or more core tokens have no translation yet
    #[error("INCOMPLETE GLOSSARY: {total} core token(s) missing a translation (e.g. {missing_preview:?})")]
    IncompleteGlossary {
        /// Leading slice of the missing tokens, in glossary order
        missing_preview: Vec<String>,
        /// Total number of missing core tokens
        total: usize,
    },
}

impl ProtocolError {
    /// Tokens shown in the error message
    pub fn missing_preview(&self) -> &[String] {
        match self {
            Self::IncompleteGlossary { missing_preview, .. } => missing_preview,
        }
    }

    /// Total number of blocking tokens
    pub fn total_missing(&self) -> usize {
        match self {
            Self::IncompleteGlossary { total, .. } => *total,
        }
    }
}

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors from terminal-style glossary commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The command text matched no known command
    #[error("Unknown command: {0}")]
    Unknown(String),

    /// An ADD command without a usable `token=translation` body
    #[error("Format error: expected [ADD token=translation], got {0}")]
    Format(String),
}

/// Errors that can occur while reading a glossary import source
#[derive(Error, Debug)]
pub enum ImportError {
    /// The glossary file could not be read
    #[error("Cannot read glossary file {path}: {source}")]
    Unreadable {
        /// Path that was requested
        path: String,
        /// Underlying IO failure
        #[source]
        source: std::io::Error,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// The integrity gate refused to translate
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from a glossary command
    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    /// Error from a glossary import
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
