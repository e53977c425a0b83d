/*!
 * # isotrans - isomorphic glossary-driven translation
 *
 * A Rust library for word-for-word translation of a source text through a
 * user-curated glossary. Every source token maps to exactly one output
 * token, in the same position.
 *
 * ## Features
 *
 * - Source normalization (annotations, punctuation, whitespace)
 * - Glossary with CORE / PARTICLE classification by token length
 * - Integrity gate: no rendering while a core token lacks a translation
 * - `{unknown}` / `[particle]` fallback rendering
 * - Bulk `token=translation` import and `[ADD ...]` / `[RESET]` commands
 * - Optional AI suggestions for empty entries:
 *   - Ollama (local LLM)
 *   - Anthropic API
 *   - Gemini API
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `lexicon`: The translation core:
 *   - `lexicon::normalizer`: Source text cleanup
 *   - `lexicon::glossary`: The glossary store
 *   - `lexicon::registrar`: Tokenization and registration
 *   - `lexicon::gate`: Integrity checking
 *   - `lexicon::renderer`: Substitution and joining
 *   - `lexicon::session`: The session state machine
 *   - `lexicon::commands`: Terminal commands
 * - `assistant`: AI-assisted glossary completion
 * - `providers`: Client implementations for various LLM providers
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod assistant;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod lexicon;
pub mod providers;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, RunReport, RunRequest};
pub use errors::{AppError, CommandError, ImportError, ProtocolError, ProviderError};
pub use language_utils::{get_language_name, normalize_to_part2t};
pub use lexicon::{Category, EntryStatus, Glossary, GlossaryEntry, Phase, Session};
