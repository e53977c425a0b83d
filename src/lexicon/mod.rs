/*!
 * The translation core.
 *
 * - `normalizer`: strips annotations and punctuation, collapses whitespace
 * - `glossary`: the token store and its core/particle invariant
 * - `registrar`: tokenization and glossary population
 * - `gate`: the integrity check that blocks incomplete translations
 * - `renderer`: the substitution pass and final join
 * - `session`: the state machine tying the stages together
 * - `commands`: `[ADD ...]` / `[RESET]` terminal commands
 */

pub mod commands;
pub mod gate;
pub mod glossary;
pub mod normalizer;
pub mod registrar;
pub mod renderer;
pub mod session;

pub use self::commands::Command;
pub use self::gate::IntegrityReport;
pub use self::glossary::{Category, EntryStatus, Glossary, GlossaryEntry, GlossaryRow, ImportSummary};
pub use self::normalizer::Normalizer;
pub use self::registrar::RegistrationOutcome;
pub use self::session::{Phase, Session, TranslationSummary};
