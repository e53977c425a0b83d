/*!
 * The glossary store.
 *
 * One entry per distinct source token, kept in first-registration order.
 * The store is only ever appended to or updated; it is emptied by a
 * session reset and nothing else.
 */

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Whether a token must be translated before rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    /// Translation is mandatory; an empty core entry blocks translation
    Core,
    /// Translation is optional; unresolved particles get a fallback rendering
    Particle,
}

impl Category {
    /// Length heuristic applied once, at first registration.
    pub fn classify(token: &str, core_min_len: usize) -> Self {
        if token.chars().count() < core_min_len {
            Self::Particle
        } else {
            Self::Core
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Core => write!(f, "CORE"),
            Self::Particle => write!(f, "PARTICLE"),
        }
    }
}

/// Where the current translation of an entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryStatus {
    /// No translation yet
    Pending,
    /// Set by a person, through an edit, a command or an import
    Assigned,
    /// Set by the AI assistant and not reviewed yet
    AiSuggested,
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Assigned => write!(f, "ASSIGNED"),
            Self::AiSuggested => write!(f, "AI_SUGGESTED"),
        }
    }
}

/// Classification record for one source token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryEntry {
    /// Source token, unique within the store
    pub token_src: String,
    /// Resolved translation; empty means unresolved
    pub token_tgt: String,
    /// Core or particle
    pub category: Category,
    /// Provenance of `token_tgt`
    pub status: EntryStatus,
    /// Token positions where this token was seen, in registration order
    pub occurrences: Vec<usize>,
}

impl GlossaryEntry {
    /// A freshly registered, untranslated entry.
    pub fn pending(token: &str, category: Category, position: usize) -> Self {
        Self {
            token_src: token.to_string(),
            token_tgt: String::new(),
            category,
            status: EntryStatus::Pending,
            occurrences: vec![position],
        }
    }

    /// An entry created from outside the pipeline (import or command).
    pub fn assigned(token: &str, translation: &str) -> Self {
        Self {
            token_src: token.to_string(),
            token_tgt: translation.to_string(),
            category: Category::Core,
            status: EntryStatus::Assigned,
            occurrences: Vec::new(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        !self.token_tgt.is_empty()
    }

    /// Core entry without translation
    pub fn is_blocking(&self) -> bool {
        self.category == Category::Core && self.token_tgt.is_empty()
    }
}

/// One row of the editing table: `(token_src, category, token_tgt, status)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryRow {
    pub token_src: String,
    pub category: Category,
    pub token_tgt: String,
    pub status: EntryStatus,
}

impl From<&GlossaryEntry> for GlossaryRow {
    fn from(entry: &GlossaryEntry) -> Self {
        Self {
            token_src: entry.token_src.clone(),
            category: entry.category,
            token_tgt: entry.token_tgt.clone(),
            status: entry.status,
        }
    }
}

/// Result of importing `token=translation` lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Entries created or overwritten
    pub imported: usize,
    /// Non-blank lines that could not be parsed
    pub skipped: usize,
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Glossary imported: {} entries ({} lines skipped).", self.imported, self.skipped)
    }
}

/// Parse a `token=translation` line.
///
/// Splits on the first `=` and trims both sides. Returns `None` when there is
/// no `=` or either side is empty.
pub fn parse_assignment(line: &str) -> Option<(&str, &str)> {
    let (token, translation) = line.split_once('=')?;
    let token = token.trim();
    let translation = translation.trim();
    if token.is_empty() || translation.is_empty() {
        return None;
    }
    Some((token, translation))
}

/// Insertion-ordered map from source token to [`GlossaryEntry`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Glossary {
    entries: Vec<GlossaryEntry>,
    index: HashMap<String, usize>,
}

impl Glossary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.index.contains_key(token)
    }

    pub fn get(&self, token: &str) -> Option<&GlossaryEntry> {
        self.index.get(token).map(|&i| &self.entries[i])
    }

    fn get_mut(&mut self, token: &str) -> Option<&mut GlossaryEntry> {
        match self.index.get(token) {
            Some(&i) => Some(&mut self.entries[i]),
            None => None,
        }
    }

    /// Entries in first-registration order.
    pub fn iter(&self) -> impl Iterator<Item = &GlossaryEntry> {
        self.entries.iter()
    }

    /// Record one occurrence of `token` at `position`.
    ///
    /// Creates a pending entry classified with `core_min_len` when the token is
    /// new and returns `true`. For a known token only the occurrence is
    /// appended; category and translation are left alone.
    pub fn record_occurrence(&mut self, token: &str, position: usize, core_min_len: usize) -> bool {
        if let Some(entry) = self.get_mut(token) {
            entry.occurrences.push(position);
            return false;
        }

        let category = Category::classify(token, core_min_len);
        self.insert(GlossaryEntry::pending(token, category, position));
        true
    }

    /// Create or replace an entry.
    pub fn insert(&mut self, entry: GlossaryEntry) {
        match self.index.get(&entry.token_src) {
            Some(&i) => self.entries[i] = entry,
            None => {
                self.index.insert(entry.token_src.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    /// Remove an entry, keeping the order of the others.
    pub fn remove(&mut self, token: &str) -> Option<GlossaryEntry> {
        let position = self.index.remove(token)?;
        let removed = self.entries.remove(position);
        for slot in self.index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    /// Set the translation of an existing entry on behalf of a person.
    ///
    /// A non-empty translation marks the entry `ASSIGNED`. Clearing the
    /// translation leaves the status as it was. Returns `false` for unknown
    /// tokens.
    pub fn assign(&mut self, token: &str, translation: &str) -> bool {
        match self.get_mut(token) {
            Some(entry) => {
                entry.token_tgt = translation.to_string();
                if !translation.is_empty() {
                    entry.status = EntryStatus::Assigned;
                }
                true
            }
            None => false,
        }
    }

    /// Explicitly reclassify an entry. Returns `false` for unknown tokens.
    pub fn set_category(&mut self, token: &str, category: Category) -> bool {
        match self.get_mut(token) {
            Some(entry) => {
                entry.category = category;
                true
            }
            None => false,
        }
    }

    /// The editing table, in first-registration order.
    pub fn rows(&self) -> Vec<GlossaryRow> {
        self.entries.iter().map(GlossaryRow::from).collect()
    }

    /// Write back one edited row (category and translation).
    ///
    /// Every row is written, changed or not: a saved row with a translation
    /// becomes `ASSIGNED`, which is how AI suggestions get accepted.
    pub fn apply_edit(&mut self, row: &GlossaryRow) -> bool {
        self.set_category(&row.token_src, row.category) && self.assign(&row.token_src, &row.token_tgt)
    }

    /// Create or overwrite an entry as a confirmed core binding.
    pub fn upsert_assigned(&mut self, token: &str, translation: &str) {
        self.insert(GlossaryEntry::assigned(token, translation));
    }

    /// Bulk import of `token=translation` lines. Blank lines are ignored.
    pub fn import_lines(&mut self, text: &str) -> ImportSummary {
        let mut summary = ImportSummary::default();
        for (line_no, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match parse_assignment(line) {
                Some((token, translation)) => {
                    self.upsert_assigned(token, translation);
                    summary.imported += 1;
                }
                None => {
                    match line.split_once('=') {
                        Some((token, _)) if !token.trim().is_empty() => warn!(
                            "Skipping glossary line {}: empty translation for {:?}",
                            line_no + 1,
                            token.trim()
                        ),
                        Some(_) => warn!("Skipping glossary line {}: empty token in {:?}", line_no + 1, line),
                        None => warn!("Skipping glossary line {}: no '=' in {:?}", line_no + 1, line),
                    }
                    summary.skipped += 1;
                }
            }
        }
        debug!("Imported {} glossary entries", summary.imported);
        summary
    }

    /// Fill an entry with a machine suggestion.
    ///
    /// Only applies to entries that exist and are still empty at merge time.
    pub fn merge_suggestion(&mut self, token: &str, translation: &str) -> bool {
        if translation.is_empty() {
            return false;
        }
        match self.get_mut(token) {
            Some(entry) if entry.token_tgt.is_empty() => {
                entry.token_tgt = translation.to_string();
                entry.status = EntryStatus::AiSuggested;
                true
            }
            _ => false,
        }
    }

    /// Tokens with an empty translation, core and particle alike.
    pub fn unresolved_tokens(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| !e.is_resolved())
            .map(|e| e.token_src.clone())
            .collect()
    }

    /// Core tokens with an empty translation.
    pub fn missing_core_tokens(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| e.is_blocking())
            .map(|e| e.token_src.clone())
            .collect()
    }
}
