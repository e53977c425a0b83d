use anyhow::Context;
use log::{info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::assistant::{autocomplete, AutocompleteOutcome, SuggestionPrompt};
use crate::errors::{AppError, ImportError};
use crate::file_utils::FileManager;
use crate::lexicon::{Command, Glossary, ImportSummary, IntegrityReport, RegistrationOutcome, Session};
use crate::providers::{self, Provider};

// @module: Application controller for document translation

/// What to run for one document
#[derive(Debug, Clone, Default)]
pub struct RunRequest {
    /// Source text file
    pub input: PathBuf,
    /// Glossary files with `token=translation` lines, imported in order
    pub glossaries: Vec<PathBuf>,
    /// Terminal commands applied after the imports
    pub commands: Vec<String>,
    /// Ask the AI assistant for unresolved tokens before translating
    pub assist: bool,
    /// Where to write the rendering; `None` leaves it to the caller
    pub output: Option<PathBuf>,
}

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Rendered translation
    pub rendered: String,
    /// Number of rendered tokens
    pub tokens: usize,
    /// File the rendering was written to
    pub output_path: Option<PathBuf>,
    /// Assistant outcome, when the assistant ran
    pub assist: Option<AutocompleteOutcome>,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> anyhow::Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fresh session using the configured rules
    pub fn new_session(&self) -> Session {
        Session::new(self.config.rules.clone())
    }

    /// Read, normalize and register a source file
    pub fn load_source(&self, session: &mut Session, path: &Path) -> Result<RegistrationOutcome, AppError> {
        let raw_text =
            FileManager::read_to_string(path).map_err(|e| AppError::File(format!("{:#}", e)))?;
        session.normalize(&raw_text);
        let outcome = session.register_lexicon();
        info!("{}: {}", path.display(), outcome);
        Ok(outcome)
    }

    /// Bulk-import a glossary file
    pub fn import_glossary_file(&self, session: &mut Session, path: &Path) -> Result<ImportSummary, ImportError> {
        let text = std::fs::read_to_string(path).map_err(|source| ImportError::Unreadable {
            path: path.display().to_string(),
            source,
        })?;
        let summary = session.import_glossary(&text);
        if summary.skipped > 0 {
            warn!("{}: {} malformed lines skipped", path.display(), summary.skipped);
        }
        info!("{}: {}", path.display(), summary);
        Ok(summary)
    }

    /// Parse and apply terminal commands, returning their messages
    pub fn apply_commands(&self, session: &mut Session, commands: &[String]) -> Result<Vec<String>, AppError> {
        let mut messages = Vec::with_capacity(commands.len());
        for raw in commands {
            let command: Command = raw.parse()?;
            let message = session.execute(&command);
            info!("{}", message);
            messages.push(message);
        }
        Ok(messages)
    }

    /// Run the assistant with the configured provider
    pub async fn assist(&self, session: &mut Session) -> Result<AutocompleteOutcome, AppError> {
        self.config.validate_assistant()?;
        let provider = providers::from_config(&self.config.assistant)?;
        self.assist_with(session, provider.as_ref()).await
    }

    /// Run the assistant with an explicit provider
    pub async fn assist_with(
        &self,
        session: &mut Session,
        provider: &dyn Provider,
    ) -> Result<AutocompleteOutcome, AppError> {
        let prompt = SuggestionPrompt::from_config(&self.config)?;
        let outcome = autocomplete(session, provider, &prompt).await;
        match &outcome {
            AutocompleteOutcome::Failed(_) => warn!("{}", outcome),
            _ => info!("{}", outcome),
        }
        Ok(outcome)
    }

    /// Load the source and glossaries and apply commands
    pub fn prepare(&self, request: &RunRequest) -> Result<Session, AppError> {
        let mut session = self.new_session();
        self.load_source(&mut session, &request.input)?;
        for glossary in &request.glossaries {
            self.import_glossary_file(&mut session, glossary)?;
        }
        self.apply_commands(&mut session, &request.commands)?;
        Ok(session)
    }

    /// Run the whole pipeline for one document
    pub async fn run(&self, request: &RunRequest) -> Result<RunReport, AppError> {
        let mut session = self.prepare(request)?;

        let assist = if request.assist {
            Some(self.assist(&mut session).await?)
        } else {
            None
        };

        self.finish(session, request, assist)
    }

    /// Run the pipeline with an explicit suggestion provider
    pub async fn run_with_provider(
        &self,
        request: &RunRequest,
        provider: &dyn Provider,
    ) -> Result<RunReport, AppError> {
        let mut session = self.prepare(request)?;
        let assist = Some(self.assist_with(&mut session, provider).await?);
        self.finish(session, request, assist)
    }

    fn finish(
        &self,
        mut session: Session,
        request: &RunRequest,
        assist: Option<AutocompleteOutcome>,
    ) -> Result<RunReport, AppError> {
        let summary = session.translate()?;
        let rendered = session.render();

        if let Some(output) = &request.output {
            FileManager::write_to_file(output, &rendered)
                .map_err(|e| AppError::File(format!("{:#}", e)))?;
            info!("Success: {:?}", output);
        }

        Ok(RunReport {
            rendered,
            tokens: summary.tokens,
            output_path: request.output.clone(),
            assist,
        })
    }

    /// Default output location next to the input
    pub fn default_output_path(&self, input: &Path) -> PathBuf {
        let dir = input.parent().unwrap_or_else(|| Path::new("."));
        FileManager::generate_output_path(input, dir, &self.config.target_language)
    }
}

/// Render the glossary as an aligned text table
pub fn format_glossary_table(glossary: &Glossary) -> String {
    let headers = ["token_src", "category", "token_tgt", "status"];
    let rows: Vec<[String; 4]> = glossary
        .rows()
        .into_iter()
        .map(|row| {
            [
                row.token_src,
                row.category.to_string(),
                row.token_tgt,
                row.status.to_string(),
            ]
        })
        .collect();

    let mut widths = headers.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_line = |cells: [&str; 4]| {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![format_line(headers)];
    for row in &rows {
        lines.push(format_line([&row[0], &row[1], &row[2], &row[3]]));
    }
    lines.join("\n")
}

/// Human-readable integrity summary
pub fn format_integrity(report: &IntegrityReport) -> String {
    if report.is_ok() {
        "Integrity OK: every core token has a translation.".to_string()
    } else {
        format!(
            "Integrity FAILED: {} core token(s) missing: {}",
            report.missing.len(),
            report.missing.join(", ")
        )
    }
}
