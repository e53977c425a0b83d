#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use isotrans::app_config::{self, AssistantProvider, Config};
use isotrans::app_controller::{format_glossary_table, format_integrity, Controller, RunRequest};
use isotrans::file_utils::FileManager;

/// CLI Wrapper for AssistantProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliAssistantProvider {
    Ollama,
    Anthropic,
    Gemini,
}

impl From<CliAssistantProvider> for AssistantProvider {
    fn from(cli_provider: CliAssistantProvider) -> Self {
        match cli_provider {
            CliAssistantProvider::Ollama => AssistantProvider::Ollama,
            CliAssistantProvider::Anthropic => AssistantProvider::Anthropic,
            CliAssistantProvider::Gemini => AssistantProvider::Gemini,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a text file token by token
    Translate(TranslateArgs),

    /// Show the glossary and the integrity report without translating
    Check(DocumentArgs),

    /// Generate shell completions for isotrans
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct DocumentArgs {
    /// Source text file
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Glossary file with `token=translation` lines (repeatable)
    #[arg(short, long = "glossary", value_name = "GLOSSARY")]
    glossaries: Vec<PathBuf>,

    /// Command such as "[ADD lupus=lobo]" or "[RESET]" (repeatable)
    #[arg(short = 'e', long = "exec", value_name = "COMMAND")]
    commands: Vec<String>,
}

#[derive(Args, Debug)]
struct TranslateArgs {
    #[command(flatten)]
    document: DocumentArgs,

    /// Ask the AI assistant to fill empty entries before translating
    #[arg(short, long)]
    assist: bool,

    /// Output file (default: INPUT.<target>.<ext> next to the input)
    #[arg(short, long, value_name = "OUTPUT_PATH", conflicts_with = "stdout")]
    output: Option<PathBuf>,

    /// Print the translation instead of writing a file
    #[arg(long)]
    stdout: bool,
}

/// isotrans - isomorphic glossary-driven translation
///
/// Translates a text token by token through a glossary you curate. Every
/// source word becomes exactly one output word, in the same position.
#[derive(Parser, Debug)]
#[command(name = "isotrans")]
#[command(version)]
#[command(about = "Isomorphic glossary-driven translation tool")]
#[command(long_about = "isotrans translates a text word for word through a user-curated glossary.

EXAMPLES:
    isotrans translate text.txt -g glossary.txt            # Translate with a glossary file
    isotrans translate text.txt -e \"[ADD lupus=lobo]\"      # Add an entry from the command line
    isotrans translate text.txt --assist -p gemini         # Let the AI fill empty entries first
    isotrans check text.txt -g glossary.txt                # Show glossary and missing core tokens
    isotrans completions bash > isotrans.bash              # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.

SUPPORTED PROVIDERS:
    ollama    - Local Ollama server (default: llama3.2:3b)
    anthropic - Anthropic Claude API (requires API key)
    gemini    - Google Gemini API (requires API key)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long = "config", default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,

    /// Source language code (e.g., 'la', 'en', 'fr')
    #[arg(short, long, global = true)]
    source_language: Option<String>,

    /// Target language code (e.g., 'es', 'en', 'fr')
    #[arg(short, long, global = true)]
    target_language: Option<String>,

    /// AI assistant provider to use
    #[arg(short, long, value_enum, global = true)]
    provider: Option<CliAssistantProvider>,

    /// Model name to use for suggestions
    #[arg(short, long, global = true)]
    model: Option<String>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and tag for level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, tag) = Self::style_for_level(record.level());
            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The logger accepts everything; verbosity is controlled through the max level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Some(level) = &cli.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level((&level).into());
    }

    match &cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(*shell, &mut cmd, "isotrans", &mut std::io::stdout());
            Ok(())
        }
        Commands::Translate(args) => {
            let controller = build_controller(&cli)?;
            run_translate(&controller, args).await
        }
        Commands::Check(args) => {
            let controller = build_controller(&cli)?;
            run_check(&controller, args)
        }
    }
}

/// Load the config, apply CLI overrides and create the controller
fn build_controller(cli: &CommandLineOptions) -> Result<Controller> {
    let mut config = Config::load_or_create(&cli.config_path)?;

    if let Some(provider) = &cli.provider {
        config.assistant.provider = provider.clone().into();
    }

    if let Some(model) = &cli.model {
        config.assistant.active_provider_config_mut().model = model.clone();
    }

    if let Some(source_lang) = &cli.source_language {
        config.source_language = source_lang.clone();
    }

    if let Some(target_lang) = &cli.target_language {
        config.target_language = target_lang.clone();
    }

    match &cli.log_level {
        Some(log_level) => config.log_level = log_level.clone().into(),
        None => log::set_max_level((&config.log_level).into()),
    }

    Controller::with_config(config)
}

fn request_for(document: &DocumentArgs) -> RunRequest {
    RunRequest {
        input: document.input_path.clone(),
        glossaries: document.glossaries.clone(),
        commands: document.commands.clone(),
        ..RunRequest::default()
    }
}

async fn run_translate(controller: &Controller, args: &TranslateArgs) -> Result<()> {
    if !FileManager::file_exists(&args.document.input_path) {
        return Err(anyhow!("Input path does not exist: {:?}", args.document.input_path));
    }

    let mut request = request_for(&args.document);
    request.assist = args.assist;
    if !args.stdout {
        request.output = Some(
            args.output
                .clone()
                .unwrap_or_else(|| controller.default_output_path(&args.document.input_path)),
        );
    }

    let report = controller
        .run(&request)
        .await
        .with_context(|| format!("Failed to translate {:?}", args.document.input_path))?;

    if let Some(outcome) = &report.assist {
        info!("{}", outcome);
    }
    if args.stdout {
        println!("{}", report.rendered);
    }
    Ok(())
}

fn run_check(controller: &Controller, args: &DocumentArgs) -> Result<()> {
    if !FileManager::file_exists(&args.input_path) {
        return Err(anyhow!("Input path does not exist: {:?}", args.input_path));
    }

    let session = controller.prepare(&request_for(args))?;
    let report = session.check_integrity();

    println!("{}", format_glossary_table(session.glossary()));
    println!();
    println!("{}", format_integrity(&report));

    report.ensure_complete(controller.config().rules.missing_preview_limit)?;
    Ok(())
}
