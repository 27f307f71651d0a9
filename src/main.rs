// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error, info};
use std::io::Write;
use std::path::PathBuf;

use bidocx::app_config::{Config, LogLevel, TranslationProvider};
use bidocx::app_controller::Controller;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Google,
    Ollama,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Google => TranslationProvider::Google,
            CliTranslationProvider::Ollama => TranslationProvider::Ollama,
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

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a bilingual document (default command)
    Translate(TranslateArgs),

    /// Generate shell completions for bidocx
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Input .docx file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Output file (single document only)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force overwrite of existing outputs in folder mode
    #[arg(short, long)]
    force_overwrite: bool,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Model name to use for translation (Ollama)
    #[arg(short, long)]
    model: Option<String>,

    /// Source language code (e.g., 'en', 'es', 'fr')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'hi', 'de', 'ja')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Check the translation backend before converting
    #[arg(long)]
    check: bool,
}

/// bidocx - bilingual Word documents
///
/// Translates every paragraph and table cell of a .docx file and writes a new
/// document where each translation is followed by its original.
#[derive(Parser, Debug)]
#[command(name = "bidocx")]
#[command(version)]
#[command(about = "Turns a monolingual Word document into a bilingual one")]
#[command(long_about = "bidocx translates the paragraphs and table cells of a .docx file and writes a bilingual copy.

EXAMPLES:
    bidocx report.docx                          # Translate using default config (en -> hi)
    bidocx -t de -o report_de.docx report.docx  # Translate to German into a chosen file
    bidocx -p ollama -m llama3.2:3b report.docx # Use a local Ollama model
    bidocx -f /reports/                         # Convert a whole folder, overwriting outputs
    bidocx completions bash > bidocx.bash       # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.

SUPPORTED PROVIDERS:
    google - Google web translate (default, no key required)
    ollama - Local Ollama server (default: llama3.2:3b)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input .docx file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Output file (single document only)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Force overwrite of existing outputs in folder mode
    #[arg(short, long)]
    force_overwrite: bool,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Model name to use for translation (Ollama)
    #[arg(short, long)]
    model: Option<String>,

    /// Source language code (e.g., 'en', 'es', 'fr')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'hi', 'de', 'ja')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Check the translation backend before converting
    #[arg(long)]
    check: bool,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour and label for a level
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
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (colour, label) = Self::style_for_level(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "{}{} {} {}\x1B[0m",
                colour,
                now,
                label,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = CustomLogger::init(LevelFilter::Info) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let cli = CommandLineOptions::parse();

    let result = match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "bidocx", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => match cli.input_path {
            Some(input_path) => {
                run_translate(TranslateArgs {
                    input_path,
                    output: cli.output,
                    force_overwrite: cli.force_overwrite,
                    provider: cli.provider,
                    model: cli.model,
                    source_language: cli.source_language,
                    target_language: cli.target_language,
                    config_path: cli.config_path,
                    log_level: cli.log_level,
                    check: cli.check,
                })
                .await
            }
            None => Err(anyhow!("INPUT_PATH is required when no subcommand is specified")),
        },
    };

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

/// Load the configuration and apply command line overrides.
fn load_config(options: &TranslateArgs) -> Result<Config> {
    let mut config = Config::load_or_create(&options.config_path)?;

    if let Some(provider) = &options.provider {
        config.translation.provider = provider.clone().into();
    }

    if let Some(model) = &options.model {
        let provider = config.translation.provider;
        config.translation.provider_config_mut(provider).model = model.clone();
    }

    if let Some(source_lang) = &options.source_language {
        config.source_language = source_lang.clone();
    }

    if let Some(target_lang) = &options.target_language {
        config.target_language = target_lang.clone();
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;
    Ok(config)
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    // Apply a command line level right away so config loading is logged at that level
    if let Some(cmd_log_level) = &options.log_level {
        let level: LogLevel = cmd_log_level.clone().into();
        log::set_max_level((&level).into());
    }

    let config = load_config(&options)?;
    log::set_max_level((&config.log_level).into());

    info!(
        "Using {} ({})",
        config.translation.provider,
        config.language_pair()
    );

    let controller = Controller::with_config(config)?;

    if options.check {
        controller.test_connection().await?;
    }

    if options.input_path.is_file() {
        match &options.output {
            Some(output) => controller.translate_word_file_to(&options.input_path, output).await?,
            None => controller.translate_word_file(&options.input_path).await?,
        };
    } else if options.input_path.is_dir() {
        if options.output.is_some() {
            return Err(anyhow!("--output cannot be used with a directory input"));
        }
        let summary = controller
            .run_folder(&options.input_path, options.force_overwrite)
            .await?;
        if summary.failed > 0 {
            return Err(anyhow!("{} document(s) failed", summary.failed));
        }
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", options.input_path));
    }

    Ok(())
}
