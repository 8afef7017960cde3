// crates/ontology-rules-cli/src/main.rs
// ============================================================================
// Module: Ontology Rules CLI Entry Point
// Description: Command dispatcher for condition, mapping, and config checks.
// Purpose: Validate rule payloads offline against the configured limits.
// Dependencies: clap, ontology-rules-config, ontology-rules-core, serde_json,
//              thiserror, tracing, tracing-subscriber
// ============================================================================

//! ## Overview
//! The `ontology-rules` CLI runs the condition decoder and the mapping rule
//! validator over JSON files, printing the normalized result on success and
//! the first violation on failure. Limits come from `ontology-rules.toml`
//! when present. Security posture: inputs are untrusted and read with a hard
//! size limit.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use ontology_rules_config::CONFIG_ENV_VAR;
use ontology_rules_config::DEFAULT_CONFIG_NAME;
use ontology_rules_config::RulesConfig;
use ontology_rules_core::ConditionDecoder;
use ontology_rules_core::MappingRuleValidator;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use tracing::info;
use tracing_subscriber::EnvFilter;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum bytes read from a condition or mapping input file.
const MAX_INPUT_BYTES: usize = 4 * 1024 * 1024;
/// Environment variable holding the log filter directive.
const LOG_ENV: &str = "ONTOLOGY_RULES_LOG";
/// Log filter applied when `ONTOLOGY_RULES_LOG` is unset or invalid.
const DEFAULT_LOG_FILTER: &str = "warn";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "ontology-rules", version, disable_help_subcommand = true)]
struct Cli {
    /// Config file with validation limits (overrides `ONTOLOGY_RULES_CONFIG`).
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Search condition utilities.
    Condition {
        /// Selected condition subcommand.
        #[command(subcommand)]
        command: ConditionCommand,
    },
    /// Relation mapping rule utilities.
    Mapping {
        /// Selected mapping subcommand.
        #[command(subcommand)]
        command: MappingCommand,
    },
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Condition subcommands.
#[derive(Subcommand, Debug)]
enum ConditionCommand {
    /// Decode and validate a condition payload.
    Validate(ConditionValidateCommand),
}

/// Arguments for `condition validate`.
#[derive(Args, Debug)]
struct ConditionValidateCommand {
    /// JSON file holding the condition payload.
    #[arg(long, value_name = "FILE")]
    input: PathBuf,
}

/// Mapping subcommands.
#[derive(Subcommand, Debug)]
enum MappingCommand {
    /// Validate relation mapping rules.
    Validate(MappingValidateCommand),
}

/// Arguments for `mapping validate`.
#[derive(Args, Debug)]
struct MappingValidateCommand {
    /// Relation kind: `direct` or `data_view`.
    #[arg(long, value_name = "KIND")]
    kind: String,
    /// JSON file holding the mapping rules payload.
    #[arg(long, value_name = "FILE")]
    input: PathBuf,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Load and validate a config file.
    Validate,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for user-facing messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

/// Bounded read failures.
#[derive(Debug)]
enum ReadLimitError {
    /// File I/O failure.
    Io(std::io::Error),
    /// File size exceeds the configured limit.
    TooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Allowed limit in bytes.
        limit: usize,
    },
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    init_tracing()?;

    match cli.command {
        Commands::Condition {
            command,
        } => match command {
            ConditionCommand::Validate(command) => {
                command_condition_validate(&command, cli.config.as_deref())
            }
        },
        Commands::Mapping {
            command,
        } => match command {
            MappingCommand::Validate(command) => {
                command_mapping_validate(&command, cli.config.as_deref())
            }
        },
        Commands::Config {
            command,
        } => match command {
            ConfigCommand::Validate => command_config_validate(cli.config.as_deref()),
        },
    }
}

/// Installs the stderr log subscriber.
fn init_tracing() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(env::var(LOG_ENV).ok().as_deref()))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| CliError::new(format!("failed to initialize logging: {err}")))
}

/// Builds the log filter from a directive, falling back to the default level.
fn log_filter(directive: Option<&str>) -> EnvFilter {
    directive
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

// ============================================================================
// SECTION: Condition Commands
// ============================================================================

/// Executes `condition validate`.
fn command_condition_validate(
    command: &ConditionValidateCommand,
    config: Option<&Path>,
) -> CliResult<ExitCode> {
    let config = load_limits(config)?;
    let bytes = read_input(&command.input)?;
    let output = render_condition(&bytes, &config)?;
    info!(input = %command.input.display(), "condition is valid");
    write_stdout_line(&output).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Decodes a condition payload and renders the normalized tree.
fn render_condition(bytes: &[u8], config: &RulesConfig) -> CliResult<String> {
    let text = input_text(bytes)?;
    let decoder = ConditionDecoder::new(config.condition_limits());
    let tree = decoder
        .decode_str(text)
        .map_err(|err| CliError::new(format!("invalid condition: {err}")))?;
    render_json(&tree)
}

// ============================================================================
// SECTION: Mapping Commands
// ============================================================================

/// Executes `mapping validate`.
fn command_mapping_validate(
    command: &MappingValidateCommand,
    config: Option<&Path>,
) -> CliResult<ExitCode> {
    let config = load_limits(config)?;
    let bytes = read_input(&command.input)?;
    let output = render_mapping(&command.kind, &bytes, &config)?;
    info!(kind = %command.kind, input = %command.input.display(), "mapping rules are valid");
    write_stdout_line(&output).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Validates mapping rules for `kind` and renders the typed result.
fn render_mapping(kind: &str, bytes: &[u8], config: &RulesConfig) -> CliResult<String> {
    let text = input_text(bytes)?;
    let payload: serde_json::Value = serde_json::from_str(text)
        .map_err(|err| CliError::new(format!("input must be json: {err}")))?;
    let validator = MappingRuleValidator::new(config.mapping_limits());
    let rules = validator
        .validate(kind, Some(&payload))
        .map_err(|err| CliError::new(format!("invalid mapping rules: {err}")))?;
    render_json(&rules)
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Executes `config validate`.
fn command_config_validate(config: Option<&Path>) -> CliResult<ExitCode> {
    let config = RulesConfig::load(config)
        .map_err(|err| CliError::new(format!("failed to load config: {err}")))?;
    write_stdout_line(&render_json(&config)?)
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Loads limits, using defaults when no config file is named or present.
fn load_limits(path: Option<&Path>) -> CliResult<RulesConfig> {
    let implicit = path.is_none() && env::var_os(CONFIG_ENV_VAR).is_none();
    if implicit && !Path::new(DEFAULT_CONFIG_NAME).exists() {
        debug!("no config file found, using default limits");
        return Ok(RulesConfig::default());
    }
    RulesConfig::load(path).map_err(|err| CliError::new(format!("failed to load config: {err}")))
}

// ============================================================================
// SECTION: Input Helpers
// ============================================================================

/// Reads an input file with the CLI size limit.
fn read_input(path: &Path) -> CliResult<Vec<u8>> {
    read_bytes_with_limit(path, MAX_INPUT_BYTES).map_err(|err| match err {
        ReadLimitError::Io(err) => {
            CliError::new(format!("failed to read {}: {err}", path.display()))
        }
        ReadLimitError::TooLarge {
            size,
            limit,
        } => CliError::new(format!(
            "{} exceeds size limit ({size} > {limit} bytes)",
            path.display()
        )),
    })
}

/// Reads a file, failing closed when it exceeds `max_bytes`.
fn read_bytes_with_limit(path: &Path, max_bytes: usize) -> Result<Vec<u8>, ReadLimitError> {
    let file = File::open(path).map_err(ReadLimitError::Io)?;
    let size = file.metadata().map_err(ReadLimitError::Io)?.len();
    let limit = u64::try_from(max_bytes).map_err(|_| ReadLimitError::TooLarge {
        size,
        limit: max_bytes,
    })?;
    if size > limit {
        return Err(ReadLimitError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let mut limited = file.take(limit.saturating_add(1));
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes).map_err(ReadLimitError::Io)?;
    if bytes.len() > max_bytes {
        let actual = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
        return Err(ReadLimitError::TooLarge {
            size: actual,
            limit: max_bytes,
        });
    }
    Ok(bytes)
}

/// Interprets input bytes as UTF-8 text.
fn input_text(bytes: &[u8]) -> CliResult<&str> {
    std::str::from_utf8(bytes).map_err(|_| CliError::new("input must be utf-8".to_string()))
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Renders a value as pretty-printed JSON.
fn render_json<T: Serialize>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|err| CliError::new(format!("failed to render json: {err}")))
}

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output stream write failure.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write to {stream}: {error}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
