// crates/event-contracts-cli/src/main.rs
// ============================================================================
// Module: Event Contracts CLI Entry Point
// Description: Command dispatcher for contract checks and manifest publication.
// Purpose: Provide a safe CLI for deployment-time contract workflows.
// Dependencies: clap, event-contracts-core, event-contracts-publish, serde, thiserror.
// ============================================================================

//! ## Overview
//! The Event Contracts CLI loads contract declarations, checks them, renders
//! the canonical contracts manifest, and publishes it to object storage as
//! part of a deployment. Inputs are untrusted: declaration and config files
//! are size-limited and validated before anything is uploaded.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use event_contracts_config::EventContractsConfig;
use event_contracts_core::ContractId;
use event_contracts_core::ContractRegistry;
use event_contracts_core::PayloadValidator;
use event_contracts_core::PutEventsEntry;
use event_contracts_core::compile_registry;
use event_contracts_core::load_declarations;
use event_contracts_publish::DIGEST_METADATA_KEY;
use event_contracts_publish::ManifestPublisher;
use event_contracts_publish::RevisionSource;
use event_contracts_publish::StaticRevisionSource;
use event_contracts_publish::prepare_manifest;
use event_contracts_publish::source_from_config;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum payload file size accepted by `contracts emit`.
const MAX_PAYLOAD_BYTES: u64 = 256 * 1024;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "event-contracts", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Contract declaration utilities.
    Contracts {
        /// Selected contracts subcommand.
        #[command(subcommand)]
        command: ContractsCommand,
    },
    /// Manifest rendering utilities.
    Manifest {
        /// Selected manifest subcommand.
        #[command(subcommand)]
        command: ManifestCommand,
    },
    /// Publish the contracts manifest to object storage.
    Publish(PublishCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Contracts subcommands.
#[derive(Subcommand, Debug)]
enum ContractsCommand {
    /// Load declarations, compile payload schemas, and print descriptors.
    Check(ContractsCheckCommand),
    /// Validate a payload and print the put-events entry for it.
    Emit(ContractsEmitCommand),
}

/// Manifest subcommands.
#[derive(Subcommand, Debug)]
enum ManifestCommand {
    /// Print the canonical manifest and its digest without uploading.
    Render(ManifestRenderCommand),
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate an Event Contracts configuration file.
    Validate(ConfigValidateCommand),
}

/// Arguments for `contracts check`.
#[derive(Args, Debug)]
struct ContractsCheckCommand {
    /// Declarations file (JSON or RON).
    #[arg(long, value_name = "FILE")]
    input: PathBuf,
}

/// Arguments for `contracts emit`.
#[derive(Args, Debug)]
struct ContractsEmitCommand {
    /// Declarations file (JSON or RON).
    #[arg(long, value_name = "FILE")]
    input: PathBuf,
    /// Contract identifier.
    #[arg(long, value_name = "ID")]
    contract: String,
    /// Emitting source; must be declared by the contract.
    #[arg(long, value_name = "SOURCE")]
    source: String,
    /// JSON payload file.
    #[arg(long, value_name = "FILE")]
    payload: PathBuf,
    /// Target event bus (defaults to the account default bus).
    #[arg(long, value_name = "NAME")]
    event_bus: Option<String>,
}

/// Arguments for `manifest render`.
#[derive(Args, Debug)]
struct ManifestRenderCommand {
    /// Optional config file path (defaults to event-contracts.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Revision to stamp instead of querying the configured source.
    #[arg(long, value_name = "REV")]
    revision: Option<String>,
}

/// Arguments for `publish`.
#[derive(Args, Debug)]
struct PublishCommand {
    /// Optional config file path (defaults to event-contracts.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Deployment bucket (overrides `publish.bucket`).
    #[arg(long, value_name = "BUCKET")]
    bucket: Option<String>,
    /// Deployment artifact directory (overrides `publish.artifact_directory_name`).
    #[arg(long, value_name = "DIR")]
    artifact_directory: Option<String>,
}

/// Arguments for config validation.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to event-contracts.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for user-facing error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

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

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&format!("event-contracts {version}"))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Contracts {
            command,
        } => command_contracts(command),
        Commands::Manifest {
            command,
        } => command_manifest(command),
        Commands::Publish(command) => command_publish(&command),
        Commands::Config {
            command,
        } => command_config(command),
    }
}

/// Emits the top-level help message for the CLI.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Contracts Commands
// ============================================================================

/// Dispatches contracts subcommands.
fn command_contracts(command: ContractsCommand) -> CliResult<ExitCode> {
    match command {
        ContractsCommand::Check(command) => command_contracts_check(&command),
        ContractsCommand::Emit(command) => command_contracts_emit(&command),
    }
}

/// Executes `contracts check`.
fn command_contracts_check(command: &ContractsCheckCommand) -> CliResult<ExitCode> {
    let registry = load_checked_registry(&command.input)?;
    warn_unmatchable(&registry)?;
    write_json_pretty(&registry.snapshot())?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `contracts emit`.
fn command_contracts_emit(command: &ContractsEmitCommand) -> CliResult<ExitCode> {
    let registry = load_declarations(&command.input)
        .map_err(|err| CliError::new(format!("failed to load declarations: {err}")))?;
    let contract_id = ContractId::new(command.contract.as_str());
    let descriptor = registry
        .get(&contract_id)
        .ok_or_else(|| CliError::new(format!("unknown contract: {contract_id}")))?;
    let payload = read_payload(&command.payload)?;
    PayloadValidator::compile(descriptor)
        .and_then(|validator| validator.validate(&payload))
        .map_err(|err| CliError::new(err.to_string()))?;
    let mut entry = PutEventsEntry::for_contract(descriptor, &command.source, &payload)
        .map_err(|err| CliError::new(err.to_string()))?;
    if let Some(event_bus) = &command.event_bus {
        entry = entry.with_event_bus(event_bus.as_str());
    }
    write_json_pretty(&entry)?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Manifest Commands
// ============================================================================

/// Dispatches manifest subcommands.
fn command_manifest(command: ManifestCommand) -> CliResult<ExitCode> {
    match command {
        ManifestCommand::Render(command) => command_manifest_render(&command),
    }
}

/// Executes `manifest render`.
fn command_manifest_render(command: &ManifestRenderCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    let registry = load_checked_registry(&config.declarations_path())?;
    warn_unmatchable(&registry)?;
    let revision: Arc<dyn RevisionSource> = match &command.revision {
        Some(value) => Arc::new(StaticRevisionSource::new(value.as_str())),
        None => source_from_config(&config.revision, config.config_dir.as_deref()),
    };
    let prepared = prepare_manifest(revision.as_ref(), &registry)
        .map_err(|err| CliError::new(format!("manifest render failed: {err}")))?;
    write_stdout_bytes_with_newline(&prepared.rendered.bytes)?;
    write_stderr_line(&format!("{DIGEST_METADATA_KEY}: {}", prepared.rendered.digest.value))
        .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Publish Command
// ============================================================================

/// Executes `publish`.
fn command_publish(command: &PublishCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    let target = config
        .publish
        .resolve_target(command.bucket.as_deref(), command.artifact_directory.as_deref())
        .map_err(|err| CliError::new(format!("publish target unresolved: {err}")))?;
    let registry = load_checked_registry(&config.declarations_path())?;
    warn_unmatchable(&registry)?;
    let publisher = ManifestPublisher::from_config(&config)
        .map_err(|err| CliError::new(format!("publisher init failed: {err}")))?;
    let receipt = publisher
        .publish(&registry, &target)
        .map_err(|err| CliError::new(format!("publish failed: {err}")))?;
    write_json_pretty(&receipt)?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(&command),
    }
}

/// Executes the config validation command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let _config = load_config(command.config.as_deref())?;
    write_stdout_line("config ok").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Loading Helpers
// ============================================================================

/// Loads and validates configuration.
fn load_config(path: Option<&Path>) -> CliResult<EventContractsConfig> {
    EventContractsConfig::load(path)
        .map_err(|err| CliError::new(format!("failed to load config: {err}")))
}

/// Loads declarations and compiles every present payload schema.
fn load_checked_registry(path: &Path) -> CliResult<ContractRegistry> {
    let registry = load_declarations(path)
        .map_err(|err| CliError::new(format!("failed to load declarations: {err}")))?;
    compile_registry(&registry).map_err(|err| CliError::new(err.to_string()))?;
    Ok(registry)
}

/// Reads a JSON payload file with a size limit.
fn read_payload(path: &Path) -> CliResult<Value> {
    let metadata = std::fs::metadata(path)
        .map_err(|err| CliError::new(format!("failed to read {}: {err}", path.display())))?;
    if metadata.len() > MAX_PAYLOAD_BYTES {
        return Err(CliError::new(format!(
            "payload {} exceeds size limit ({MAX_PAYLOAD_BYTES} bytes)",
            path.display()
        )));
    }
    let bytes = std::fs::read(path)
        .map_err(|err| CliError::new(format!("failed to read {}: {err}", path.display())))?;
    serde_json::from_slice(&bytes)
        .map_err(|err| CliError::new(format!("invalid payload json: {err}")))
}

/// Returns warning lines for contracts that can never match an event.
fn unmatchable_warnings(registry: &ContractRegistry) -> Vec<String> {
    registry
        .unmatchable()
        .map(|id| format!("warning: contract {id} declares no sources and matches no events"))
        .collect()
}

/// Writes unmatchable-contract warnings to stderr.
fn warn_unmatchable(registry: &ContractRegistry) -> CliResult<()> {
    for warning in unmatchable_warnings(registry) {
        write_stderr_line(&warning).map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }
    Ok(())
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes raw bytes to stdout with a trailing newline.
fn write_stdout_bytes_with_newline(bytes: &[u8]) -> CliResult<()> {
    let mut buffer = bytes.to_vec();
    buffer.push(b'\n');
    let mut stdout = std::io::stdout();
    stdout.write_all(&buffer).map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes a value as pretty JSON to stdout.
fn write_json_pretty<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::new(format!("failed to serialize output: {err}")))?;
    write_stdout_line(&text).map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write to {stream}: {error}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
