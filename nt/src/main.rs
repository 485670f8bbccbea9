//! nanotools - sandboxed workspace file tools
//!
//! CLI entry point for running the built-in tools against a workspace.

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use serde_json::{Value, json};
use tracing::{debug, info};

use nanotools::cli::{Cli, Command};
use nanotools::config::Config;
use nanotools::llm::ToolCall;
use nanotools::tools::{SessionContext, ToolContext, ToolExecutor, ToolResult};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("nanotools")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(log_dir.join("nanotools.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());

    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    // CLI flags override the config file
    if let Some(root) = &cli.workspace {
        config.workspace.root = Some(root.clone());
    }
    if cli.no_restrict {
        config.workspace.restrict_to_workspace = false;
        config.workspace.allowed_dir = None;
    }
    config.validate().context("Invalid configuration")?;

    let workspace = config.workspace()?;
    info!(?workspace, "nanotools loaded config");

    let ctx = ToolContext::new(workspace).with_session(SessionContext::cli());
    let executor = ToolExecutor::standard();

    debug!(command = ?cli.command, "main: dispatching command");
    let call = match cli.command {
        Command::Tools => {
            cmd_tools(&executor)?;
            return Ok(ExitCode::SUCCESS);
        }
        Command::Read { path } => ToolCall::new("cli", "read_file", json!({ "path": path })),
        Command::Write { path, content } => {
            let content = match content {
                Some(content) => content,
                None => read_stdin()?,
            };
            ToolCall::new("cli", "write_file", json!({ "path": path, "content": content }))
        }
        Command::Edit {
            path,
            old_text,
            new_text,
        } => ToolCall::new(
            "cli",
            "edit_file",
            json!({ "path": path, "old_text": old_text, "new_text": new_text }),
        ),
        Command::List { path } => ToolCall::new("cli", "list_dir", json!({ "path": path })),
        Command::Call { tool, input } => {
            let input: Value = serde_json::from_str(&input).context("Tool input must be valid JSON")?;
            ToolCall::new("cli", tool, input)
        }
    };

    let result = executor.execute(&call, &ctx).await;
    Ok(report(result))
}

/// Print every tool definition as pretty JSON
fn cmd_tools(executor: &ToolExecutor) -> Result<()> {
    debug!("cmd_tools: called");
    let defs = executor.definitions();
    println!("{}", serde_json::to_string_pretty(&defs)?);
    Ok(())
}

fn read_stdin() -> Result<String> {
    let mut content = String::new();
    std::io::stdin()
        .read_to_string(&mut content)
        .context("Failed to read content from stdin")?;
    Ok(content)
}

/// Print a tool result; tool errors go to stderr and fail the process
fn report(result: ToolResult) -> ExitCode {
    if result.is_error {
        debug!(content = %result.content, "report: tool returned error");
        eprintln!("{}", result.content.red());
        return ExitCode::FAILURE;
    }
    print!("{}", result.content);
    if !result.content.ends_with('\n') {
        println!();
    }
    ExitCode::SUCCESS
}
