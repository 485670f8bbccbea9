//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// nanotools - sandboxed workspace tools for assistant loops
#[derive(Parser, Debug)]
#[command(
    name = "nt",
    about = "Sandboxed workspace file tools for tool-calling assistants",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Workspace root (overrides config)
    #[arg(short, long, global = true)]
    pub workspace: Option<PathBuf>,

    /// Allow paths outside the workspace root
    #[arg(long = "no-restrict", global = true)]
    pub no_restrict: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print a file's contents
    Read {
        /// File path (relative to workspace or absolute)
        path: String,
    },

    /// Write a file, creating parent directories
    Write {
        /// File path to write
        path: String,

        /// Content to write (read from stdin when omitted)
        #[arg(long)]
        content: Option<String>,
    },

    /// Replace one exact occurrence of text in a file
    Edit {
        /// File path to edit
        path: String,

        /// Exact text to replace (must appear once)
        #[arg(long = "old")]
        old_text: String,

        /// Replacement text
        #[arg(long = "new")]
        new_text: String,
    },

    /// List a directory
    List {
        /// Directory path
        #[arg(default_value = ".")]
        path: String,
    },

    /// Run any registered tool with JSON input
    Call {
        /// Tool name
        tool: String,

        /// Tool input as a JSON object
        #[arg(default_value = "{}")]
        input: String,
    },

    /// Print tool definitions as JSON
    Tools,
}
