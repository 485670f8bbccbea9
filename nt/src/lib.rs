//! nanotools - sandboxed workspace tools for tool-calling assistants
//!
//! nanotools gives an LLM-driven assistant a small set of file tools
//! (read, write, edit, list) that operate inside a configured workspace.
//! Every path is resolved and checked against the workspace boundary before
//! the filesystem is touched.
//!
//! # Modules
//!
//! - [`workspace`] - Path resolution, sandboxing and the file operations
//! - [`tools`] - Tool trait, built-in tools and the executor
//! - [`llm`] - Tool call and tool definition protocol types
//! - [`schedule`] - Scheduling service boundary used by the `cron` tool
//! - [`subagent`] - Subagent manager boundary used by the `spawn` tool
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod config;
pub mod llm;
pub mod schedule;
pub mod subagent;
pub mod tools;
pub mod workspace;

pub use config::Config;
pub use tools::{Tool, ToolContext, ToolError, ToolExecutor, ToolProfile, ToolResult};
pub use workspace::Workspace;
