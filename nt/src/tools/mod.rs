//! Tool system for the assistant loop
//!
//! Tools expose file access, scheduling and subagent spawning to a
//! tool-calling LLM. Each call gets a `ToolContext` whose workspace
//! decides where file tools may act - paths cannot escape its boundary.

mod context;
mod error;
mod executor;
mod traits;

pub mod builtin;

pub use context::{SessionContext, ToolContext};
pub use error::ToolError;
pub use executor::{ToolExecutor, ToolProfile};
pub use traits::{Tool, ToolResult, parse_input};
