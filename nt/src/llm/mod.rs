//! Tool-calling protocol types shared with the LLM loop

mod types;

pub use types::{ToolCall, ToolDefinition};
