//! ToolExecutor - manages tool execution for a conversation

use std::collections::HashMap;
use tracing::debug;

use crate::llm::{ToolCall, ToolDefinition};

use super::builtin::{
    CronTool, EditFileTool, EndTurnTool, ListDirectoryTool, ReadFileTool, SpawnTool, WriteFileTool,
};
use super::{Tool, ToolContext, ToolError, ToolResult};

/// Tool profiles define which tools are available
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolProfile {
    /// Every built-in tool (default)
    #[default]
    Full,
    /// Read-only file access (no write, edit, scheduling or spawning)
    ReadOnly,
}

/// Manages tool execution
pub struct ToolExecutor {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolExecutor {
    /// Create executor with standard tools (full profile)
    pub fn standard() -> Self {
        Self::with_profile(ToolProfile::Full)
    }

    /// Create executor with a specific tool profile
    pub fn with_profile(profile: ToolProfile) -> Self {
        debug!(?profile, "ToolExecutor::with_profile: called");
        let mut executor = Self::empty();

        // File system tools
        executor.add_tool(Box::new(ReadFileTool));
        executor.add_tool(Box::new(ListDirectoryTool));

        if profile == ToolProfile::Full {
            executor.add_tool(Box::new(WriteFileTool));
            executor.add_tool(Box::new(EditFileTool));

            // Collaborator tools (require handles in context)
            executor.add_tool(Box::new(CronTool));
            executor.add_tool(Box::new(SpawnTool));

            // Turn control
            executor.add_tool(Box::new(EndTurnTool));
        }

        executor
    }

    /// Create executor with read-only tools
    pub fn read_only() -> Self {
        Self::with_profile(ToolProfile::ReadOnly)
    }

    /// Create an empty executor (for testing)
    pub fn empty() -> Self {
        debug!("ToolExecutor::empty: called");
        Self { tools: HashMap::new() }
    }

    /// Add a tool to the executor
    pub fn add_tool(&mut self, tool: Box<dyn Tool>) {
        debug!(tool_name = %tool.name(), "ToolExecutor::add_tool: called");
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Get tool definitions for LLM, sorted by name
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        debug!("ToolExecutor::definitions: called");
        self.definitions_for(&self.tool_names())
    }

    /// Get definitions for a subset of tools by name
    pub fn definitions_for(&self, tool_names: &[String]) -> Vec<ToolDefinition> {
        debug!(?tool_names, "ToolExecutor::definitions_for: called");
        tool_names
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|t| ToolDefinition::new(t.name(), t.description(), t.input_schema()))
            .collect()
    }

    /// Execute a tool call
    pub async fn execute(&self, tool_call: &ToolCall, ctx: &ToolContext) -> ToolResult {
        debug!(tool_name = %tool_call.name, tool_id = %tool_call.id, "ToolExecutor::execute: called");
        match self.tools.get(&tool_call.name) {
            Some(tool) => {
                debug!("ToolExecutor::execute: tool found, executing");
                tool.execute(tool_call.input.clone(), ctx).await
            }
            None => {
                debug!("ToolExecutor::execute: unknown tool");
                ToolError::UnknownTool {
                    name: tool_call.name.clone(),
                }
                .into()
            }
        }
    }

    /// Execute multiple tool calls in order
    pub async fn execute_all(&self, tool_calls: &[ToolCall], ctx: &ToolContext) -> Vec<(String, ToolResult)> {
        debug!(count = tool_calls.len(), "ToolExecutor::execute_all: called");
        let mut results = Vec::with_capacity(tool_calls.len());

        for call in tool_calls {
            let result = self.execute(call, ctx).await;
            results.push((call.id.clone(), result));
        }

        results
    }

    /// Check if a tool exists
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get tool names, sorted
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for ToolExecutor {
    fn default() -> Self {
        Self::standard()
    }
}
