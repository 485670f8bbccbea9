//! list_dir tool - list files and directories

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::tools::{Tool, ToolContext, ToolResult, parse_input};
use crate::workspace::{ListRequest, Listing};

/// List files and directories in a path
pub struct ListDirectoryTool;

#[async_trait]
impl Tool for ListDirectoryTool {
    fn name(&self) -> &'static str {
        "list_dir"
    }

    fn description(&self) -> &'static str {
        "List files and subdirectories in a directory. Use to explore the workspace \
         or discover project structure. Paths are relative to workspace unless absolute."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Directory path to list (e.g. '.' or 'notes'; default: .)"
                }
            }
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult {
        debug!(?input, "ListDirectoryTool::execute: called");
        let req: ListRequest = match parse_input(input) {
            Ok(r) => r,
            Err(e) => return e.into(),
        };

        match ctx.workspace.list(&req).await {
            Ok(Listing::Empty) => {
                debug!("ListDirectoryTool::execute: empty directory");
                ToolResult::success(format!("Directory {} is empty", req.path))
            }
            Ok(Listing::Entries(entries)) => {
                let lines: Vec<String> = entries.iter().map(|e| e.to_string()).collect();
                ToolResult::success(lines.join("\n"))
            }
            Err(e) => e.into(),
        }
    }
}
