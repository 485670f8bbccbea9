//! write_file tool - write content to a file

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::tools::{Tool, ToolContext, ToolResult, parse_input};
use crate::workspace::WriteRequest;

/// Write content to a file
pub struct WriteFileTool;

#[async_trait]
impl Tool for WriteFileTool {
    fn name(&self) -> &'static str {
        "write_file"
    }

    fn description(&self) -> &'static str {
        "Write or overwrite a file with the given content. Creates parent directories if needed. \
         Use to create new files or replace entire file contents."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "File path to write to (relative to workspace or absolute)"
                },
                "content": {
                    "type": "string",
                    "description": "Exact content to write"
                }
            },
            "required": ["path", "content"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult {
        debug!("WriteFileTool::execute: called");
        let req: WriteRequest = match parse_input(input) {
            Ok(r) => r,
            Err(e) => {
                debug!(%e, "WriteFileTool::execute: invalid input");
                return e.into();
            }
        };

        ctx.workspace
            .write(&req)
            .await
            .map(|outcome| outcome.to_string())
            .into()
    }
}
