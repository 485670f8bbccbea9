//! edit_file tool - replace one exact occurrence of text in a file

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::tools::{Tool, ToolContext, ToolResult, parse_input};
use crate::workspace::EditRequest;

/// Replace a unique span of text in a file
pub struct EditFileTool;

#[async_trait]
impl Tool for EditFileTool {
    fn name(&self) -> &'static str {
        "edit_file"
    }

    fn description(&self) -> &'static str {
        "Edit a file by replacing one exact occurrence of old_text with new_text. \
         Use for small, targeted changes; old_text must match exactly. \
         For large changes, use read_file then write_file."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "File path to edit"
                },
                "old_text": {
                    "type": "string",
                    "description": "Exact substring to find (must appear once)"
                },
                "new_text": {
                    "type": "string",
                    "description": "Text to replace it with"
                }
            },
            "required": ["path", "old_text", "new_text"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult {
        debug!("EditFileTool::execute: called");
        let req: EditRequest = match parse_input(input) {
            Ok(r) => r,
            Err(e) => {
                debug!(%e, "EditFileTool::execute: invalid input");
                return e.into();
            }
        };

        ctx.workspace
            .edit(&req)
            .await
            .map(|outcome| outcome.to_string())
            .into()
    }
}
