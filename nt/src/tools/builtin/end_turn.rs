//! end_turn tool - model signals that its reply is complete

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::tools::{Tool, ToolContext, ToolResult};

/// Name the tool-calling loop watches for to end the model's turn
pub const END_TURN_TOOL: &str = "end_turn";

/// Signal that the response is complete and the user may reply
pub struct EndTurnTool;

#[async_trait]
impl Tool for EndTurnTool {
    fn name(&self) -> &'static str {
        END_TURN_TOOL
    }

    fn description(&self) -> &'static str {
        "Call this only when your response is complete and you are ready for the user to reply. \
         Pass your final message as 'content' (or leave empty to use your last message). \
         If you have more to add (more tool calls or another message), do not call end_turn yet; just continue."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "content": {
                    "type": "string",
                    "description": "Your final message to the user (optional; if empty, your last text is used)"
                }
            },
            "required": []
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult {
        // The loop reads the call's arguments itself; this just acknowledges
        debug!(has_content = input.get("content").is_some(), session = ?ctx.session, "EndTurnTool::execute: called");
        ToolResult::success("Turn ended.")
    }
}
