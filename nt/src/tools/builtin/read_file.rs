//! read_file tool - return a file's full contents

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::tools::{Tool, ToolContext, ToolResult, parse_input};
use crate::workspace::ReadRequest;

/// Read a file's full contents
pub struct ReadFileTool;

#[async_trait]
impl Tool for ReadFileTool {
    fn name(&self) -> &'static str {
        "read_file"
    }

    fn description(&self) -> &'static str {
        "Read the full contents of a file. Use to inspect code, configs, notes, \
         or any file in the workspace. Paths are relative to workspace unless absolute."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "File path (relative to workspace or absolute)"
                }
            },
            "required": ["path"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult {
        debug!(?input, "ReadFileTool::execute: called");
        let req: ReadRequest = match parse_input(input) {
            Ok(r) => r,
            Err(e) => return e.into(),
        };

        ctx.workspace.read(&req).await.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_read_file_basic() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("test.txt"), "line 1\nline 2\nline 3").unwrap();

        let ctx = ToolContext::sandboxed(temp.path().to_path_buf());
        let result = ReadFileTool.execute(serde_json::json!({"path": "test.txt"}), &ctx).await;

        assert!(!result.is_error);
        assert_eq!(result.content, "line 1\nline 2\nline 3");
    }

    #[tokio::test]
    async fn test_read_file_not_found() {
        let temp = tempdir().unwrap();
        let ctx = ToolContext::sandboxed(temp.path().to_path_buf());

        let result = ReadFileTool
            .execute(serde_json::json!({"path": "nonexistent.txt"}), &ctx)
            .await;

        assert!(result.is_error);
        assert_eq!(result.content, "Error: File not found: nonexistent.txt");
    }

    #[tokio::test]
    async fn test_read_file_outside_workspace() {
        let temp = tempdir().unwrap();
        let ctx = ToolContext::sandboxed(temp.path().to_path_buf());

        let result = ReadFileTool
            .execute(serde_json::json!({"path": "../etc/passwd"}), &ctx)
            .await;

        assert!(result.is_error);
        assert!(result.content.contains("outside allowed directory"));
    }

    #[tokio::test]
    async fn test_read_file_missing_path() {
        let temp = tempdir().unwrap();
        let ctx = ToolContext::sandboxed(temp.path().to_path_buf());

        let result = ReadFileTool.execute(serde_json::json!({}), &ctx).await;

        assert!(result.is_error);
        assert!(result.content.contains("Invalid argument"));
    }
}
