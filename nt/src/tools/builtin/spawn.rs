//! spawn tool - hand a task to a background subagent

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::subagent::SpawnRequest;
use crate::tools::{SessionContext, Tool, ToolContext, ToolError, ToolResult, parse_input};

/// Spawn a background subagent for long-running work
pub struct SpawnTool;

#[derive(Debug, Deserialize)]
struct SpawnInput {
    task: String,
    label: Option<String>,
}

#[async_trait]
impl Tool for SpawnTool {
    fn name(&self) -> &'static str {
        "spawn"
    }

    fn description(&self) -> &'static str {
        "Spawn a background subagent to handle a task independently. Use for complex or long-running work \
         (e.g. research, multi-step runs); the subagent has exec, files, and web tools and reports back when done."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "task": {
                    "type": "string",
                    "description": "Clear description of the task for the subagent to complete"
                },
                "label": {
                    "type": "string",
                    "description": "Optional short label for the task (for display to user)"
                }
            },
            "required": ["task"]
        })
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> ToolResult {
        debug!(?input, "SpawnTool::execute: called");

        let manager = match &ctx.subagents {
            Some(m) => m,
            None => {
                debug!("SpawnTool::execute: subagent manager not available");
                return ToolError::Unavailable {
                    capability: "Subagent spawning",
                }
                .into();
            }
        };

        let input: SpawnInput = match parse_input(input) {
            Ok(i) => i,
            Err(e) => return e.into(),
        };

        if input.task.trim().is_empty() {
            return ToolError::InvalidArgument("task is required and cannot be empty".to_string()).into();
        }

        let request = SpawnRequest {
            task: input.task,
            label: input.label.filter(|l| !l.trim().is_empty()),
            origin: ctx.session.clone().unwrap_or_else(SessionContext::cli),
        };

        info!(
            session_key = %request.session_key(),
            label = ?request.label,
            "Spawning subagent"
        );

        match manager.spawn(request).await {
            Ok(text) => ToolResult::success(text),
            Err(e) => ToolError::from(e).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subagent::SubagentManager;
    use std::sync::{Arc, Mutex};
    use tempfile::tempdir;

    #[derive(Default)]
    struct RecordingManager {
        requests: Mutex<Vec<SpawnRequest>>,
    }

    #[async_trait]
    impl SubagentManager for RecordingManager {
        async fn spawn(&self, request: SpawnRequest) -> eyre::Result<String> {
            let label = request.label.clone().unwrap_or_else(|| "task".to_string());
            self.requests.lock().unwrap().push(request);
            Ok(format!("Subagent [{}] started", label))
        }
    }

    struct FailingManager;

    #[async_trait]
    impl SubagentManager for FailingManager {
        async fn spawn(&self, _request: SpawnRequest) -> eyre::Result<String> {
            Err(eyre::eyre!("too many subagents running"))
        }
    }

    #[tokio::test]
    async fn test_spawn_defaults_to_cli_origin() {
        let temp = tempdir().unwrap();
        let manager = Arc::new(RecordingManager::default());
        let ctx = ToolContext::sandboxed(temp.path().to_path_buf()).with_subagents(manager.clone());

        let result = SpawnTool
            .execute(serde_json::json!({"task": "Summarize the logs", "label": "logs"}), &ctx)
            .await;

        assert!(!result.is_error);
        assert_eq!(result.content, "Subagent [logs] started");

        let requests = manager.requests.lock().unwrap();
        assert_eq!(requests[0].session_key(), "cli:direct");
        assert_eq!(requests[0].task, "Summarize the logs");
    }

    #[tokio::test]
    async fn test_spawn_uses_session_origin() {
        let temp = tempdir().unwrap();
        let manager = Arc::new(RecordingManager::default());
        let ctx = ToolContext::sandboxed(temp.path().to_path_buf())
            .with_session(SessionContext::new("discord", "room-7"))
            .with_subagents(manager.clone());

        SpawnTool.execute(serde_json::json!({"task": "research"}), &ctx).await;

        let requests = manager.requests.lock().unwrap();
        assert_eq!(requests[0].session_key(), "discord:room-7");
        assert_eq!(requests[0].label, None);
    }

    #[tokio::test]
    async fn test_spawn_errors() {
        let temp = tempdir().unwrap();
        let bare = ToolContext::sandboxed(temp.path().to_path_buf());
        let unavailable = SpawnTool.execute(serde_json::json!({"task": "x"}), &bare).await;
        assert!(unavailable.is_error);
        assert!(unavailable.content.contains("not available"));

        let ctx = bare.clone().with_subagents(Arc::new(RecordingManager::default()));
        let empty = SpawnTool.execute(serde_json::json!({"task": "  "}), &ctx).await;
        assert!(empty.is_error);

        let failing = bare.with_subagents(Arc::new(FailingManager));
        let failed = SpawnTool.execute(serde_json::json!({"task": "x"}), &failing).await;
        assert!(failed.is_error);
        assert!(failed.content.contains("too many subagents running"));
    }
}
