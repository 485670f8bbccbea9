//! Subagent manager boundary

use async_trait::async_trait;
use std::sync::Arc;

use crate::tools::SessionContext;

/// A background task handed to the subagent manager
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnRequest {
    pub task: String,
    pub label: Option<String>,

    /// Conversation the subagent reports back to
    pub origin: SessionContext,
}

impl SpawnRequest {
    /// `channel:chat_id` key of the originating session
    pub fn session_key(&self) -> String {
        self.origin.session_key()
    }
}

/// Trait for spawning subagents - allows dependency injection
#[async_trait]
pub trait SubagentManager: Send + Sync {
    /// Start the task in the background and return a status message
    async fn spawn(&self, request: SpawnRequest) -> eyre::Result<String>;
}

pub type SubagentManagerRef = Arc<dyn SubagentManager>;
