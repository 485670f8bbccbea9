//! ToolContext - execution context for tools

use std::path::PathBuf;
use tracing::debug;

use crate::schedule::CronServiceRef;
use crate::subagent::SubagentManagerRef;
use crate::workspace::Workspace;

use super::ToolError;

/// Conversation a tool call originates from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub channel: String,
    pub chat_id: String,
}

impl SessionContext {
    pub fn new(channel: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            chat_id: chat_id.into(),
        }
    }

    /// Direct session from the command line
    pub fn cli() -> Self {
        Self::new("cli", "direct")
    }

    pub fn session_key(&self) -> String {
        format!("{}:{}", self.channel, self.chat_id)
    }
}

/// Execution context for tools - passed explicitly to every call
///
/// The workspace is fixed when the host builds the context. Session and
/// collaborator handles are per call, so concurrent conversations never
/// share mutable tool state.
#[derive(Clone)]
pub struct ToolContext {
    /// Root and sandbox boundary for the file tools
    pub workspace: Workspace,

    /// Originating conversation, if the host knows it
    pub session: Option<SessionContext>,

    /// Scheduling service for the `cron` tool
    pub cron: Option<CronServiceRef>,

    /// Subagent manager for the `spawn` tool
    pub subagents: Option<SubagentManagerRef>,
}

impl ToolContext {
    /// Create a new tool context
    pub fn new(workspace: Workspace) -> Self {
        debug!(?workspace, "ToolContext::new: called");
        Self {
            workspace,
            session: None,
            cron: None,
            subagents: None,
        }
    }

    /// Context whose workspace root is also its sandbox boundary
    pub fn sandboxed(root: PathBuf) -> Self {
        Self::new(Workspace::restricted(root))
    }

    pub fn with_session(mut self, session: SessionContext) -> Self {
        debug!(?session, "ToolContext::with_session: called");
        self.session = Some(session);
        self
    }

    pub fn with_cron(mut self, cron: CronServiceRef) -> Self {
        self.cron = Some(cron);
        self
    }

    pub fn with_subagents(mut self, subagents: SubagentManagerRef) -> Self {
        self.subagents = Some(subagents);
        self
    }

    /// Resolve a path under this context's workspace
    pub fn resolve(&self, raw: &str) -> Result<PathBuf, ToolError> {
        self.workspace.resolve(raw)
    }
}

impl std::fmt::Debug for ToolContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolContext")
            .field("workspace", &self.workspace)
            .field("session", &self.session)
            .field("cron", &self.cron.is_some())
            .field("subagents", &self.subagents.is_some())
            .finish()
    }
}
