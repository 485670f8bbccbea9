//! Tool call and tool definition types

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::tools::builtin::END_TURN_TOOL;

/// A tool invocation requested by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub input: serde_json::Value,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, input: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            input,
        }
    }

    /// Whether this call is the model ending its turn
    pub fn ends_turn(&self) -> bool {
        self.name == END_TURN_TOOL
    }

    /// Final message carried by an end-turn call, if any
    pub fn final_message(&self) -> Option<&str> {
        if !self.ends_turn() {
            return None;
        }
        self.input["content"].as_str().filter(|s| !s.is_empty())
    }
}

/// Tool definition advertised to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

impl ToolDefinition {
    /// Create a new tool definition
    pub fn new(name: impl Into<String>, description: impl Into<String>, input_schema: serde_json::Value) -> Self {
        let name = name.into();
        debug!(%name, "ToolDefinition::new: called");
        Self {
            name,
            description: description.into(),
            input_schema,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_end_turn_detection() {
        let call = ToolCall::new("c1", "end_turn", json!({"content": "Bye!"}));
        assert!(call.ends_turn());
        assert_eq!(call.final_message(), Some("Bye!"));

        let empty = ToolCall::new("c2", "end_turn", json!({"content": ""}));
        assert_eq!(empty.final_message(), None);

        let other = ToolCall::new("c3", "read_file", json!({"content": "x"}));
        assert!(!other.ends_turn());
        assert_eq!(other.final_message(), None);
    }

    #[test]
    fn test_tool_call_deserializes() {
        let call: ToolCall =
            serde_json::from_value(json!({"id": "c1", "name": "list_dir", "input": {"path": "."}})).unwrap();
        assert_eq!(call.name, "list_dir");
        assert_eq!(call.input["path"], ".");
    }
}
