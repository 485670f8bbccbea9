//! Tool error types

use std::path::PathBuf;
use thiserror::Error;

use crate::workspace::NoMatchHint;

/// Errors that can occur during tool execution
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Path {path} is outside allowed directory {boundary}")]
    SandboxViolation { path: String, boundary: PathBuf },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("Not a file: {path}")]
    NotAFile { path: String },

    #[error("Not a directory: {path}")]
    NotADirectory { path: String },

    #[error("File is not valid UTF-8 text: {path}")]
    Decode {
        path: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("old_text appears {count} times in {path}. Please provide more context to make it unique.")]
    AmbiguousMatch { path: String, count: usize },

    #[error("old_text not found in {path}. {hint}")]
    NoMatch { path: String, hint: NoMatchHint },

    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Tool not found: {name}")]
    UnknownTool { name: String },

    #[error("{capability} is not available in this context")]
    Unavailable { capability: &'static str },

    #[error("{0}")]
    Collaborator(String),
}

impl ToolError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Stable tag for the error kind, independent of the message text
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SandboxViolation { .. } => "permission_denied",
            Self::FileNotFound { .. } | Self::DirectoryNotFound { .. } => "not_found",
            Self::NotAFile { .. } => "not_a_file",
            Self::NotADirectory { .. } => "not_a_directory",
            Self::Decode { .. } => "decode_error",
            Self::AmbiguousMatch { .. } => "ambiguous_match",
            Self::NoMatch { .. } => "no_match",
            Self::Io { .. } => "io_failure",
            Self::InvalidArgument(_) => "invalid_argument",
            Self::UnknownTool { .. } => "unknown_tool",
            Self::Unavailable { .. } => "unavailable",
            Self::Collaborator(_) => "collaborator",
        }
    }
}

impl From<eyre::Report> for ToolError {
    fn from(err: eyre::Report) -> Self {
        Self::Collaborator(format!("{:#}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sandbox_violation_message() {
        let err = ToolError::SandboxViolation {
            path: "../etc/passwd".to_string(),
            boundary: PathBuf::from("/tmp/workspace"),
        };

        let msg = err.to_string();
        assert!(msg.contains("../etc/passwd"));
        assert!(msg.contains("/tmp/workspace"));
        assert_eq!(err.kind(), "permission_denied");
    }

    #[test]
    fn test_ambiguous_match_message() {
        let err = ToolError::AmbiguousMatch {
            path: "notes.md".to_string(),
            count: 5,
        };

        let msg = err.to_string();
        assert!(msg.contains("5 times"));
        assert!(msg.contains("more context"));
    }

    #[test]
    fn test_no_match_without_similar_text() {
        let err = ToolError::NoMatch {
            path: "notes.md".to_string(),
            hint: NoMatchHint::NoneFound,
        };

        let msg = err.to_string();
        assert!(msg.contains("not found in notes.md"));
        assert!(msg.contains("No similar text found"));
        assert_eq!(err.kind(), "no_match");
    }

    #[test]
    fn test_collaborator_error_from_report() {
        let err: ToolError = eyre::eyre!("scheduler offline").into();
        assert_eq!(err.kind(), "collaborator");
        assert!(err.to_string().contains("scheduler offline"));
    }
}
