//! Read, write, list and edit over a [`Workspace`]

use serde::Deserialize;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::tools::ToolError;

use super::Workspace;

/// Arguments for reading a file
#[derive(Debug, Clone, Deserialize)]
pub struct ReadRequest {
    pub path: String,
}

/// Arguments for writing a file
#[derive(Debug, Clone, Deserialize)]
pub struct WriteRequest {
    pub path: String,
    pub content: String,
}

/// Arguments for replacing one exact span in a file
#[derive(Debug, Clone, Deserialize)]
pub struct EditRequest {
    pub path: String,
    pub old_text: String,
    pub new_text: String,
}

/// Arguments for listing a directory
#[derive(Debug, Clone, Deserialize)]
pub struct ListRequest {
    #[serde(default = "default_list_path")]
    pub path: String,
}

fn default_list_path() -> String {
    ".".to_string()
}

impl ReadRequest {
    pub fn validate(&self) -> Result<(), ToolError> {
        require_path(&self.path)
    }
}

impl WriteRequest {
    pub fn validate(&self) -> Result<(), ToolError> {
        require_path(&self.path)
    }
}

impl EditRequest {
    pub fn validate(&self) -> Result<(), ToolError> {
        require_path(&self.path)?;
        if self.old_text.is_empty() {
            return Err(ToolError::InvalidArgument("old_text must not be empty".to_string()));
        }
        Ok(())
    }
}

impl ListRequest {
    pub fn validate(&self) -> Result<(), ToolError> {
        require_path(&self.path)
    }
}

fn require_path(path: &str) -> Result<(), ToolError> {
    if path.trim().is_empty() {
        return Err(ToolError::InvalidArgument("path is required".to_string()));
    }
    Ok(())
}

/// Result of a successful write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    pub path: PathBuf,
    pub bytes: usize,
}

impl fmt::Display for WriteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Successfully wrote {} bytes to {}", self.bytes, self.path.display())
    }
}

/// Result of a successful edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    pub path: PathBuf,
}

impl fmt::Display for EditOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Successfully edited {}", self.path.display())
    }
}

/// One child of a listed directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

impl fmt::Display for DirEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = if self.is_dir { "[dir]" } else { "[file]" };
        write!(f, "{} {}", tag, self.name)
    }
}

/// Directory listing; an empty directory is its own variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    Empty,
    Entries(Vec<DirEntry>),
}

impl Listing {
    pub fn entries(&self) -> &[DirEntry] {
        match self {
            Self::Empty => &[],
            Self::Entries(entries) => entries,
        }
    }
}

impl Workspace {
    /// Return the full text of a file
    pub async fn read(&self, req: &ReadRequest) -> Result<String, ToolError> {
        debug!(path = %req.path, "Workspace::read: called");
        req.validate()?;
        let path = self.resolve(&req.path)?;
        read_text(&req.path, &path).await
    }

    /// Overwrite a file, creating parent directories as needed
    pub async fn write(&self, req: &WriteRequest) -> Result<WriteOutcome, ToolError> {
        debug!(path = %req.path, content_len = req.content.len(), "Workspace::write: called");
        req.validate()?;
        let path = self.resolve(&req.path)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ToolError::io(&req.path, e))?;
        }

        tokio::fs::write(&path, req.content.as_bytes())
            .await
            .map_err(|e| ToolError::io(&req.path, e))?;

        info!(path = %path.display(), bytes = req.content.len(), "Workspace::write: file written");
        Ok(WriteOutcome {
            path,
            bytes: req.content.len(),
        })
    }

    /// List the immediate children of a directory, sorted by name
    pub async fn list(&self, req: &ListRequest) -> Result<Listing, ToolError> {
        debug!(path = %req.path, "Workspace::list: called");
        req.validate()?;
        let path = self.resolve(&req.path)?;

        match stat(&req.path, &path).await? {
            None => {
                return Err(ToolError::DirectoryNotFound { path: req.path.clone() });
            }
            Some(meta) if !meta.is_dir() => {
                return Err(ToolError::NotADirectory { path: req.path.clone() });
            }
            Some(_) => {}
        }

        let mut dir = tokio::fs::read_dir(&path)
            .await
            .map_err(|e| ToolError::io(&req.path, e))?;

        let mut entries = Vec::new();
        while let Some(entry) = dir.next_entry().await.map_err(|e| ToolError::io(&req.path, e))? {
            let name = entry.file_name().to_string_lossy().into_owned();
            // Follow symlinks; a dangling link lists as a file
            let is_dir = tokio::fs::metadata(entry.path())
                .await
                .map(|m| m.is_dir())
                .unwrap_or(false);
            entries.push(DirEntry { name, is_dir });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        debug!(entries_count = entries.len(), "Workspace::list: entries collected");

        if entries.is_empty() {
            Ok(Listing::Empty)
        } else {
            Ok(Listing::Entries(entries))
        }
    }

    /// Replace exactly one occurrence of `old_text` with `new_text`
    ///
    /// Zero occurrences fail with a similarity hint, more than one fail as
    /// ambiguous. The file is written only when the match is unique.
    pub async fn edit(&self, req: &EditRequest) -> Result<EditOutcome, ToolError> {
        debug!(path = %req.path, "Workspace::edit: called");
        req.validate()?;
        let path = self.resolve(&req.path)?;
        let content = read_text(&req.path, &path).await?;

        if !content.contains(&req.old_text) {
            debug!("Workspace::edit: old_text not found, building hint");
            let hint = self.matcher().diagnose(&content, &req.old_text, &req.path);
            return Err(ToolError::NoMatch {
                path: req.path.clone(),
                hint,
            });
        }

        let count = content.matches(req.old_text.as_str()).count();
        if count > 1 {
            debug!(%count, "Workspace::edit: old_text is not unique");
            return Err(ToolError::AmbiguousMatch {
                path: req.path.clone(),
                count,
            });
        }

        let updated = content.replacen(&req.old_text, &req.new_text, 1);
        tokio::fs::write(&path, updated)
            .await
            .map_err(|e| ToolError::io(&req.path, e))?;

        info!(path = %path.display(), "Workspace::edit: file edited");
        Ok(EditOutcome { path })
    }
}

/// Metadata for `path`, or `None` when nothing exists there
async fn stat(raw: &str, path: &Path) -> Result<Option<std::fs::Metadata>, ToolError> {
    match tokio::fs::metadata(path).await {
        Ok(meta) => Ok(Some(meta)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ToolError::io(raw, e)),
    }
}

async fn read_text(raw: &str, path: &Path) -> Result<String, ToolError> {
    match stat(raw, path).await? {
        None => return Err(ToolError::FileNotFound { path: raw.to_string() }),
        Some(meta) if !meta.is_file() => return Err(ToolError::NotAFile { path: raw.to_string() }),
        Some(_) => {}
    }

    let bytes = tokio::fs::read(path).await.map_err(|e| ToolError::io(raw, e))?;
    String::from_utf8(bytes).map_err(|source| ToolError::Decode {
        path: raw.to_string(),
        source,
    })
}
