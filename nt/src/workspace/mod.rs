//! Sandboxed workspace file access
//!
//! A [`Workspace`] carries the two pieces of configuration every file
//! operation needs: an optional root that relative paths are joined onto,
//! and an optional allowed directory that no resolved path may leave.
//! Both are fixed at construction. Every operation resolves its path
//! first and only touches the filesystem once the path is known to be
//! inside the boundary.

mod ops;
mod resolve;
mod similarity;

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::tools::ToolError;

pub use ops::{DirEntry, EditOutcome, EditRequest, ListRequest, Listing, ReadRequest, WriteOutcome, WriteRequest};
pub use resolve::resolve_path;
pub use similarity::{
    DEFAULT_SIMILARITY_THRESHOLD, NoMatchHint, SimilarityMatch, SimilarityMatcher, similarity_ratio,
};

/// File-access configuration shared by the file tools
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    root: Option<PathBuf>,
    allowed_dir: Option<PathBuf>,
    matcher: SimilarityMatcher,
}

impl Workspace {
    /// Create a workspace from an optional root and an optional boundary
    pub fn new(root: Option<PathBuf>, allowed_dir: Option<PathBuf>) -> Self {
        debug!(?root, ?allowed_dir, "Workspace::new: called");
        Self {
            root,
            allowed_dir,
            matcher: SimilarityMatcher::default(),
        }
    }

    /// Root that is also the sandbox boundary
    pub fn restricted(root: PathBuf) -> Self {
        Self::new(Some(root.clone()), Some(root))
    }

    /// Root for relative paths with no boundary at all
    pub fn unrestricted(root: PathBuf) -> Self {
        Self::new(Some(root), None)
    }

    /// Override the similarity threshold used for failed-edit hints
    pub fn with_similarity_threshold(mut self, threshold: f64) -> Self {
        self.matcher = SimilarityMatcher::new(threshold);
        self
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn allowed_dir(&self) -> Option<&Path> {
        self.allowed_dir.as_deref()
    }

    pub fn matcher(&self) -> &SimilarityMatcher {
        &self.matcher
    }

    /// Resolve a raw path under this workspace's root and boundary
    pub fn resolve(&self, raw: &str) -> Result<PathBuf, ToolError> {
        resolve_path(raw, self.root(), self.allowed_dir())
    }
}
