//! Path resolution and sandbox containment

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

use crate::tools::ToolError;

/// Resolve a caller-supplied path and enforce the sandbox boundary
///
/// Relative paths are joined onto `workspace` when one is given. The result
/// is absolute with `.`, `..` and symlinks resolved, dangling symlinks
/// included. When `allowed_dir` is set the result must be that directory
/// or something beneath it.
///
/// The check and the caller's later filesystem access are not atomic: a
/// symlink swapped in between can still redirect the access.
pub fn resolve_path(raw: &str, workspace: Option<&Path>, allowed_dir: Option<&Path>) -> Result<PathBuf, ToolError> {
    debug!(%raw, ?workspace, ?allowed_dir, "resolve_path: called");
    let expanded = expand_home(raw);

    let joined = match workspace {
        Some(root) if expanded.is_relative() => {
            debug!("resolve_path: relative path, joining with workspace");
            root.join(&expanded)
        }
        _ => expanded,
    };

    let resolved = normalize(&joined).map_err(|e| ToolError::io(raw, e))?;

    if let Some(boundary) = allowed_dir {
        let boundary_resolved = normalize(boundary).map_err(|e| ToolError::io(boundary.display().to_string(), e))?;
        if !resolved.starts_with(&boundary_resolved) {
            debug!(?resolved, ?boundary_resolved, "resolve_path: sandbox violation detected");
            return Err(ToolError::SandboxViolation {
                path: raw.to_string(),
                boundary: boundary.to_path_buf(),
            });
        }
    }

    debug!(?resolved, "resolve_path: resolved");
    Ok(resolved)
}

/// Expand a leading `~` to the user's home directory
fn expand_home(raw: &str) -> PathBuf {
    if let Some(home) = dirs::home_dir() {
        if raw == "~" {
            return home;
        }
        if let Some(rest) = raw.strip_prefix("~/") {
            return home.join(rest);
        }
    }
    PathBuf::from(raw)
}

/// Symlinks followed during one resolution before giving up
const MAX_SYMLINK_HOPS: usize = 40;

/// One step of a path walk
enum Step {
    Prefix(OsString),
    Root,
    Parent,
    Name(OsString),
}

fn steps(path: &Path) -> Vec<Step> {
    path.components()
        .filter_map(|component| match component {
            Component::Prefix(prefix) => Some(Step::Prefix(prefix.as_os_str().to_owned())),
            Component::RootDir => Some(Step::Root),
            Component::CurDir => None,
            Component::ParentDir => Some(Step::Parent),
            Component::Normal(name) => Some(Step::Name(name.to_owned())),
        })
        .collect()
}

/// Make a path absolute, following symlinks component by component
///
/// Every symlink is followed, dangling ones included, so the result names
/// the file an access would really touch. Components that do not exist yet
/// are kept lexically, so a file that is about to be created still resolves.
fn normalize(path: &Path) -> std::io::Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut pending = steps(&absolute);
    pending.reverse();

    let mut resolved = PathBuf::new();
    let mut hops = 0;
    while let Some(step) = pending.pop() {
        match step {
            Step::Prefix(prefix) => resolved = PathBuf::from(prefix),
            Step::Root => resolved.push(Component::RootDir),
            Step::Parent => {
                resolved.pop();
            }
            Step::Name(name) => {
                let candidate = resolved.join(&name);
                match std::fs::symlink_metadata(&candidate) {
                    Ok(meta) if meta.file_type().is_symlink() => {
                        hops += 1;
                        if hops > MAX_SYMLINK_HOPS {
                            return Err(std::io::Error::other(format!(
                                "too many levels of symbolic links resolving {}",
                                path.display()
                            )));
                        }
                        let target = std::fs::read_link(&candidate)?;
                        debug!(?candidate, ?target, "normalize: following symlink");
                        // Absolute targets restart at their root; relative ones continue from the link's directory
                        pending.extend(steps(&target).into_iter().rev());
                    }
                    _ => resolved = candidate,
                }
            }
        }
    }
    Ok(resolved)
}
