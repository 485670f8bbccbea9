//! nanotools configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::workspace::{DEFAULT_SIMILARITY_THRESHOLD, Workspace};

/// Main nanotools configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,

    /// Workspace root and sandbox boundary
    pub workspace: WorkspaceConfig,

    /// Edit tool tuning
    pub edit: EditConfig,
}

impl Config {
    /// Validate configuration before use
    pub fn validate(&self) -> Result<()> {
        let threshold = self.edit.similarity_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(eyre::eyre!(
                "edit.similarity-threshold must be between 0 and 1, got {}",
                threshold
            ));
        }
        if let Some(dir) = &self.workspace.allowed_dir
            && !dir.is_absolute()
        {
            return Err(eyre::eyre!(
                "workspace.allowed-dir must be an absolute path, got {}",
                dir.display()
            ));
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Project-local .nanotools.yml, then ~/.config/nanotools/nanotools.yml
        for candidate in Self::fallback_paths() {
            if !candidate.exists() {
                continue;
            }
            match Self::load_from_file(&candidate) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", candidate.display(), e);
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read just the `log-level` key, before logging is set up
    ///
    /// Walks the same files as [`Config::load`] but parses nothing else and
    /// logs nothing. Errors are swallowed; the full load reports them later.
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        #[derive(Deserialize)]
        struct LogLevelOnly {
            #[serde(rename = "log-level")]
            log_level: Option<String>,
        }

        let candidates = match config_path {
            Some(path) => vec![path.clone()],
            None => Self::fallback_paths(),
        };

        candidates
            .iter()
            .filter_map(|path| fs::read_to_string(path).ok())
            .find_map(|content| serde_yaml::from_str::<LogLevelOnly>(&content).ok())
            .and_then(|parsed| parsed.log_level)
    }

    fn fallback_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(".nanotools.yml")];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("nanotools").join("nanotools.yml"));
        }
        paths
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Build the workspace the file tools operate in
    ///
    /// Without a configured root the current directory is used.
    pub fn workspace(&self) -> Result<Workspace> {
        let root = match &self.workspace.root {
            Some(root) => root.clone(),
            None => std::env::current_dir().context("Failed to read current directory")?,
        };

        let allowed_dir = match &self.workspace.allowed_dir {
            Some(dir) => Some(dir.clone()),
            None if self.workspace.restrict_to_workspace => Some(root.clone()),
            None => None,
        };

        Ok(Workspace::new(Some(root), allowed_dir).with_similarity_threshold(self.edit.similarity_threshold))
    }
}

/// Workspace configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Directory relative paths are resolved against
    pub root: Option<PathBuf>,

    /// Use the root as the sandbox boundary
    #[serde(rename = "restrict-to-workspace")]
    pub restrict_to_workspace: bool,

    /// Explicit sandbox boundary; takes precedence over the root
    #[serde(rename = "allowed-dir")]
    pub allowed_dir: Option<PathBuf>,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: None,
            restrict_to_workspace: true,
            allowed_dir: None,
        }
    }
}

/// Edit tool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditConfig {
    /// Minimum ratio for a failed edit to show a best-match diff
    #[serde(rename = "similarity-threshold")]
    pub similarity_threshold: f64,
}

impl Default for EditConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.log_level.is_none());
        assert!(config.workspace.restrict_to_workspace);
        assert_eq!(config.edit.similarity_threshold, 0.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
log-level: debug

workspace:
  root: /srv/assistant
  restrict-to-workspace: false
  allowed-dir: /srv

edit:
  similarity-threshold: 0.7
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.workspace.root, Some(PathBuf::from("/srv/assistant")));
        assert!(!config.workspace.restrict_to_workspace);
        assert_eq!(config.workspace.allowed_dir, Some(PathBuf::from("/srv")));
        assert_eq!(config.edit.similarity_threshold, 0.7);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml = r#"
workspace:
  root: /tmp/ws
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert!(config.workspace.restrict_to_workspace);
        assert_eq!(config.edit.similarity_threshold, DEFAULT_SIMILARITY_THRESHOLD);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.edit.similarity_threshold = 1.5;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.workspace.allowed_dir = Some(PathBuf::from("relative/dir"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_workspace_boundary_selection() {
        let temp = tempdir().unwrap();
        let root = temp.path().to_path_buf();

        let mut config = Config::default();
        config.workspace.root = Some(root.clone());
        let ws = config.workspace().unwrap();
        assert_eq!(ws.root(), Some(root.as_path()));
        assert_eq!(ws.allowed_dir(), Some(root.as_path()));

        config.workspace.restrict_to_workspace = false;
        assert_eq!(config.workspace().unwrap().allowed_dir(), None);

        config.workspace.allowed_dir = Some(PathBuf::from("/srv"));
        assert_eq!(
            config.workspace().unwrap().allowed_dir(),
            Some(Path::new("/srv"))
        );
    }

    #[test]
    fn test_load_explicit_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nanotools.yml");
        fs::write(&path, "edit:\n  similarity-threshold: 0.8\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.edit.similarity_threshold, 0.8);
    }

    #[test]
    fn test_load_log_level_reads_only_that_key() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nanotools.yml");
        // Invalid for the full config, but the level is still readable
        fs::write(&path, "log-level: warn\nedit:\n  similarity-threshold: not-a-number\n").unwrap();

        assert_eq!(Config::load_log_level(Some(&path)).as_deref(), Some("warn"));
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("missing.yml");
        assert!(Config::load(Some(&path)).is_err());
        assert!(Config::load_log_level(Some(&path)).is_none());
    }
}
