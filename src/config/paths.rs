//! Path resolution for cardiee configuration and data files.
//!
//! All cardiee data is stored in `~/.cardiee/` unless overridden with
//! `--home` or `CARDIEE_HOME`:
//! - `config.yaml` - Main configuration file
//! - `cardiee.db` - SQLite database holding the deck

use std::path::PathBuf;

use crate::error::CardieeError;

/// Paths to cardiee configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.cardiee/`
    pub root: PathBuf,
    /// Config file: `~/.cardiee/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.cardiee/cardiee.db`
    pub database: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, CardieeError> {
        let home = std::env::var("HOME").map_err(|_| {
            CardieeError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".cardiee")))
    }

    /// Use `root` if given, otherwise the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if no root is given and the home directory cannot be
    /// determined.
    pub fn resolve(root: Option<PathBuf>) -> Result<Self, CardieeError> {
        root.map_or_else(Self::new, |root| Ok(Self::with_root(root)))
    }

    /// Create paths with a custom root directory.
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("cardiee.db"),
            root,
        }
    }

    /// Ensure the root directory exists, creating it if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), CardieeError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                CardieeError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_with_root() {
        let root = PathBuf::from("/tmp/test-cardiee");
        let paths = Paths::with_root(root.clone());

        assert_eq!(paths.root, root);
        assert_eq!(paths.config_file, root.join("config.yaml"));
        assert_eq!(paths.database, root.join("cardiee.db"));
    }

    #[test]
    fn test_resolve_prefers_override() {
        let root = PathBuf::from("/tmp/elsewhere");
        let paths = Paths::resolve(Some(root.clone())).unwrap();
        assert_eq!(paths.root, root);
    }

    #[test]
    fn test_ensure_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("nested").join("cardiee"));

        paths.ensure_dirs().unwrap();
        paths.ensure_dirs().unwrap();

        assert!(paths.root.is_dir());
    }
}
