//! Path management for trello2md
//!
//! ## Path Resolution Order
//!
//! 1. `TRELLO2MD_CONFIG_DIR` environment variable (if set)
//! 2. The platform config directory reported by `directories`
//!    (`~/.config/trello2md` on Linux)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::ExportError;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "TRELLO2MD_CONFIG_DIR";

/// Manages all paths used by trello2md
#[derive(Debug, Clone)]
pub struct Trello2MdPaths {
    base_dir: PathBuf,
}

impl Trello2MdPaths {
    /// Resolve the configuration directory
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, ExportError> {
        let base_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(custom) => PathBuf::from(custom),
            None => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn ensure_directories(&self) -> Result<(), ExportError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| ExportError::filesystem("create config directory", &self.base_dir, e))
    }
}

fn resolve_default_path() -> Result<PathBuf, ExportError> {
    ProjectDirs::from("", "", "trello2md")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| ExportError::Config("Could not determine home directory".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Trello2MdPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("nested").join("trello2md");
        let paths = Trello2MdPaths::with_base_dir(base.clone());

        paths.ensure_directories().unwrap();
        assert!(base.is_dir());
    }
}
