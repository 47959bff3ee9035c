//! User settings for trello2md
//!
//! Controls document naming and progress output. Missing fields fall back to
//! the defaults, which reproduce the historical output exactly.

use serde::{Deserialize, Serialize};

use super::paths::Trello2MdPaths;
use crate::error::ExportError;
use crate::export::ExportOptions;

/// User settings for trello2md
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Extension appended to every generated document
    #[serde(default = "default_document_extension")]
    pub document_extension: String,

    /// Base name of the per-board index document
    #[serde(default = "default_index_name")]
    pub index_name: String,

    /// Width the entity name is padded/truncated to in progress lines
    #[serde(default = "default_progress_name_width")]
    pub progress_name_width: usize,

    /// Export archived lists and cards as well
    #[serde(default)]
    pub include_closed: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_document_extension() -> String {
    ".md".to_string()
}

fn default_index_name() -> String {
    "index".to_string()
}

fn default_progress_name_width() -> usize {
    30
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            document_extension: default_document_extension(),
            index_name: default_index_name(),
            progress_name_width: default_progress_name_width(),
            include_closed: false,
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &Trello2MdPaths) -> Result<Self, ExportError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| ExportError::filesystem("read settings file", &settings_path, e))?;

        let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
            ExportError::Config(format!("Failed to parse settings file: {}", e))
        })?;
        settings.validate()?;

        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &Trello2MdPaths) -> Result<(), ExportError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ExportError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| ExportError::filesystem("write settings file", &settings_path, e))
    }

    /// Reject settings that would produce unusable file names
    pub fn validate(&self) -> Result<(), ExportError> {
        if self.index_name.trim().is_empty() {
            return Err(ExportError::Config("index_name cannot be empty".into()));
        }
        if self.index_name.contains(['/', '\\']) || self.document_extension.contains(['/', '\\'])
        {
            return Err(ExportError::Config(
                "index_name and document_extension cannot contain path separators".into(),
            ));
        }
        Ok(())
    }

    /// Options handed to the materializer for one run
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            document_extension: self.document_extension.clone(),
            index_name: self.index_name.clone(),
            progress_name_width: self.progress_name_width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.document_extension, ".md");
        assert_eq!(settings.index_name, "index");
        assert_eq!(settings.progress_name_width, 30);
        assert!(!settings.include_closed);
    }

    #[test]
    fn test_load_missing_returns_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Trello2MdPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings::load_or_create(&paths).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(!paths.settings_file().exists());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Trello2MdPaths::with_base_dir(temp_dir.path().join("cfg"));

        let settings = Settings {
            document_extension: ".markdown".into(),
            include_closed: true,
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Trello2MdPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"progress_name_width": 12}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.progress_name_width, 12);
        assert_eq!(loaded.document_extension, ".md");
    }

    #[test]
    fn test_invalid_index_name_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Trello2MdPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"index_name": "a/b"}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, ExportError::Config(_)));
    }

    #[test]
    fn test_export_options() {
        let options = Settings::default().export_options();
        assert_eq!(options.index_file_name(), "index.md");
    }
}
