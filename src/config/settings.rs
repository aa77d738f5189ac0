//! User settings for certdesk
//!
//! Manages deployment preferences: search page size, display date format,
//! and the policy flag for updating cancelled certificates.

use serde::{Deserialize, Serialize};

use super::paths::CertPaths;
use crate::error::CertError;
use crate::storage::file_io::{read_json, write_json_atomic};

/// User settings for certdesk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Whether an update may revive a cancelled certificate as a new edition.
    /// Off by default; the safer policy rejects such updates outright.
    #[serde(default)]
    pub allow_cancelled_update: bool,

    /// Number of rows per search results page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Date format preference for display output (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Whether initial setup has been completed
    #[serde(default)]
    pub setup_completed: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_page_size() -> usize {
    25
}

fn default_date_format() -> String {
    "%d %b %Y".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            allow_cancelled_update: false,
            page_size: default_page_size(),
            date_format: default_date_format(),
            setup_completed: false,
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &CertPaths) -> Result<Self, CertError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            read_json(&settings_path)
        } else {
            let settings = Self::default();
            settings.save(paths)?;
            Ok(settings)
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &CertPaths) -> Result<(), CertError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(!settings.allow_cancelled_update);
        assert_eq!(settings.page_size, 25);
        assert_eq!(settings.schema_version, 1);
    }

    #[test]
    fn test_load_or_create_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CertPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings::load_or_create(&paths).unwrap();
        assert!(paths.settings_file().exists());
        assert_eq!(settings.page_size, 25);
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CertPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.allow_cancelled_update = true;
        settings.page_size = 50;
        settings.save(&paths).unwrap();

        let reloaded = Settings::load_or_create(&paths).unwrap();
        assert!(reloaded.allow_cancelled_update);
        assert_eq!(reloaded.page_size, 50);
    }
}
