//! Path management for certdesk
//!
//! Provides XDG-compliant path resolution for configuration and data files.
//!
//! ## Path Resolution Order
//!
//! 1. `CERTDESK_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/certdesk` or `~/.config/certdesk`
//! 3. Windows: `%APPDATA%\certdesk`

use std::path::PathBuf;

use crate::error::CertError;

/// Manages all paths used by certdesk
#[derive(Debug, Clone)]
pub struct CertPaths {
    /// Base directory for all certdesk data
    base_dir: PathBuf,
}

impl CertPaths {
    /// Create a new CertPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, CertError> {
        let base_dir = if let Ok(custom) = std::env::var("CERTDESK_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create CertPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/certdesk/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/certdesk/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to certificates.json
    pub fn certificates_file(&self) -> PathBuf {
        self.data_dir().join("certificates.json")
    }

    /// Get the path to prefixes.json (year-prefix codes)
    pub fn prefixes_file(&self) -> PathBuf {
        self.data_dir().join("prefixes.json")
    }

    /// Get the path to users.json
    pub fn users_file(&self) -> PathBuf {
        self.data_dir().join("users.json")
    }

    /// Get the path to reference.json (part numbers, amendments, lookups)
    pub fn reference_file(&self) -> PathBuf {
        self.data_dir().join("reference.json")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), CertError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| CertError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| CertError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if certdesk has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, CertError> {
    // Unix (Linux/macOS): Use XDG_CONFIG_HOME if set, otherwise ~/.config
    let config_base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
    Ok(config_base.join("certdesk"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, CertError> {
    // Windows: Use APPDATA
    let appdata = std::env::var("APPDATA")
        .map_err(|_| CertError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("certdesk"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CertPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(
            paths.certificates_file(),
            temp_dir.path().join("data").join("certificates.json")
        );
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CertPaths::with_base_dir(temp_dir.path().to_path_buf());

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
        assert!(!paths.is_initialized());
    }
}
