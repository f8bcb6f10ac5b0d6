//! Path management for student-records
//!
//! Provides XDG-compliant path resolution for configuration, data, and backups.
//!
//! ## Path Resolution Order
//!
//! 1. `STUDENT_RECORDS_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/student-records` or `~/.config/student-records`
//! 3. Windows: `%APPDATA%\student-records`

use std::path::PathBuf;

use crate::error::RecordsError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "STUDENT_RECORDS_DATA_DIR";

/// Manages all paths used by student-records
#[derive(Debug, Clone)]
pub struct RecordsPaths {
    /// Base directory for all student-records data
    base_dir: PathBuf,
}

impl RecordsPaths {
    /// Create a new RecordsPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, RecordsError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create RecordsPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (`<base>/data/`)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the backup directory (`<base>/backups/`)
    pub fn backup_dir(&self) -> PathBuf {
        self.base_dir.join("backups")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to students.json
    pub fn students_file(&self) -> PathBuf {
        self.data_dir().join("students.json")
    }

    /// Ensure the base, data and backup directories exist
    pub fn ensure_directories(&self) -> Result<(), RecordsError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| RecordsError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| RecordsError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.backup_dir())
            .map_err(|e| RecordsError::Io(format!("Failed to create backup directory: {}", e)))?;

        Ok(())
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, RecordsError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                RecordsError::Config("Could not determine HOME directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("student-records"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, RecordsError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| RecordsError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("student-records"))
}
