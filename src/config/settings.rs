//! User settings for student-records
//!
//! Manages user preferences such as the CSV course delimiter, the at-risk
//! GPA threshold and whether the audit trail is written.

use serde::{Deserialize, Serialize};

use super::paths::RecordsPaths;
use crate::error::RecordsError;

/// User settings for student-records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Character joining course names in exported CSV
    #[serde(default = "default_course_delimiter")]
    pub course_delimiter: char,

    /// Students with a GPA strictly below this value are at risk
    #[serde(default = "default_at_risk_threshold")]
    pub at_risk_threshold: f64,

    /// Default number of students shown by `top`
    #[serde(default = "default_top_students_limit")]
    pub top_students_limit: usize,

    /// Whether mutations are recorded in the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_course_delimiter() -> char {
    ';'
}

fn default_at_risk_threshold() -> f64 {
    2.0
}

fn default_top_students_limit() -> usize {
    10
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            course_delimiter: default_course_delimiter(),
            at_risk_threshold: default_at_risk_threshold(),
            top_students_limit: default_top_students_limit(),
            audit_enabled: default_audit_enabled(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &RecordsPaths) -> Result<Self, RecordsError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                RecordsError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                RecordsError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &RecordsPaths) -> Result<(), RecordsError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            RecordsError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            RecordsError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Reject settings that would break CSV export or reporting
    pub fn validate(&self) -> Result<(), RecordsError> {
        let delimiter = self.course_delimiter;
        if delimiter == ',' || delimiter == '"' {
            return Err(RecordsError::Config(format!(
                "Course delimiter '{}' clashes with the CSV format",
                delimiter
            )));
        }
        // Letters, digits and blanks occur inside ordinary course names
        if delimiter.is_alphanumeric() || delimiter.is_whitespace() || delimiter.is_control() {
            return Err(RecordsError::Config(format!(
                "Course delimiter {:?} would split course names",
                delimiter
            )));
        }
        if !(0.0..=4.0).contains(&self.at_risk_threshold) {
            return Err(RecordsError::Config(format!(
                "At-risk threshold must be between 0.0 and 4.0, got {}",
                self.at_risk_threshold
            )));
        }
        Ok(())
    }
}
