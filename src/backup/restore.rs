//! Backup restoration for student-records
//!
//! Replaces the data file with the contents of a backup after checking the
//! backup decodes into a valid student collection.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{RecordsError, RecordsResult};
use crate::models::StudentRecord;
use crate::storage::file_io::{read_json_required, temp_sibling};
use crate::storage::students::decode_records;

use super::manager::BackupManager;

/// Handles restoring from backups
pub struct RestoreManager {
    target: PathBuf,
    backups: BackupManager,
}

impl RestoreManager {
    /// Create a new RestoreManager for the given data file
    pub fn new(target: PathBuf, backups: BackupManager) -> Self {
        Self { target, backups }
    }

    /// Restore data from a backup file
    ///
    /// The current data file, if any, is itself backed up first so a restore
    /// can be undone.
    pub fn restore_from_file(&self, backup_path: &Path) -> RecordsResult<RestoreResult> {
        let validation = self.validate_backup(backup_path)?;

        let pre_restore_backup = self.backups.create_backup()?;

        if let Some(parent) = self.target.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = temp_sibling(&self.target);
        let result = fs::copy(backup_path, &temp_path)
            .and_then(|_| fs::rename(&temp_path, &self.target))
            .map_err(|e| RecordsError::Io(format!("Failed to restore backup: {}", e)));

        if result.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        result?;

        info!(
            backup = %backup_path.display(),
            students = validation.student_count,
            "restored backup"
        );

        Ok(RestoreResult {
            restored_from: backup_path.to_path_buf(),
            pre_restore_backup,
            student_count: validation.student_count,
        })
    }

    /// Validate a backup file without restoring it
    pub fn validate_backup(&self, backup_path: &Path) -> RecordsResult<ValidationResult> {
        let records: Vec<StudentRecord> = read_json_required(backup_path)?;
        let students = decode_records(backup_path, &records)?;

        Ok(ValidationResult {
            student_count: students.len(),
            course_count: students.iter().map(|s| s.courses().len()).sum(),
        })
    }
}

/// Result of a restore operation
#[derive(Debug)]
pub struct RestoreResult {
    pub restored_from: PathBuf,
    /// Snapshot of the data file taken just before it was replaced
    pub pre_restore_backup: Option<PathBuf>,
    pub student_count: usize,
}

impl RestoreResult {
    /// Get a summary of what was restored
    pub fn summary(&self) -> String {
        format!(
            "Restored {} student(s) from {}",
            self.student_count,
            self.restored_from.display()
        )
    }
}

/// Result of validating a backup
#[derive(Debug)]
pub struct ValidationResult {
    pub student_count: usize,
    pub course_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::student::tests::sample_fields;
    use crate::models::Student;
    use crate::storage::students::StudentRepository;
    use tempfile::TempDir;

    fn setup() -> (TempDir, StudentRepository, RestoreManager) {
        let temp_dir = TempDir::new().unwrap();
        let data_file = temp_dir.path().join("students.json");
        let backups = BackupManager::new(temp_dir.path().join("backups"), data_file.clone());
        let repo = StudentRepository::new(data_file.clone());
        let restore = RestoreManager::new(data_file, backups);
        (temp_dir, repo, restore)
    }

    #[test]
    fn test_restore_replaces_current_data() {
        let (temp, repo, restore) = setup();
        let first = Student::create(&sample_fields("STU001")).unwrap();
        repo.save(&[first.clone()]).unwrap();

        let backup_path = temp.path().join("saved.json");
        fs::copy(repo.path(), &backup_path).unwrap();

        let second = Student::create(&sample_fields("STU002")).unwrap();
        repo.save(&[first.clone(), second]).unwrap();

        let result = restore.restore_from_file(&backup_path).unwrap();
        assert_eq!(result.student_count, 1);
        assert!(result.pre_restore_backup.is_some());
        assert_eq!(repo.load().unwrap(), vec![first]);
    }

    #[test]
    fn test_restore_when_no_current_file() {
        let (temp, repo, restore) = setup();
        let backup_path = temp.path().join("saved.json");
        fs::write(&backup_path, "[]").unwrap();

        let result = restore.restore_from_file(&backup_path).unwrap();
        assert!(result.pre_restore_backup.is_none());
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_backup_leaves_data_untouched() {
        let (temp, repo, restore) = setup();
        let student = Student::create(&sample_fields("STU001")).unwrap();
        repo.save(&[student.clone()]).unwrap();

        let backup_path = temp.path().join("broken.json");
        fs::write(&backup_path, "{ nope").unwrap();

        assert!(restore.restore_from_file(&backup_path).unwrap_err().is_corrupt());
        assert_eq!(repo.load().unwrap(), vec![student]);
    }

    #[test]
    fn test_validate_backup_counts() {
        let (temp, repo, restore) = setup();
        let mut student = Student::create(&sample_fields("STU001")).unwrap();
        student.add_course("Algebra").unwrap();
        student.add_course("Biology").unwrap();
        repo.save(&[student]).unwrap();

        let backup_path = temp.path().join("copy.json");
        fs::copy(repo.path(), &backup_path).unwrap();

        let validation = restore.validate_backup(&backup_path).unwrap();
        assert_eq!(validation.student_count, 1);
        assert_eq!(validation.course_count, 2);
    }

    #[test]
    fn test_missing_backup_file() {
        let (temp, _repo, restore) = setup();
        assert!(restore
            .validate_backup(&temp.path().join("missing.json"))
            .is_err());
    }
}
