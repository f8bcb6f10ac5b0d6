//! Storage layer for student-records
//!
//! JSON file storage with atomic writes, a backup taken before every save,
//! and the audit trail of record-level changes.

pub mod file_io;
pub mod students;

pub use file_io::{read_json, write_json_atomic};
pub use students::StudentRepository;

use std::path::PathBuf;

use tracing::warn;

use crate::audit::{AuditEntry, AuditLogger};
use crate::backup::{BackupManager, RestoreManager};
use crate::config::paths::RecordsPaths;
use crate::error::RecordsError;
use crate::models::{Student, StudentRecord};

/// Main storage coordinator
pub struct Storage {
    paths: RecordsPaths,
    pub students: StudentRepository,
    pub backups: BackupManager,
    audit: AuditLogger,
    audit_enabled: bool,
}

impl Storage {
    /// Create a new Storage instance, creating its directories
    pub fn new(paths: RecordsPaths) -> Result<Self, RecordsError> {
        paths.ensure_directories()?;

        Ok(Self {
            students: StudentRepository::new(paths.students_file()),
            backups: BackupManager::new(paths.backup_dir(), paths.students_file()),
            audit: AuditLogger::new(paths.audit_log()),
            audit_enabled: true,
            paths,
        })
    }

    /// Turn the audit trail on or off
    pub fn with_audit(mut self, enabled: bool) -> Self {
        self.audit_enabled = enabled;
        self
    }

    pub fn paths(&self) -> &RecordsPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Restore helper bound to the student file
    pub fn restore_manager(&self) -> RestoreManager {
        RestoreManager::new(self.paths.students_file(), self.backups.clone())
    }

    pub fn load_students(&self) -> Result<Vec<Student>, RecordsError> {
        self.students.load()
    }

    /// Back up the current file, then overwrite it
    ///
    /// Returns the backup path when a prior file existed. A failed backup
    /// aborts the save.
    pub fn save_students(&self, students: &[Student]) -> Result<Option<PathBuf>, RecordsError> {
        let backup = self.backups.create_backup()?;
        self.students.save(students)?;
        Ok(backup)
    }

    pub fn log_create(&self, student: &Student) {
        self.record(vec![AuditEntry::student_created(&student.to_record())]);
    }

    /// One audit entry per imported student, appended together
    pub fn log_create_batch(&self, students: &[Student]) {
        self.record(
            students
                .iter()
                .map(|s| AuditEntry::student_created(&s.to_record()))
                .collect(),
        );
    }

    pub fn log_update(&self, before: &StudentRecord, after: &Student) {
        self.record(vec![AuditEntry::student_updated(before, &after.to_record())]);
    }

    pub fn log_delete(&self, student: &Student) {
        self.record(vec![AuditEntry::student_deleted(&student.to_record())]);
    }

    // The data file is already saved when this runs, so a failed append is
    // reported but does not fail the operation.
    fn record(&self, entries: Vec<AuditEntry>) {
        if !self.audit_enabled {
            return;
        }
        if let Err(e) = self.audit.log_batch(&entries) {
            warn!(error = %e, "failed to write audit log");
        }
    }
}
