//! Backup system for student-records
//!
//! Every save of the student file is preceded by a byte-for-byte copy of the
//! previous file into the backup directory.
//!
//! # Architecture
//!
//! - `BackupManager`: Creates and lists backups
//! - `RestoreManager`: Validates and restores backups
//!
//! # Naming
//!
//! Backups are named `students_backup_YYYYMMDD_HHMMSS_mmm.json` using local
//! time. Two backups in the same millisecond get a `-N` suffix. Backups are
//! kept indefinitely.

mod manager;
mod restore;

pub use manager::{BackupInfo, BackupManager};
pub use restore::{RestoreManager, RestoreResult, ValidationResult};
