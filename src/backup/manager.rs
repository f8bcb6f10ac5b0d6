//! Backup manager for student-records
//!
//! Copies the data file into the backup directory before it is overwritten.
//! Backups are never pruned.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{RecordsError, RecordsResult};

const BACKUP_PREFIX: &str = "students_backup_";
const BACKUP_EXTENSION: &str = ".json";

/// Metadata about a backup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupInfo {
    /// Backup filename
    pub filename: String,
    /// Full path to backup
    pub path: PathBuf,
    /// When the backup was created
    pub created_at: DateTime<Utc>,
    /// Tiebreaker for backups taken in the same millisecond
    pub sequence: u32,
    /// Size in bytes
    pub size_bytes: u64,
}

/// Creates and lists backups of one data file
#[derive(Debug, Clone)]
pub struct BackupManager {
    /// Path to backup directory
    backup_dir: PathBuf,
    /// File being backed up
    source: PathBuf,
}

impl BackupManager {
    /// Create a new BackupManager
    pub fn new(backup_dir: PathBuf, source: PathBuf) -> Self {
        Self { backup_dir, source }
    }

    /// Copy the current data file into the backup directory
    ///
    /// Returns `None` without touching the disk when there is no data file
    /// yet. Otherwise every call produces exactly one new file.
    pub fn create_backup(&self) -> RecordsResult<Option<PathBuf>> {
        if !self.source.exists() {
            return Ok(None);
        }

        fs::create_dir_all(&self.backup_dir).map_err(|e| {
            RecordsError::Io(format!("Failed to create backup directory: {}", e))
        })?;

        // UTC keeps names ordered across DST changes
        let now = Utc::now();
        let stamp = format!(
            "{}_{:03}",
            now.format("%Y%m%d_%H%M%S"),
            now.timestamp_subsec_millis() % 1000
        );

        let mut backup_path = self
            .backup_dir
            .join(format!("{}{}{}", BACKUP_PREFIX, stamp, BACKUP_EXTENSION));
        let mut sequence = 0;
        while backup_path.exists() {
            sequence += 1;
            backup_path = self.backup_dir.join(format!(
                "{}{}-{}{}",
                BACKUP_PREFIX, stamp, sequence, BACKUP_EXTENSION
            ));
        }

        fs::copy(&self.source, &backup_path)
            .map_err(|e| RecordsError::Io(format!("Failed to write backup file: {}", e)))?;

        info!(backup = %backup_path.display(), "created backup");
        Ok(Some(backup_path))
    }

    /// List all available backups, newest first
    pub fn list_backups(&self) -> RecordsResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();

        for entry in fs::read_dir(&self.backup_dir).map_err(|e| {
            RecordsError::Io(format!("Failed to read backup directory: {}", e))
        })? {
            let entry = entry.map_err(|e| {
                RecordsError::Io(format!("Failed to read directory entry: {}", e))
            })?;

            if let Some(info) = parse_backup_info(&entry.path()) {
                backups.push(info);
            }
        }

        backups.sort_by(|a, b| {
            (b.created_at, b.sequence).cmp(&(a.created_at, a.sequence))
        });

        Ok(backups)
    }

    /// Get backup directory path
    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Get a specific backup by filename
    pub fn get_backup(&self, filename: &str) -> RecordsResult<Option<BackupInfo>> {
        let path = self.backup_dir.join(filename);
        if path.exists() {
            Ok(parse_backup_info(&path))
        } else {
            Ok(None)
        }
    }

    /// Get the most recent backup
    pub fn get_latest_backup(&self) -> RecordsResult<Option<BackupInfo>> {
        let backups = self.list_backups()?;
        Ok(backups.into_iter().next())
    }
}

/// Parse backup info from a backup file path
fn parse_backup_info(path: &Path) -> Option<BackupInfo> {
    let filename = path.file_name()?.to_string_lossy().to_string();
    let stamp = filename
        .strip_prefix(BACKUP_PREFIX)?
        .strip_suffix(BACKUP_EXTENSION)?;
    let (created_at, sequence) = parse_backup_timestamp(stamp)?;
    let size_bytes = fs::metadata(path).ok()?.len();

    Some(BackupInfo {
        filename,
        path: path.to_path_buf(),
        created_at,
        sequence,
        size_bytes,
    })
}

/// Parse `YYYYMMDD_HHMMSS_mmm` with an optional `-N` sequence suffix
fn parse_backup_timestamp(stamp: &str) -> Option<(DateTime<Utc>, u32)> {
    let (stamp, sequence) = match stamp.split_once('-') {
        Some((stamp, seq)) => (stamp, seq.parse().ok()?),
        None => (stamp, 0),
    };

    let parts: Vec<&str> = stamp.split('_').collect();
    if parts.len() != 3 {
        return None;
    }

    let (date_part, time_part, millis_part) = (parts[0], parts[1], parts[2]);
    if date_part.len() != 8 || time_part.len() != 6 {
        return None;
    }

    let year: i32 = date_part[0..4].parse().ok()?;
    let month: u32 = date_part[4..6].parse().ok()?;
    let day: u32 = date_part[6..8].parse().ok()?;
    let hour: u32 = time_part[0..2].parse().ok()?;
    let minute: u32 = time_part[2..4].parse().ok()?;
    let second: u32 = time_part[4..6].parse().ok()?;
    let millis: u32 = millis_part.parse().ok()?;

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = NaiveTime::from_hms_milli_opt(hour, minute, second, millis)?;

    let datetime = NaiveDateTime::new(date, time);

    Some((DateTime::from_naive_utc_and_offset(datetime, Utc), sequence))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use tempfile::TempDir;

    fn create_test_manager() -> (BackupManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("students.json");
        let manager = BackupManager::new(temp_dir.path().join("backups"), source);
        (manager, temp_dir)
    }

    #[test]
    fn test_no_source_no_backup() {
        let (manager, _temp) = create_test_manager();

        assert!(manager.create_backup().unwrap().is_none());
        assert!(manager.list_backups().unwrap().is_empty());
    }

    #[test]
    fn test_create_backup_copies_bytes() {
        let (manager, temp) = create_test_manager();
        fs::write(temp.path().join("students.json"), "[]").unwrap();

        let backup_path = manager.create_backup().unwrap().unwrap();
        assert!(backup_path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("students_backup_"));
        assert_eq!(fs::read_to_string(backup_path).unwrap(), "[]");
    }

    #[test]
    fn test_each_call_adds_one_backup() {
        let (manager, temp) = create_test_manager();
        fs::write(temp.path().join("students.json"), "[]").unwrap();

        for expected in 1..=5 {
            manager.create_backup().unwrap();
            assert_eq!(manager.list_backups().unwrap().len(), expected);
        }
    }

    #[test]
    fn test_latest_backup() {
        let (manager, temp) = create_test_manager();
        assert!(manager.get_latest_backup().unwrap().is_none());

        fs::write(temp.path().join("students.json"), "[1]").unwrap();
        manager.create_backup().unwrap();
        fs::write(temp.path().join("students.json"), "[2]").unwrap();
        let second = manager.create_backup().unwrap().unwrap();

        let latest = manager.get_latest_backup().unwrap().unwrap();
        assert_eq!(latest.path, second);
    }

    #[test]
    fn test_get_backup_by_name() {
        let (manager, temp) = create_test_manager();
        fs::write(temp.path().join("students.json"), "[]").unwrap();
        let path = manager.create_backup().unwrap().unwrap();
        let name = path.file_name().unwrap().to_string_lossy().to_string();

        let info = manager.get_backup(&name).unwrap().unwrap();
        assert_eq!(info.path, path);
        assert!(manager.get_backup("missing.json").unwrap().is_none());
    }

    #[test]
    fn test_ignores_foreign_files() {
        let (manager, temp) = create_test_manager();
        fs::create_dir_all(temp.path().join("backups")).unwrap();
        fs::write(temp.path().join("backups").join("notes.txt"), "hi").unwrap();

        assert!(manager.list_backups().unwrap().is_empty());
    }

    #[test]
    fn test_parse_backup_timestamp() {
        let (timestamp, sequence) = parse_backup_timestamp("20251127_143022_456").unwrap();
        assert_eq!(timestamp.year(), 2025);
        assert_eq!(timestamp.month(), 11);
        assert_eq!(timestamp.day(), 27);
        assert_eq!(sequence, 0);

        let (_, sequence) = parse_backup_timestamp("20251127_143022_456-2").unwrap();
        assert_eq!(sequence, 2);

        assert!(parse_backup_timestamp("20251127-143022").is_none());
    }

    #[test]
    fn test_backup_names_use_utc() {
        let (manager, temp) = create_test_manager();
        fs::write(temp.path().join("students.json"), "[]").unwrap();

        let before = Utc::now() - chrono::Duration::seconds(1);
        manager.create_backup().unwrap();
        let after = Utc::now() + chrono::Duration::seconds(1);

        let created = manager.get_latest_backup().unwrap().unwrap().created_at;
        assert!(before <= created && created <= after);
    }

    #[test]
    fn test_list_follows_creation_order() {
        let (manager, temp) = create_test_manager();
        let mut created = Vec::new();
        for n in 0..4 {
            fs::write(temp.path().join("students.json"), format!("[{}]", n)).unwrap();
            created.push(manager.create_backup().unwrap().unwrap());
        }
        created.reverse();

        let listed: Vec<PathBuf> = manager
            .list_backups()
            .unwrap()
            .into_iter()
            .map(|b| b.path)
            .collect();
        assert_eq!(listed, created);
    }

    #[test]
    fn test_sequence_breaks_ties() {
        let (manager, temp) = create_test_manager();
        let dir = temp.path().join("backups");
        fs::create_dir_all(&dir).unwrap();
        for name in [
            "students_backup_20251102_013000_000.json",
            "students_backup_20251102_013000_000-1.json",
            "students_backup_20251102_055959_000.json",
        ] {
            fs::write(dir.join(name), "[]").unwrap();
        }

        let names: Vec<String> = manager
            .list_backups()
            .unwrap()
            .into_iter()
            .map(|b| b.filename)
            .collect();
        assert_eq!(
            names,
            vec![
                "students_backup_20251102_055959_000.json",
                "students_backup_20251102_013000_000-1.json",
                "students_backup_20251102_013000_000.json",
            ]
        );
    }
}
