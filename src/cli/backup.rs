//! Backup CLI commands
//!
//! These work on the data directory directly and never load the student
//! collection, so they keep working when the data file is corrupt.

use std::path::PathBuf;

use chrono::Utc;
use clap::Subcommand;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::backup::BackupManager;
use crate::error::{RecordsError, RecordsResult};
use crate::storage::Storage;

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// List all available backups, newest first
    List,

    /// Restore the data file from a backup
    Restore {
        /// Backup filename or path (use 'latest' for most recent)
        backup: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Show information about a specific backup
    Info {
        /// Backup filename or path (use 'latest' for most recent)
        backup: String,
    },
}

#[derive(Tabled)]
struct BackupRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Backup")]
    filename: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Age")]
    age: String,
    #[tabled(rename = "Size")]
    size: String,
}

/// Handle a backup command
pub fn handle_backup_command(storage: &Storage, cmd: BackupCommands) -> RecordsResult<()> {
    let manager = &storage.backups;

    match cmd {
        BackupCommands::List => {
            let backups = manager.list_backups()?;

            if backups.is_empty() {
                println!("No backups found.");
                println!("A backup is taken automatically before every change.");
                return Ok(());
            }

            let now = Utc::now();
            let rows = backups.iter().enumerate().map(|(i, backup)| BackupRow {
                index: i + 1,
                filename: backup.filename.clone(),
                created: backup.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
                age: format_duration(now.signed_duration_since(backup.created_at)),
                size: format_size(backup.size_bytes),
            });
            let mut table = Table::new(rows);
            table.with(Style::sharp());

            println!("{}", table);
            println!("Total: {} backup(s) in {}", backups.len(), manager.backup_dir().display());
        }

        BackupCommands::Restore { backup, force } => {
            let backup_path = resolve_backup_path(manager, &backup)?;

            let restore_manager = storage.restore_manager();
            let validation = restore_manager.validate_backup(&backup_path)?;

            println!("Backup Information");
            println!("==================");
            println!("File: {}", backup_path.display());
            println!("Students: {}", validation.student_count);
            println!();

            if !force {
                println!("WARNING: This will overwrite the current student data!");
                println!("To proceed, run again with --force flag:");
                println!("  students backup restore {} --force", backup);
                return Ok(());
            }

            let result = restore_manager.restore_from_file(&backup_path)?;

            if let Some(snapshot) = &result.pre_restore_backup {
                println!(
                    "Previous data saved as: {}",
                    snapshot
                        .file_name()
                        .map(|s| s.to_string_lossy().to_string())
                        .unwrap_or_else(|| snapshot.display().to_string())
                );
            }
            println!("Restore complete!");
            println!("{}", result.summary());
        }

        BackupCommands::Info { backup } => {
            let backup_path = resolve_backup_path(manager, &backup)?;
            let validation = storage.restore_manager().validate_backup(&backup_path)?;
            let metadata = std::fs::metadata(&backup_path)?;

            println!("Backup Details");
            println!("==============");
            println!("File: {}", backup_path.display());
            println!("Size: {}", format_size(metadata.len()));
            if let Some(name) = backup_path.file_name() {
                if let Some(info) = manager.get_backup(&name.to_string_lossy())? {
                    println!("Created: {}", info.created_at.format("%Y-%m-%d %H:%M:%S%.3f UTC"));
                }
            }
            println!();
            println!("Contents:");
            println!("  Students:    {}", validation.student_count);
            println!("  Enrollments: {}", validation.course_count);
        }
    }

    Ok(())
}

/// Resolve a backup identifier to a full path
fn resolve_backup_path(manager: &BackupManager, backup: &str) -> RecordsResult<PathBuf> {
    if backup.eq_ignore_ascii_case("latest") {
        return manager
            .get_latest_backup()?
            .map(|b| b.path)
            .ok_or_else(|| RecordsError::NotFound {
                entity_type: "Backup",
                identifier: "latest".to_string(),
            });
    }

    let path = PathBuf::from(backup);
    if path.exists() {
        return Ok(path);
    }

    let in_backup_dir = manager.backup_dir().join(backup);
    if in_backup_dir.exists() {
        return Ok(in_backup_dir);
    }

    let with_ext = manager.backup_dir().join(format!("{}.json", backup));
    if with_ext.exists() {
        return Ok(with_ext);
    }

    Err(RecordsError::NotFound {
        entity_type: "Backup",
        identifier: backup.to_string(),
    })
}

/// Format a duration in human-readable form
fn format_duration(duration: chrono::Duration) -> String {
    let total_seconds = duration.num_seconds().max(0);

    if total_seconds < 60 {
        return format!("{}s", total_seconds);
    }

    let minutes = total_seconds / 60;
    if minutes < 60 {
        return format!("{}m", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }

    format!("{}d", hours / 24)
}

/// Format a byte count in human-readable form
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
