//! JSON file helpers
//!
//! Reads report unparseable files as `CorruptData` so callers can offer a
//! restore. Writes go through a synced sibling temp file and a rename, so the
//! target is either the old contents or the new ones.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{RecordsError, RecordsResult};

/// Read a JSON file, or return `T::default()` when it does not exist yet
pub fn read_json<T, P>(path: P) -> RecordsResult<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.exists() {
        read_json_required(path)
    } else {
        Ok(T::default())
    }
}

/// Read a JSON file that must exist
pub fn read_json_required<T, P>(path: P) -> RecordsResult<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        RecordsError::Storage(format!("Cannot open {}: {}", path.display(), e))
    })?;

    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| RecordsError::corrupt(path, e.to_string()))
}

/// Pretty-print `data` to `path`, replacing it atomically
pub fn write_json_atomic<T, P>(path: P, data: &T) -> RecordsResult<()>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            RecordsError::Storage(format!("Cannot create {}: {}", parent.display(), e))
        })?;
    }

    let temp_path = temp_sibling(path);
    let written = write_synced(&temp_path, data).and_then(|()| {
        fs::rename(&temp_path, path).map_err(|e| {
            RecordsError::Storage(format!("Cannot replace {}: {}", path.display(), e))
        })
    });

    if written.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    written
}

/// `students.json` -> `students.json.tmp`, in the same directory
pub(crate) fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_synced<T: Serialize + ?Sized>(path: &Path, data: &T) -> RecordsResult<()> {
    let storage_err = |what: &str, e: &dyn std::fmt::Display| {
        RecordsError::Storage(format!("{} {}: {}", what, path.display(), e))
    };

    let file = File::create(path).map_err(|e| storage_err("Cannot create", &e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| storage_err("Cannot serialize into", &e))?;
    writer.flush().map_err(|e| storage_err("Cannot flush", &e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| storage_err("Cannot sync", &e))
}
