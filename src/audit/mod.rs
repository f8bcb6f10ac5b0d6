//! Audit logging for student-records
//!
//! Records every create, update and delete of a student with before/after
//! snapshots in an append-only JSONL log.
//!
//! - `AuditEntry`: one logged operation
//! - `AuditLogger`: appends entries to and reads them back from `audit.log`
//! - `generate_diff`: summarizes the change between two snapshots

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
