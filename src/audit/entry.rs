//! Audit entry data structures

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::StudentRecord;

use super::diff::generate_diff;

/// Kind of change made to a student
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "CREATE",
            Operation::Update => "UPDATE",
            Operation::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of the audit log
///
/// Course and grade changes are recorded as updates of the owning student,
/// with the affected course showing up in `changes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the change was made (UTC)
    pub timestamp: DateTime<Utc>,
    pub operation: Operation,
    pub student_id: String,
    /// Full name at the time of the change
    pub student_name: String,
    /// Record before the change (updates and deletes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<Value>,
    /// Record after the change (creates and updates)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<Value>,
    /// Field-level summary of an update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes: Option<String>,
}

impl AuditEntry {
    fn new(operation: Operation, record: &StudentRecord) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            student_id: record.student_id.clone(),
            student_name: format!("{} {}", record.first_name, record.last_name),
            before: None,
            after: None,
            changes: None,
        }
    }

    /// Entry for a newly added student
    pub fn student_created(record: &StudentRecord) -> Self {
        Self {
            after: snapshot(record),
            ..Self::new(Operation::Create, record)
        }
    }

    /// Entry for a changed student, with a diff of the two snapshots
    pub fn student_updated(before: &StudentRecord, after: &StudentRecord) -> Self {
        let before_value = snapshot(before);
        let after_value = snapshot(after);
        let changes = match (&before_value, &after_value) {
            (Some(b), Some(a)) => generate_diff(b, a),
            _ => None,
        };

        Self {
            before: before_value,
            after: after_value,
            changes,
            ..Self::new(Operation::Update, after)
        }
    }

    /// Entry for a removed student
    pub fn student_deleted(record: &StudentRecord) -> Self {
        Self {
            before: snapshot(record),
            ..Self::new(Operation::Delete, record)
        }
    }

    /// One-line description, plus the changes on a second line for updates
    pub fn describe(&self) -> String {
        let mut output = format!(
            "[{}] {} {} ({})",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.student_id,
            self.student_name
        );

        if let Some(changes) = &self.changes {
            output.push_str("\n  Changes: ");
            output.push_str(changes);
        }

        output
    }
}

fn snapshot(record: &StudentRecord) -> Option<Value> {
    serde_json::to_value(record).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::student::tests::sample_fields;
    use crate::models::Student;

    fn record() -> StudentRecord {
        Student::create(&sample_fields("STU001")).unwrap().to_record()
    }

    #[test]
    fn test_created_entry() {
        let entry = AuditEntry::student_created(&record());

        assert_eq!(entry.operation, Operation::Create);
        assert_eq!(entry.student_id, "STU001");
        assert_eq!(entry.student_name, "Ada Lovelace");
        assert!(entry.before.is_none());
        assert_eq!(entry.after.unwrap()["major"], "Mathematics");
    }

    #[test]
    fn test_updated_entry_diffs_snapshots() {
        let before = record();
        let mut after = before.clone();
        after.major = "Physics".into();

        let entry = AuditEntry::student_updated(&before, &after);

        assert_eq!(entry.operation, Operation::Update);
        assert_eq!(entry.before.unwrap()["major"], "Mathematics");
        assert_eq!(entry.after.unwrap()["major"], "Physics");
        assert_eq!(
            entry.changes.as_deref(),
            Some("major: \"Mathematics\" -> \"Physics\"")
        );
    }

    #[test]
    fn test_unchanged_update_has_no_changes() {
        let entry = AuditEntry::student_updated(&record(), &record());
        assert!(entry.changes.is_none());
    }

    #[test]
    fn test_deleted_entry() {
        let entry = AuditEntry::student_deleted(&record());

        assert_eq!(entry.operation, Operation::Delete);
        assert!(entry.before.is_some());
        assert!(entry.after.is_none());
    }

    #[test]
    fn test_serialized_shape() {
        let value = serde_json::to_value(AuditEntry::student_created(&record())).unwrap();

        assert_eq!(value["operation"], "create");
        assert_eq!(value["student_id"], "STU001");
        assert!(value.get("before").is_none());
        assert!(value.get("changes").is_none());
    }

    #[test]
    fn test_describe() {
        let before = record();
        let mut after = before.clone();
        after.phone = "555-000-1111".into();

        let text = AuditEntry::student_updated(&before, &after).describe();
        assert!(text.contains("UPDATE STU001 (Ada Lovelace)"));
        assert!(text.contains("\n  Changes: phone: \"555-123-4567\" -> \"555-000-1111\""));
    }
}
