//! Student manager
//!
//! Holds the in-memory collection for a session and keeps it in step with the
//! data file. Every mutation is applied in memory, saved, and rolled back if
//! the save fails.

use std::collections::HashSet;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::config::paths::RecordsPaths;
use crate::config::settings::Settings;
use crate::error::{RecordsError, RecordsResult};
use crate::export::export_students_csv;
use crate::models::{NewStudent, Student, StudentId, StudentUpdate};
use crate::storage::Storage;

use super::import::{parse_students_csv, reject, ImportReport};
use super::search::{search, SearchCriteria};
use super::statistics::{at_risk_students, top_students, Statistics};
use super::transcript::Transcript;

/// Coordinates all student operations against one data directory
pub struct StudentManager {
    storage: Storage,
    settings: Settings,
    students: Vec<Student>,
    /// IDs deleted during this session; they cannot be reused until reload
    retired: HashSet<StudentId>,
}

impl StudentManager {
    /// Open the data directory, loading settings and students
    pub fn open(paths: RecordsPaths) -> RecordsResult<Self> {
        let settings = Settings::load_or_create(&paths)?;
        let storage = Storage::new(paths)?.with_audit(settings.audit_enabled);
        Self::with_storage(storage, settings)
    }

    /// Build a manager over an existing storage
    pub fn with_storage(storage: Storage, settings: Settings) -> RecordsResult<Self> {
        let students = storage.load_students()?;
        Ok(Self {
            storage,
            settings,
            students,
            retired: HashSet::new(),
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Add a new student
    pub fn add_student(&mut self, fields: &NewStudent) -> RecordsResult<Student> {
        let student = Student::create(fields)?;
        self.ensure_available(student.student_id())?;

        self.students.push(student.clone());
        if let Err(e) = self.storage.save_students(&self.students) {
            self.students.pop();
            return Err(e);
        }

        self.storage.log_create(&student);
        Ok(student)
    }

    /// Get a student by ID (case-insensitive)
    pub fn get_student(&self, id: &str) -> RecordsResult<Student> {
        let index = self.position(id)?;
        Ok(self.students[index].clone())
    }

    /// All students, in stored order
    pub fn list_students(&self) -> Vec<Student> {
        self.students.clone()
    }

    /// Apply a partial update to a student
    pub fn update_student(&mut self, id: &str, fields: &StudentUpdate) -> RecordsResult<Student> {
        if fields.is_empty() {
            return Err(RecordsError::Validation("No fields to update".into()));
        }
        self.modify(id, |student| student.update(fields))
    }

    /// Delete a student
    ///
    /// The ID stays reserved for the rest of the session.
    pub fn delete_student(&mut self, id: &str) -> RecordsResult<Student> {
        let index = self.position(id)?;
        let removed = self.students.remove(index);

        if let Err(e) = self.storage.save_students(&self.students) {
            self.students.insert(index, removed);
            return Err(e);
        }

        self.retired.insert(removed.student_id().clone());
        self.storage.log_delete(&removed);
        Ok(removed)
    }

    /// Enroll a student in a course
    ///
    /// The configured CSV course delimiter is refused in names as well.
    pub fn add_course(&mut self, id: &str, course: &str) -> RecordsResult<Student> {
        let delimiter = self.settings.course_delimiter;
        if course.contains(delimiter) {
            return Err(RecordsError::Validation(format!(
                "Course name cannot contain '{}': {}",
                delimiter,
                course.trim()
            )));
        }
        self.modify(id, |student| student.add_course(course))
    }

    /// Drop a course; its grade, if any, is removed too
    pub fn remove_course(&mut self, id: &str, course: &str) -> RecordsResult<Student> {
        self.modify(id, |student| student.remove_course(course))
    }

    pub fn add_grade(&mut self, id: &str, course: &str, grade: f64) -> RecordsResult<Student> {
        self.modify(id, |student| student.add_grade(course, grade))
    }

    pub fn remove_grade(&mut self, id: &str, course: &str) -> RecordsResult<Student> {
        self.modify(id, |student| student.remove_grade(course))
    }

    /// Students matching every supplied criterion, in stored order
    pub fn search(&self, criteria: &SearchCriteria) -> Vec<Student> {
        search(&self.students, criteria, today())
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn students_by_major(&self, major: &str) -> Vec<Student> {
        self.search(&SearchCriteria::by_major(major))
    }

    pub fn statistics(&self) -> Statistics {
        Statistics::compute(&self.students, today())
    }

    /// The `n` students with the highest GPA
    pub fn top_students(&self, n: usize) -> Vec<Student> {
        top_students(&self.students, n).into_iter().cloned().collect()
    }

    /// Students below the configured at-risk threshold
    pub fn at_risk_students(&self) -> Vec<Student> {
        at_risk_students(&self.students, self.settings.at_risk_threshold)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn transcript(&self, id: &str) -> RecordsResult<Transcript> {
        let index = self.position(id)?;
        Ok(Transcript::for_student(&self.students[index]))
    }

    /// Every problem that would stop `add_student`, without changing anything
    pub fn validate_student_data(&self, fields: &NewStudent) -> Vec<String> {
        let mut problems = fields.validation_errors(today());

        if let Ok(id) = StudentId::parse(&fields.student_id) {
            if let Err(e) = self.ensure_available(&id) {
                problems.push(e.to_string());
            }
        }

        problems
    }

    /// Re-read the data file, discarding in-memory state
    pub fn reload(&mut self) -> RecordsResult<()> {
        self.students = self.storage.load_students()?;
        self.retired.clear();
        debug!(count = self.students.len(), "reloaded students");
        Ok(())
    }

    /// Write all students to a CSV file
    pub fn export_csv(&self, path: &Path) -> RecordsResult<usize> {
        let file = File::create(path).map_err(|e| {
            RecordsError::Export(format!("Failed to create {}: {}", path.display(), e))
        })?;

        export_students_csv(
            &self.students,
            BufWriter::new(file),
            self.settings.course_delimiter,
            today(),
        )
    }

    /// Add students from a CSV file
    ///
    /// Invalid rows and rows whose ID is already taken are reported and
    /// skipped. All accepted rows are saved together.
    pub fn import_csv(&mut self, path: &Path) -> RecordsResult<ImportReport> {
        let file = File::open(path).map_err(|e| {
            RecordsError::Import(format!("Failed to open {}: {}", path.display(), e))
        })?;

        let mut report = ImportReport::default();

        for (line, parsed) in parse_students_csv(file, self.settings.course_delimiter)? {
            let student = match parsed {
                Ok(student) => student,
                Err(reason) => {
                    reject(&mut report, line, reason);
                    continue;
                }
            };

            let taken_in_batch = report
                .succeeded
                .iter()
                .any(|s| s.student_id() == student.student_id());
            let available = if taken_in_batch {
                Err(RecordsError::duplicate_student(student.student_id().as_str()))
            } else {
                self.ensure_available(student.student_id())
            };

            match available {
                Ok(()) => report.succeeded.push(student),
                Err(e) => reject(&mut report, line, e.to_string()),
            }
        }

        if report.succeeded.is_empty() {
            return Ok(report);
        }

        let original_len = self.students.len();
        self.students.extend(report.succeeded.iter().cloned());
        if let Err(e) = self.storage.save_students(&self.students) {
            self.students.truncate(original_len);
            return Err(e);
        }

        self.storage.log_create_batch(&report.succeeded);
        Ok(report)
    }

    fn position(&self, id: &str) -> RecordsResult<usize> {
        self.students
            .iter()
            .position(|s| s.student_id().matches(id))
            .ok_or_else(|| RecordsError::student_not_found(id.trim().to_uppercase()))
    }

    fn ensure_available(&self, id: &StudentId) -> RecordsResult<()> {
        if self.retired.contains(id) || self.students.iter().any(|s| s.student_id() == id) {
            return Err(RecordsError::duplicate_student(id.as_str()));
        }
        Ok(())
    }

    fn modify<T>(
        &mut self,
        id: &str,
        change: impl FnOnce(&mut Student) -> RecordsResult<T>,
    ) -> RecordsResult<Student> {
        let index = self.position(id)?;
        let before = self.students[index].clone();

        change(&mut self.students[index])?;

        if let Err(e) = self.storage.save_students(&self.students) {
            self.students[index] = before;
            return Err(e);
        }

        let after = self.students[index].clone();
        self.storage.log_update(&before.to_record(), &after);
        Ok(after)
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
