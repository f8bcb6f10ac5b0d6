//! CSV import of students
//!
//! Rows are read by header name, so column order does not matter. Each row is
//! validated on its own and failures are collected per row instead of
//! aborting the file.

use std::io::Read;

use serde::Deserialize;
use tracing::warn;

use crate::error::{RecordsError, RecordsResult};
use crate::export::REQUIRED_COLUMNS;
use crate::models::validation::COURSE_SEPARATORS;
use crate::models::{Student, StudentRecord};

/// Outcome of an import
#[derive(Debug, Default)]
pub struct ImportReport {
    /// Students that were added
    pub succeeded: Vec<Student>,
    /// Line number in the file and reason for each rejected row
    pub failed: Vec<(usize, String)>,
}

impl ImportReport {
    pub fn summary(&self) -> String {
        let mut message = format!("Imported {} student(s)", self.succeeded.len());
        if !self.failed.is_empty() {
            message.push_str(&format!(", {} row(s) failed", self.failed.len()));
        }
        message
    }
}

/// A student row as it appears in a CSV file
///
/// `gpa` and `age` columns are ignored; GPA is derived from grades.
#[derive(Debug, Deserialize)]
struct CsvRow {
    student_id: String,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    date_of_birth: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    major: String,
    #[serde(default)]
    enrollment_date: Option<String>,
    #[serde(default)]
    courses: String,
}

impl CsvRow {
    fn into_record(self, course_delimiter: char) -> StudentRecord {
        let courses = self
            .courses
            .split(|c: char| c == course_delimiter || COURSE_SEPARATORS.contains(&c))
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();

        StudentRecord {
            student_id: self.student_id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            date_of_birth: self.date_of_birth,
            address: self.address,
            major: self.major,
            gpa: 0.0,
            enrollment_date: self.enrollment_date.filter(|d| !d.trim().is_empty()),
            courses,
            grades: Default::default(),
        }
    }
}

/// Parse CSV data into validated students
///
/// Returns one entry per data row, tagged with its line number. Only a
/// missing required column fails the whole file.
pub fn parse_students_csv<R: Read>(
    reader: R,
    course_delimiter: char,
) -> RecordsResult<Vec<(usize, Result<Student, String>)>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| RecordsError::Import(format!("Failed to read CSV header: {}", e)))?
        .clone();

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|h| h == *column))
        .collect();
    if !missing.is_empty() {
        return Err(RecordsError::Import(format!(
            "Missing required column(s): {}",
            missing.join(", ")
        )));
    }

    let mut rows = Vec::new();
    for (index, result) in csv_reader.records().enumerate() {
        // Header is line 1
        let fallback_line = index + 2;

        let record = match result {
            Ok(record) => record,
            Err(e) => {
                rows.push((fallback_line, Err(format!("Error reading CSV record: {}", e))));
                continue;
            }
        };

        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(fallback_line);

        let parsed = record
            .deserialize::<CsvRow>(Some(&headers))
            .map_err(|e| format!("Malformed row: {}", e))
            .and_then(|row| {
                Student::from_record(&row.into_record(course_delimiter))
                    .map_err(RecordsError::into_reason)
            });

        rows.push((line, parsed));
    }

    Ok(rows)
}

/// Record a rejected row in the report
pub(crate) fn reject(report: &mut ImportReport, line: usize, reason: String) {
    warn!(line, %reason, "skipping CSV row");
    report.failed.push((line, reason));
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "student_id,first_name,last_name,email,phone,date_of_birth,address,major,gpa,enrollment_date,courses,age";

    fn parse(body: &str) -> Vec<(usize, Result<Student, String>)> {
        let data = format!("{}\n{}", HEADER, body);
        parse_students_csv(data.as_bytes(), ';').unwrap()
    }

    #[test]
    fn test_valid_row() {
        let rows = parse(
            "stu001,ada,lovelace,ada@example.com,555-123-4567,2003-12-10,London,Mathematics,3.9,2024-09-01,\"Algebra; Biology,Chemistry\",21\n",
        );

        assert_eq!(rows.len(), 1);
        let (line, student) = &rows[0];
        assert_eq!(*line, 2);

        let student = student.as_ref().unwrap();
        assert_eq!(student.student_id().as_str(), "STU001");
        assert_eq!(student.full_name(), "Ada Lovelace");
        assert_eq!(student.enrollment_date().to_string(), "2024-09-01");
        assert_eq!(student.courses().len(), 3);
        // GPA in the file is ignored
        assert_eq!(student.gpa(), 0.0);
    }

    #[test]
    fn test_bad_rows_are_isolated() {
        let rows = parse(
            "STU001,Ada,Lovelace,not-an-email,555-123-4567,2003-12-10,,,,,,\n\
             STU002,Grace,Hopper,grace@example.com,555-987-6543,1990-12-09,,,,,,\n\
             STU003,Alan,Turing,alan@example.com,123,1992-06-23,,,,,,\n",
        );

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].0, 2);
        assert!(rows[0].1.as_ref().unwrap_err().contains("Invalid email format"));
        assert!(rows[1].1.is_ok());
        assert_eq!(rows[2].0, 4);
        assert!(rows[2].1.as_ref().unwrap_err().contains("Phone number"));
    }

    #[test]
    fn test_columns_read_by_name() {
        let data = "email,student_id,first_name,last_name,date_of_birth,phone\n\
                    ada@example.com,STU001,Ada,Lovelace,2003-12-10,5551234567\n";

        let rows = parse_students_csv(data.as_bytes(), ';').unwrap();
        let student = rows[0].1.as_ref().unwrap();
        assert_eq!(student.email(), "ada@example.com");
        assert!(student.courses().is_empty());
    }

    #[test]
    fn test_missing_required_column() {
        let data = "student_id,first_name,last_name\nSTU001,Ada,Lovelace\n";

        let err = parse_students_csv(data.as_bytes(), ';').unwrap_err();
        assert!(err.to_string().contains("email"));
        assert!(err.to_string().contains("date_of_birth"));
    }

    #[test]
    fn test_invalid_enrollment_date_fails_row() {
        let rows = parse(
            "STU001,Ada,Lovelace,ada@example.com,555-123-4567,2003-12-10,,,,09/01/2024,,\n",
        );
        assert!(rows[0].1.as_ref().unwrap_err().contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_configured_delimiter() {
        let data = format!(
            "{}\nSTU001,Ada,Lovelace,ada@example.com,555-123-4567,2003-12-10,,,,,Algebra|Biology;Chemistry,\n",
            HEADER
        );

        let rows = parse_students_csv(data.as_bytes(), '|').unwrap();
        let student = rows[0].1.as_ref().unwrap();
        assert_eq!(student.courses().len(), 3);
        assert!(student.is_enrolled("Biology"));
    }

    #[test]
    fn test_report_summary() {
        let mut report = ImportReport::default();
        assert_eq!(report.summary(), "Imported 0 student(s)");

        reject(&mut report, 3, "bad".to_string());
        assert_eq!(report.summary(), "Imported 0 student(s), 1 row(s) failed");
    }
}
