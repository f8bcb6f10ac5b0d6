//! CSV export of the student collection
//!
//! One row per student. `gpa` and `age` are derived columns; courses are
//! joined into a single field with the configured delimiter.

use std::io::Write;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::error::{RecordsError, RecordsResult};
use crate::models::Student;

/// Column order of exported files
pub const CSV_COLUMNS: [&str; 12] = [
    "student_id",
    "first_name",
    "last_name",
    "email",
    "phone",
    "date_of_birth",
    "address",
    "major",
    "gpa",
    "enrollment_date",
    "courses",
    "age",
];

/// Columns an imported file must provide
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "student_id",
    "first_name",
    "last_name",
    "email",
    "phone",
    "date_of_birth",
];

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    student_id: &'a str,
    first_name: &'a str,
    last_name: &'a str,
    email: &'a str,
    phone: &'a str,
    date_of_birth: String,
    address: &'a str,
    major: &'a str,
    gpa: String,
    enrollment_date: String,
    courses: String,
    age: u32,
}

/// Write `students` as CSV, returning the number of rows written
pub fn export_students_csv<W: Write>(
    students: &[Student],
    writer: W,
    course_delimiter: char,
    today: NaiveDate,
) -> RecordsResult<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let separator = course_delimiter.to_string();

    // serde only emits the header with the first row
    if students.is_empty() {
        csv_writer.write_record(CSV_COLUMNS).map_err(export_error)?;
    }

    for student in students {
        let courses: Vec<&str> = student.courses().iter().map(String::as_str).collect();
        csv_writer
            .serialize(ExportRow {
                student_id: student.student_id().as_str(),
                first_name: student.first_name(),
                last_name: student.last_name(),
                email: student.email(),
                phone: student.phone(),
                date_of_birth: student.date_of_birth().to_string(),
                address: student.address(),
                major: student.major(),
                gpa: format!("{:.2}", student.gpa()),
                enrollment_date: student.enrollment_date().to_string(),
                courses: courses.join(&separator),
                age: student.age_on(today),
            })
            .map_err(export_error)?;
    }

    csv_writer
        .flush()
        .map_err(|e| RecordsError::Export(e.to_string()))?;

    Ok(students.len())
}

/// Default file name for an export taken at `now`
pub fn default_export_filename(now: NaiveDateTime) -> String {
    format!("students_export_{}.csv", now.format("%Y%m%d_%H%M%S"))
}

fn export_error(e: csv::Error) -> RecordsError {
    RecordsError::Export(e.to_string())
}
