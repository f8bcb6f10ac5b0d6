//! Student display formatting
//!
//! Formats students for terminal output in table and detail views.

use chrono::NaiveDate;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Student;

#[derive(Tabled)]
struct StudentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Major")]
    major: String,
    #[tabled(rename = "GPA")]
    gpa: String,
    #[tabled(rename = "Courses")]
    courses: usize,
    #[tabled(rename = "Age")]
    age: u32,
}

impl StudentRow {
    fn new(student: &Student, today: NaiveDate) -> Self {
        Self {
            id: student.student_id().to_string(),
            name: student.full_name(),
            major: display_major(student),
            gpa: format!("{:.2}", student.gpa()),
            courses: student.courses().len(),
            age: student.age_on(today),
        }
    }
}

#[derive(Tabled)]
struct RankedRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(inline)]
    student: StudentRow,
}

/// Format a list of students as a table
pub fn format_student_list(students: &[Student], today: NaiveDate) -> String {
    if students.is_empty() {
        return "No students found.".to_string();
    }

    let rows = students.iter().map(|s| StudentRow::new(s, today));
    let mut table = Table::new(rows);
    table.with(Style::sharp());

    format!("{}\n{} student(s)", table, students.len())
}

/// Format students with their rank, best first
pub fn format_ranked_list(students: &[Student], today: NaiveDate) -> String {
    if students.is_empty() {
        return "No students found.".to_string();
    }

    let rows = students.iter().enumerate().map(|(i, s)| RankedRow {
        rank: i + 1,
        student: StudentRow::new(s, today),
    });
    let mut table = Table::new(rows);
    table.with(Style::sharp());
    table.to_string()
}

/// Format a single student's details
pub fn format_student_details(student: &Student, today: NaiveDate) -> String {
    let mut output = String::new();

    output.push_str(&format!("Student: {}\n", student.full_name()));
    output.push_str(&format!("  ID:             {}\n", student.student_id()));
    output.push_str(&format!("  Email:          {}\n", student.email()));
    output.push_str(&format!("  Phone:          {}\n", student.phone()));
    output.push_str(&format!(
        "  Date of Birth:  {} (age {})\n",
        student.date_of_birth(),
        student.age_on(today)
    ));
    if !student.address().is_empty() {
        output.push_str(&format!("  Address:        {}\n", student.address()));
    }
    output.push_str(&format!("  Major:          {}\n", display_major(student)));
    output.push_str(&format!("  Enrolled:       {}\n", student.enrollment_date()));
    output.push_str(&format!("  GPA:            {:.2}\n", student.gpa()));

    if student.courses().is_empty() {
        output.push_str("  Courses:        (none)\n");
    } else {
        output.push_str(&format!("  Courses:        {}\n", student.courses().len()));
        for course in student.courses() {
            match student.grade(course) {
                Some(grade) => output.push_str(&format!("    - {:<30} {:.2}\n", course, grade)),
                None => output.push_str(&format!("    - {}\n", course)),
            }
        }
    }

    output
}

fn display_major(student: &Student) -> String {
    if student.major().is_empty() {
        "-".to_string()
    } else {
        student.major().to_string()
    }
}
