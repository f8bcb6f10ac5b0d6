//! Academic transcript for a single student

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Student, StudentId};

/// One course line on a transcript
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptLine {
    pub course: String,
    /// `None` while the course is in progress
    pub grade: Option<f64>,
}

/// A student's courses and grades with summary totals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transcript {
    pub student_id: StudentId,
    pub name: String,
    pub major: String,
    pub enrollment_date: NaiveDate,
    pub courses: Vec<TranscriptLine>,
    pub gpa: f64,
    pub total_courses: usize,
    pub completed_courses: usize,
}

impl Transcript {
    pub fn for_student(student: &Student) -> Self {
        let courses: Vec<TranscriptLine> = student
            .courses()
            .iter()
            .map(|course| TranscriptLine {
                course: course.clone(),
                grade: student.grade(course),
            })
            .collect();

        Self {
            student_id: student.student_id().clone(),
            name: student.full_name(),
            major: student.major().to_string(),
            enrollment_date: student.enrollment_date(),
            total_courses: courses.len(),
            completed_courses: student.completed_courses(),
            courses,
            gpa: student.gpa(),
        }
    }

    /// Courses still waiting for a grade
    pub fn in_progress(&self) -> impl Iterator<Item = &TranscriptLine> {
        self.courses.iter().filter(|line| line.grade.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::student::tests::sample_fields;

    #[test]
    fn test_transcript_lines_and_totals() {
        let enrolled = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
        let mut student = Student::create_on(&sample_fields("STU001"), enrolled).unwrap();
        student.add_course("Biology").unwrap();
        student.add_course("Algebra").unwrap();
        student.add_course("Chemistry").unwrap();
        student.add_grade("Algebra", 4.0).unwrap();
        student.add_grade("Biology", 3.0).unwrap();

        let transcript = Transcript::for_student(&student);
        assert_eq!(transcript.student_id.as_str(), "STU001");
        assert_eq!(transcript.name, "Ada Lovelace");
        assert_eq!(transcript.enrollment_date, enrolled);
        assert_eq!(transcript.total_courses, 3);
        assert_eq!(transcript.completed_courses, 2);
        assert!((transcript.gpa - 3.5).abs() < 1e-9);

        let courses: Vec<&str> = transcript.courses.iter().map(|l| l.course.as_str()).collect();
        assert_eq!(courses, vec!["Algebra", "Biology", "Chemistry"]);

        let pending: Vec<&str> = transcript.in_progress().map(|l| l.course.as_str()).collect();
        assert_eq!(pending, vec!["Chemistry"]);
    }

    #[test]
    fn test_empty_transcript() {
        let student = Student::create(&sample_fields("STU001")).unwrap();
        let transcript = Transcript::for_student(&student);

        assert!(transcript.courses.is_empty());
        assert_eq!(transcript.gpa, 0.0);
        assert_eq!(transcript.completed_courses, 0);
    }
}
