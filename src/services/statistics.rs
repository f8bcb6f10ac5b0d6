//! Aggregate reports over the student collection

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;

use crate::models::Student;

/// Label used for students without a major
pub const UNDECLARED_MAJOR: &str = "Undeclared";

/// Age ranges used in the statistics histogram
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AgeBracket {
    Under18,
    From18To20,
    From21To25,
    From26To30,
    Over30,
}

impl AgeBracket {
    /// All brackets, youngest first
    pub fn all() -> &'static [AgeBracket] {
        &[
            AgeBracket::Under18,
            AgeBracket::From18To20,
            AgeBracket::From21To25,
            AgeBracket::From26To30,
            AgeBracket::Over30,
        ]
    }

    pub fn for_age(age: u32) -> Self {
        match age {
            0..=17 => AgeBracket::Under18,
            18..=20 => AgeBracket::From18To20,
            21..=25 => AgeBracket::From21To25,
            26..=30 => AgeBracket::From26To30,
            _ => AgeBracket::Over30,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeBracket::Under18 => "Under 18",
            AgeBracket::From18To20 => "18-20",
            AgeBracket::From21To25 => "21-25",
            AgeBracket::From26To30 => "26-30",
            AgeBracket::Over30 => "Over 30",
        }
    }
}

impl fmt::Display for AgeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Summary numbers for the whole collection
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    pub total_students: usize,
    /// Mean GPA over all students, 0.0 for an empty collection
    pub average_gpa: f64,
    /// Student count per major
    pub majors: BTreeMap<String, usize>,
    /// Student count per age bracket; every bracket is present
    pub age_distribution: BTreeMap<AgeBracket, usize>,
    /// Number of students with at least one graded course
    pub graded_students: usize,
    pub total_enrollments: usize,
}

impl Statistics {
    pub fn compute(students: &[Student], today: NaiveDate) -> Self {
        let total_students = students.len();
        let average_gpa = if total_students == 0 {
            0.0
        } else {
            students.iter().map(Student::gpa).sum::<f64>() / total_students as f64
        };

        let mut majors = BTreeMap::new();
        let mut age_distribution: BTreeMap<AgeBracket, usize> =
            AgeBracket::all().iter().map(|b| (*b, 0)).collect();

        for student in students {
            let major = if student.major().is_empty() {
                UNDECLARED_MAJOR
            } else {
                student.major()
            };
            *majors.entry(major.to_string()).or_insert(0) += 1;
            *age_distribution
                .entry(AgeBracket::for_age(student.age_on(today)))
                .or_insert(0) += 1;
        }

        Self {
            total_students,
            average_gpa,
            majors,
            age_distribution,
            graded_students: students.iter().filter(|s| !s.grades().is_empty()).count(),
            total_enrollments: students.iter().map(|s| s.courses().len()).sum(),
        }
    }
}

/// The `n` highest-GPA students, ties broken by student ID ascending
pub fn top_students(students: &[Student], n: usize) -> Vec<&Student> {
    let mut ranked: Vec<&Student> = students.iter().collect();
    ranked.sort_by(|a, b| {
        b.gpa()
            .partial_cmp(&a.gpa())
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.student_id().cmp(b.student_id()))
    });
    ranked.truncate(n);
    ranked
}

/// Students whose GPA is strictly below `threshold`, in stored order
pub fn at_risk_students(students: &[Student], threshold: f64) -> Vec<&Student> {
    students.iter().filter(|s| s.gpa() < threshold).collect()
}
