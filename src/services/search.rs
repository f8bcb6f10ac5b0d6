//! Student search
//!
//! Filters combine with AND. Text filters are case-insensitive substring
//! tests and numeric bounds are inclusive.

use chrono::NaiveDate;

use crate::models::Student;

/// Optional filters for a student search
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchCriteria {
    /// Substring of the full name
    pub name_substring: Option<String>,
    /// Substring of the major
    pub major: Option<String>,
    pub email_substring: Option<String>,
    pub min_gpa: Option<f64>,
    pub max_gpa: Option<f64>,
    pub min_age: Option<u32>,
    pub max_age: Option<u32>,
}

impl SearchCriteria {
    /// Criteria matching only on major
    pub fn by_major(major: impl Into<String>) -> Self {
        Self {
            major: Some(major.into()),
            ..Self::default()
        }
    }

    /// Check whether no filter is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Check a single student against every supplied filter
    pub fn matches(&self, student: &Student, today: NaiveDate) -> bool {
        if let Some(needle) = &self.name_substring {
            if !contains_ignore_case(&student.full_name(), needle) {
                return false;
            }
        }

        if let Some(needle) = &self.major {
            if !contains_ignore_case(student.major(), needle) {
                return false;
            }
        }

        if let Some(needle) = &self.email_substring {
            if !contains_ignore_case(student.email(), needle) {
                return false;
            }
        }

        let gpa = student.gpa();
        if self.min_gpa.is_some_and(|min| gpa < min) || self.max_gpa.is_some_and(|max| gpa > max) {
            return false;
        }

        if self.min_age.is_some() || self.max_age.is_some() {
            let age = student.age_on(today);
            if self.min_age.is_some_and(|min| age < min) || self.max_age.is_some_and(|max| age > max)
            {
                return false;
            }
        }

        true
    }
}

/// Students matching `criteria`, in their original order
pub fn search<'a>(
    students: &'a [Student],
    criteria: &SearchCriteria,
    today: NaiveDate,
) -> Vec<&'a Student> {
    students
        .iter()
        .filter(|s| criteria.matches(s, today))
        .collect()
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack
        .to_lowercase()
        .contains(needle.trim().to_lowercase().as_str())
}
