//! Student model
//!
//! A student profile with contact details, course enrollment and grades.
//! GPA is derived from the grades and recomputed on every change; it cannot
//! be set directly.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::ids::StudentId;
use super::validation::{
    validate_birth_date, validate_course_name, validate_date, validate_email,
    validate_gpa_value, validate_name, validate_phone, validate_student_id,
};
use crate::error::{RecordsError, RecordsResult};

/// Raw input for creating a student
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewStudent {
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    /// Date of birth in `YYYY-MM-DD` form
    pub date_of_birth: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub major: String,
}

impl NewStudent {
    /// Collect every validation problem instead of stopping at the first
    pub fn validation_errors(&self, today: NaiveDate) -> Vec<String> {
        let checks = [
            validate_student_id(&self.student_id).err(),
            validate_name(&self.first_name, "First name").err(),
            validate_name(&self.last_name, "Last name").err(),
            validate_email(&self.email).err(),
            validate_phone(&self.phone).err(),
            validate_birth_date(&self.date_of_birth, today).err(),
        ];

        checks.into_iter().flatten().map(RecordsError::into_reason).collect()
    }
}

/// Partial update of a student's editable fields
///
/// Only `Some` fields are applied. The student ID and enrollment date are
/// intentionally absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<String>,
    pub address: Option<String>,
    pub major: Option<String>,
}

impl StudentUpdate {
    /// Check whether the update changes nothing
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.date_of_birth.is_none()
            && self.address.is_none()
            && self.major.is_none()
    }
}

/// Flat, persistable form of a student
///
/// This is the shape written to `students.json`. `gpa` is written for
/// readers of the file and ignored when loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub major: String,
    #[serde(default)]
    pub gpa: f64,
    #[serde(default)]
    pub enrollment_date: Option<String>,
    #[serde(default)]
    pub courses: Vec<String>,
    #[serde(default)]
    pub grades: BTreeMap<String, f64>,
}

/// A student with personal and academic information
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    student_id: StudentId,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    date_of_birth: NaiveDate,
    address: String,
    major: String,
    courses: BTreeSet<String>,
    grades: BTreeMap<String, f64>,
    gpa: f64,
    enrollment_date: NaiveDate,
}

impl Student {
    /// Create a new student, enrolled today
    pub fn create(fields: &NewStudent) -> RecordsResult<Self> {
        Self::create_on(fields, Local::now().date_naive())
    }

    /// Create a new student with an explicit enrollment date
    ///
    /// Fields are validated in declaration order and the first failure is
    /// returned.
    pub fn create_on(fields: &NewStudent, today: NaiveDate) -> RecordsResult<Self> {
        Ok(Self {
            student_id: StudentId::parse(&fields.student_id)?,
            first_name: validate_name(&fields.first_name, "First name")?,
            last_name: validate_name(&fields.last_name, "Last name")?,
            email: validate_email(&fields.email)?,
            phone: validate_phone(&fields.phone)?,
            date_of_birth: validate_birth_date(&fields.date_of_birth, today)?,
            address: fields.address.trim().to_string(),
            major: fields.major.trim().to_string(),
            courses: BTreeSet::new(),
            grades: BTreeMap::new(),
            gpa: 0.0,
            enrollment_date: today,
        })
    }

    pub fn student_id(&self) -> &StudentId {
        &self.student_id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn date_of_birth(&self) -> NaiveDate {
        self.date_of_birth
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn major(&self) -> &str {
        &self.major
    }

    /// Enrolled courses, in name order
    pub fn courses(&self) -> &BTreeSet<String> {
        &self.courses
    }

    /// Recorded grades by course name
    pub fn grades(&self) -> &BTreeMap<String, f64> {
        &self.grades
    }

    /// Mean of all recorded grades, 0.0 when there are none
    pub fn gpa(&self) -> f64 {
        self.gpa
    }

    pub fn enrollment_date(&self) -> NaiveDate {
        self.enrollment_date
    }

    /// Return the student's full name
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Age in whole years as of today
    pub fn age(&self) -> u32 {
        self.age_on(Local::now().date_naive())
    }

    /// Age in whole years as of `today`
    pub fn age_on(&self, today: NaiveDate) -> u32 {
        let dob = self.date_of_birth;
        let mut age = today.year() - dob.year();
        if (today.month(), today.day()) < (dob.month(), dob.day()) {
            age -= 1;
        }
        u32::try_from(age).unwrap_or(0)
    }

    /// Check whether the student is enrolled in a course
    pub fn is_enrolled(&self, course: &str) -> bool {
        self.courses.contains(course.trim())
    }

    /// Get the grade for a course, if one has been recorded
    pub fn grade(&self, course: &str) -> Option<f64> {
        self.grades.get(course.trim()).copied()
    }

    /// Number of courses with a recorded grade
    pub fn completed_courses(&self) -> usize {
        self.grades.len()
    }

    /// Enroll the student in a course
    pub fn add_course(&mut self, name: &str) -> RecordsResult<()> {
        let name = validate_course_name(name)?;
        if self.courses.contains(&name) {
            return Err(RecordsError::Enrollment(format!(
                "{} is already enrolled in '{}'",
                self.student_id, name
            )));
        }
        self.courses.insert(name);
        Ok(())
    }

    /// Drop a course, along with any grade recorded for it
    ///
    /// Returns the removed grade, if there was one.
    pub fn remove_course(&mut self, name: &str) -> RecordsResult<Option<f64>> {
        let name = name.trim();
        if !self.courses.remove(name) {
            return Err(RecordsError::course_not_found(format!(
                "{} (student {})",
                name, self.student_id
            )));
        }
        let removed = self.grades.remove(name);
        self.recompute_gpa();
        Ok(removed)
    }

    /// Record or overwrite the grade for an enrolled course
    ///
    /// Returns the previous grade, if there was one.
    pub fn add_grade(&mut self, course: &str, value: f64) -> RecordsResult<Option<f64>> {
        let course = course.trim();
        if !self.courses.contains(course) {
            return Err(RecordsError::Enrollment(format!(
                "Course '{}' not found in {}'s course list",
                course, self.student_id
            )));
        }
        let value = validate_gpa_value(value)?;
        let previous = self.grades.insert(course.to_string(), value);
        self.recompute_gpa();
        Ok(previous)
    }

    /// Remove the grade for a course, keeping the enrollment
    pub fn remove_grade(&mut self, course: &str) -> RecordsResult<f64> {
        let course = course.trim();
        let removed = self.grades.remove(course).ok_or_else(|| {
            RecordsError::NotFound {
                entity_type: "Grade",
                identifier: format!("{} (student {})", course, self.student_id),
            }
        })?;
        self.recompute_gpa();
        Ok(removed)
    }

    /// Apply a partial update
    ///
    /// Every supplied field is validated before any is written, so a failed
    /// update leaves the student untouched.
    pub fn update(&mut self, fields: &StudentUpdate) -> RecordsResult<()> {
        let today = Local::now().date_naive();

        let first_name = fields
            .first_name
            .as_deref()
            .map(|v| validate_name(v, "First name"))
            .transpose()?;
        let last_name = fields
            .last_name
            .as_deref()
            .map(|v| validate_name(v, "Last name"))
            .transpose()?;
        let email = fields.email.as_deref().map(validate_email).transpose()?;
        let phone = fields.phone.as_deref().map(validate_phone).transpose()?;
        let date_of_birth = fields
            .date_of_birth
            .as_deref()
            .map(|v| validate_birth_date(v, today))
            .transpose()?;

        if let Some(v) = first_name {
            self.first_name = v;
        }
        if let Some(v) = last_name {
            self.last_name = v;
        }
        if let Some(v) = email {
            self.email = v;
        }
        if let Some(v) = phone {
            self.phone = v;
        }
        if let Some(v) = date_of_birth {
            self.date_of_birth = v;
        }
        if let Some(v) = &fields.address {
            self.address = v.trim().to_string();
        }
        if let Some(v) = &fields.major {
            self.major = v.trim().to_string();
        }
        Ok(())
    }

    /// Convert to the flat persisted form
    pub fn to_record(&self) -> StudentRecord {
        StudentRecord {
            student_id: self.student_id.to_string(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            date_of_birth: self.date_of_birth.to_string(),
            address: self.address.clone(),
            major: self.major.clone(),
            gpa: self.gpa,
            enrollment_date: Some(self.enrollment_date.to_string()),
            courses: self.courses.iter().cloned().collect(),
            grades: self.grades.clone(),
        }
    }

    /// Rebuild a student from its persisted form
    ///
    /// All fields are re-validated and the GPA is recomputed from the grades.
    pub fn from_record(record: &StudentRecord) -> RecordsResult<Self> {
        let today = Local::now().date_naive();

        let enrollment_date = match record.enrollment_date.as_deref() {
            Some(date) if !date.trim().is_empty() => validate_date(date)?,
            _ => today,
        };

        let mut courses = BTreeSet::new();
        for course in &record.courses {
            courses.insert(validate_course_name(course)?);
        }

        let mut grades = BTreeMap::new();
        for (course, &value) in &record.grades {
            let course = course.trim();
            if !courses.contains(course) {
                return Err(RecordsError::Enrollment(format!(
                    "Grade recorded for '{}' without enrollment",
                    course
                )));
            }
            grades.insert(course.to_string(), validate_gpa_value(value)?);
        }

        let mut student = Self {
            student_id: StudentId::parse(&record.student_id)?,
            first_name: validate_name(&record.first_name, "First name")?,
            last_name: validate_name(&record.last_name, "Last name")?,
            email: validate_email(&record.email)?,
            phone: validate_phone(&record.phone)?,
            date_of_birth: validate_birth_date(&record.date_of_birth, today)?,
            address: record.address.trim().to_string(),
            major: record.major.trim().to_string(),
            courses,
            grades,
            gpa: 0.0,
            enrollment_date,
        };
        student.recompute_gpa();
        Ok(student)
    }

    fn recompute_gpa(&mut self) {
        self.gpa = if self.grades.is_empty() {
            0.0
        } else {
            self.grades.values().sum::<f64>() / self.grades.len() as f64
        };
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Student(ID: {}, Name: {}, Major: {}, GPA: {:.2})",
            self.student_id,
            self.full_name(),
            self.major,
            self.gpa
        )
    }
}
