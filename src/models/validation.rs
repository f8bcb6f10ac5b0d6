//! Field validators
//!
//! Each validator takes a raw value and returns either the normalized value
//! or a `RecordsError::Validation` carrying a human-readable reason. They are
//! pure: the only outside input, the current date, is passed in explicitly.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{RecordsError, RecordsResult};

/// Lowest grade point value
pub const MIN_GRADE: f64 = 0.0;

/// Highest grade point value
pub const MAX_GRADE: f64 = 4.0;

/// Minimum number of digits in a phone number
pub const MIN_PHONE_DIGITS: usize = 10;

/// Minimum length of a student ID
pub const MIN_ID_LEN: usize = 3;

/// Date format used for every stored date
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Characters that separate course names in the CSV `courses` column
pub const COURSE_SEPARATORS: [char; 2] = [';', ','];

lazy_static! {
    static ref EMAIL_PATTERN: Regex =
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern");
    static ref ISO_DATE_PATTERN: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern");
    static ref NON_DIGIT: Regex = Regex::new(r"\D").expect("non-digit pattern");
}

/// Validate a student ID and normalize it to uppercase
pub fn validate_student_id(s: &str) -> RecordsResult<String> {
    let id = s.trim();
    if id.is_empty() {
        return Err(RecordsError::Validation(
            "Student ID must be a non-empty string".into(),
        ));
    }
    if id.chars().count() < MIN_ID_LEN {
        return Err(RecordsError::Validation(format!(
            "Student ID must be at least {} characters long",
            MIN_ID_LEN
        )));
    }
    Ok(id.to_uppercase())
}

/// Validate a name field and normalize it to title case
pub fn validate_name(s: &str, field: &str) -> RecordsResult<String> {
    let name = s.trim();
    if name.is_empty() {
        return Err(RecordsError::Validation(format!(
            "{} cannot be empty or just whitespace",
            field
        )));
    }
    Ok(title_case(name))
}

/// Validate an email address and normalize it to lowercase
pub fn validate_email(s: &str) -> RecordsResult<String> {
    let email = s.trim();
    if email.is_empty() {
        return Err(RecordsError::Validation(
            "Email must be a non-empty string".into(),
        ));
    }
    if !EMAIL_PATTERN.is_match(email) {
        return Err(RecordsError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }
    Ok(email.to_lowercase())
}

/// Validate a phone number, keeping its original formatting
pub fn validate_phone(s: &str) -> RecordsResult<String> {
    let phone = s.trim();
    let digits = NON_DIGIT.replace_all(phone, "");
    if digits.len() < MIN_PHONE_DIGITS {
        return Err(RecordsError::Validation(format!(
            "Phone number must contain at least {} digits",
            MIN_PHONE_DIGITS
        )));
    }
    Ok(phone.to_string())
}

/// Validate a `YYYY-MM-DD` date
pub fn validate_date(s: &str) -> RecordsResult<NaiveDate> {
    let raw = s.trim();
    if !ISO_DATE_PATTERN.is_match(raw) {
        return Err(RecordsError::Validation(format!(
            "Date must be in YYYY-MM-DD format, got '{}'",
            raw
        )));
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| {
        RecordsError::Validation(format!("'{}' is not a valid calendar date", raw))
    })
}

/// Validate a date of birth, which may not lie after `today`
pub fn validate_birth_date(s: &str, today: NaiveDate) -> RecordsResult<NaiveDate> {
    let date = validate_date(s)?;
    if date > today {
        return Err(RecordsError::Validation(format!(
            "Date of birth {} is in the future",
            date
        )));
    }
    Ok(date)
}

/// Validate a grade point value
pub fn validate_gpa_value(x: f64) -> RecordsResult<f64> {
    if !x.is_finite() || !(MIN_GRADE..=MAX_GRADE).contains(&x) {
        return Err(RecordsError::Validation(format!(
            "Grade must be between {:.1} and {:.1}, got {}",
            MIN_GRADE, MAX_GRADE, x
        )));
    }
    Ok(x)
}

/// Validate a course name, returning it trimmed
///
/// Names may not contain a CSV course separator, or they would come back
/// from an import as several courses.
pub fn validate_course_name(s: &str) -> RecordsResult<String> {
    let name = s.trim();
    if name.is_empty() {
        return Err(RecordsError::Validation(
            "Course name must be a non-empty string".into(),
        ));
    }
    if let Some(separator) = name.chars().find(|c| COURSE_SEPARATORS.contains(c)) {
        return Err(RecordsError::Validation(format!(
            "Course name cannot contain '{}': {}",
            separator, name
        )));
    }
    Ok(name.to_string())
}

/// Uppercase the first letter of every alphabetic run, lowercase the rest
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_student_id() {
        assert_eq!(validate_student_id(" s01 ").unwrap(), "S01");
        assert!(validate_student_id("").unwrap_err().is_validation());
        assert!(validate_student_id("   ").is_err());
        assert!(validate_student_id("ab").is_err());
    }

    #[test]
    fn test_name_title_case() {
        assert_eq!(validate_name("  aDA lovelace ", "Name").unwrap(), "Ada Lovelace");
        assert_eq!(validate_name("o'neil", "Name").unwrap(), "O'Neil");
        assert_eq!(validate_name("mary-jane", "Name").unwrap(), "Mary-Jane");
    }

    #[test]
    fn test_name_empty() {
        let err = validate_name("   ", "First name").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: First name cannot be empty or just whitespace"
        );
    }

    #[test]
    fn test_email() {
        assert_eq!(
            validate_email(" Ada.L@Example.COM ").unwrap(),
            "ada.l@example.com"
        );
        assert!(validate_email("ada@example").is_err());
        assert!(validate_email("ada.example.com").is_err());
        assert!(validate_email("ada@example.c").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_phone() {
        assert_eq!(validate_phone(" (555) 123-4567 ").unwrap(), "(555) 123-4567");
        assert_eq!(validate_phone("+1 555 123 4567").unwrap(), "+1 555 123 4567");
        assert!(validate_phone("555-1234").is_err());
        assert!(validate_phone("phone").is_err());
    }

    #[test]
    fn test_date() {
        assert_eq!(
            validate_date("2000-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2000, 2, 29).unwrap()
        );
        assert!(validate_date("2001-02-29").is_err());
        assert!(validate_date("2000-2-9").is_err());
        assert!(validate_date("02/29/2000").is_err());
        assert!(validate_date("").is_err());
    }

    #[test]
    fn test_birth_date_not_future() {
        assert!(validate_birth_date("2024-06-15", today()).is_ok());
        assert!(validate_birth_date("2024-06-16", today()).is_err());
    }

    #[test]
    fn test_gpa_value() {
        assert_eq!(validate_gpa_value(0.0).unwrap(), 0.0);
        assert_eq!(validate_gpa_value(4.0).unwrap(), 4.0);
        assert!(validate_gpa_value(-0.1).is_err());
        assert!(validate_gpa_value(4.01).is_err());
        assert!(validate_gpa_value(f64::NAN).is_err());
    }

    #[test]
    fn test_course_name() {
        assert_eq!(validate_course_name("  Calculus I ").unwrap(), "Calculus I");
        assert!(validate_course_name(" ").is_err());
    }

    #[test]
    fn test_course_name_rejects_separators() {
        let err = validate_course_name("History, Modern").unwrap_err();
        assert!(err.to_string().contains("cannot contain ','"));
        assert!(validate_course_name("Lab;A").is_err());
        assert_eq!(validate_course_name("Lab-A / B").unwrap(), "Lab-A / B");
    }
}
