//! Report display formatting
//!
//! Terminal output for statistics, transcripts and import results.

use crate::services::{ImportReport, Statistics, Transcript};

/// Format collection statistics
pub fn format_statistics(stats: &Statistics) -> String {
    let mut output = String::new();

    output.push_str("Student Statistics\n");
    output.push_str("==================\n");
    output.push_str(&format!("Total students:    {}\n", stats.total_students));
    output.push_str(&format!("Average GPA:       {:.2}\n", stats.average_gpa));
    output.push_str(&format!("Graded students:   {}\n", stats.graded_students));
    output.push_str(&format!("Course enrollments: {}\n", stats.total_enrollments));

    if stats.total_students == 0 {
        return output;
    }

    let major_width = stats
        .majors
        .keys()
        .map(|m| m.len())
        .max()
        .unwrap_or(5)
        .max(5);

    output.push_str("\nBy Major\n");
    for (major, count) in &stats.majors {
        output.push_str(&format!(
            "  {:<major_width$}  {:>5}\n",
            major,
            count,
            major_width = major_width
        ));
    }

    output.push_str("\nBy Age\n");
    for (bracket, count) in &stats.age_distribution {
        output.push_str(&format!("  {:<10}  {:>5}\n", bracket.label(), count));
    }

    output
}

/// Format a student transcript
pub fn format_transcript(transcript: &Transcript) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Transcript: {} ({})\n",
        transcript.name, transcript.student_id
    ));
    let major = if transcript.major.is_empty() {
        "-"
    } else {
        transcript.major.as_str()
    };
    output.push_str(&format!("Major:    {}\n", major));
    output.push_str(&format!("Enrolled: {}\n", transcript.enrollment_date));
    output.push('\n');

    if transcript.courses.is_empty() {
        output.push_str("No courses.\n");
    } else {
        let course_width = transcript
            .courses
            .iter()
            .map(|l| l.course.len())
            .max()
            .unwrap_or(6)
            .max(6);

        output.push_str(&format!(
            "{:<course_width$}  {:>11}\n",
            "Course",
            "Grade",
            course_width = course_width
        ));
        output.push_str(&format!(
            "{:-<course_width$}  {:->11}\n",
            "",
            "",
            course_width = course_width
        ));

        for line in &transcript.courses {
            let grade = match line.grade {
                Some(grade) => format!("{:.2}", grade),
                None => "In progress".to_string(),
            };
            output.push_str(&format!(
                "{:<course_width$}  {:>11}\n",
                line.course,
                grade,
                course_width = course_width
            ));
        }
    }

    output.push('\n');
    output.push_str(&format!(
        "Completed {} of {} course(s)\n",
        transcript.completed_courses, transcript.total_courses
    ));
    output.push_str(&format!("GPA: {:.2}\n", transcript.gpa));

    output
}

/// Format the outcome of a CSV import
pub fn format_import_report(report: &ImportReport) -> String {
    let mut output = report.summary();
    output.push('\n');

    for (line, reason) in &report.failed {
        output.push_str(&format!("  line {}: {}\n", line, reason));
    }

    output
}
