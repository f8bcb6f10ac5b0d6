//! Query and report CLI commands
//!
//! Read-only commands: search, statistics, rankings, transcripts, field
//! validation and the audit history.

use chrono::Local;
use clap::Subcommand;

use crate::display::{format_ranked_list, format_statistics, format_student_list, format_transcript};
use crate::error::RecordsResult;
use crate::models::NewStudent;
use crate::services::{SearchCriteria, StudentManager};

use super::student::NewStudentArgs;

/// Query commands
#[derive(Subcommand)]
pub enum QueryCommands {
    /// Search students; all given filters must match
    Search {
        /// Part of the full name
        #[arg(long)]
        name: Option<String>,
        /// Part of the major
        #[arg(long)]
        major: Option<String>,
        /// Part of the email address
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        min_gpa: Option<f64>,
        #[arg(long)]
        max_gpa: Option<f64>,
        #[arg(long)]
        min_age: Option<u32>,
        #[arg(long)]
        max_age: Option<u32>,
    },

    /// Show collection statistics
    Stats,

    /// Show the highest-GPA students
    Top {
        /// Number of students (defaults to the configured limit)
        count: Option<usize>,
    },

    /// Show students below the at-risk GPA threshold
    AtRisk,

    /// Show a student's transcript
    Transcript {
        /// Student ID
        id: String,
    },

    /// Check student fields without adding the student
    Validate(NewStudentArgs),

    /// Show recent changes from the audit log
    History {
        /// Only show changes to this student
        student: Option<String>,
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

/// Handle a query command
pub fn handle_query_command(manager: &StudentManager, cmd: QueryCommands) -> RecordsResult<()> {
    let today = Local::now().date_naive();

    match cmd {
        QueryCommands::Search {
            name,
            major,
            email,
            min_gpa,
            max_gpa,
            min_age,
            max_age,
        } => {
            let criteria = SearchCriteria {
                name_substring: name,
                major,
                email_substring: email,
                min_gpa,
                max_gpa,
                min_age,
                max_age,
            };
            println!("{}", format_student_list(&manager.search(&criteria), today));
        }

        QueryCommands::Stats => {
            print!("{}", format_statistics(&manager.statistics()));
        }

        QueryCommands::Top { count } => {
            let count = count.unwrap_or(manager.settings().top_students_limit);
            println!("{}", format_ranked_list(&manager.top_students(count), today));
        }

        QueryCommands::AtRisk => {
            let at_risk = manager.at_risk_students();
            println!(
                "Students with GPA below {:.2}:",
                manager.settings().at_risk_threshold
            );
            println!("{}", format_student_list(&at_risk, today));
        }

        QueryCommands::Transcript { id } => {
            print!("{}", format_transcript(&manager.transcript(&id)?));
        }

        QueryCommands::Validate(args) => {
            let fields: NewStudent = args.into();
            let problems = manager.validate_student_data(&fields);

            if problems.is_empty() {
                println!("Student data is valid.");
            } else {
                println!("Found {} problem(s):", problems.len());
                for problem in problems {
                    println!("  - {}", problem);
                }
            }
        }

        QueryCommands::History { student, limit } => {
            let audit = manager.storage().audit();
            let entries = match &student {
                Some(id) => {
                    let mut entries = audit.read_for(id)?;
                    let start = entries.len().saturating_sub(limit);
                    entries.split_off(start)
                }
                None => audit.read_recent(limit)?,
            };

            if entries.is_empty() {
                println!("No history found.");
                return Ok(());
            }

            for entry in &entries {
                println!("{}", entry.describe());
            }
        }
    }

    Ok(())
}
