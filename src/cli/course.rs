//! Course and grade CLI commands

use clap::Subcommand;

use crate::error::RecordsResult;
use crate::services::StudentManager;

/// Course subcommands
#[derive(Subcommand)]
pub enum CourseCommands {
    /// Enroll a student in a course
    Add {
        /// Student ID
        student: String,
        /// Course name
        course: String,
    },

    /// Drop a course (its grade is removed too)
    Remove {
        /// Student ID
        student: String,
        /// Course name
        course: String,
    },
}

/// Grade subcommands
#[derive(Subcommand)]
pub enum GradeCommands {
    /// Record or overwrite a grade for an enrolled course
    Add {
        /// Student ID
        student: String,
        /// Course name
        course: String,
        /// Grade points, 0.0 to 4.0
        #[arg(allow_negative_numbers = true)]
        grade: f64,
    },

    /// Remove a recorded grade
    Remove {
        /// Student ID
        student: String,
        /// Course name
        course: String,
    },
}

/// Handle a course command
pub fn handle_course_command(manager: &mut StudentManager, cmd: CourseCommands) -> RecordsResult<()> {
    match cmd {
        CourseCommands::Add { student, course } => {
            let updated = manager.add_course(&student, &course)?;
            println!(
                "Enrolled {} in '{}' ({} course(s))",
                updated.student_id(),
                course.trim(),
                updated.courses().len()
            );
        }

        CourseCommands::Remove { student, course } => {
            let before = manager.get_student(&student)?;
            let updated = manager.remove_course(&student, &course)?;
            println!("Removed '{}' from {}", course.trim(), updated.student_id());
            if before.grade(&course).is_some() {
                println!("Its grade was removed; GPA is now {:.2}", updated.gpa());
            }
        }
    }

    Ok(())
}

/// Handle a grade command
pub fn handle_grade_command(manager: &mut StudentManager, cmd: GradeCommands) -> RecordsResult<()> {
    match cmd {
        GradeCommands::Add {
            student,
            course,
            grade,
        } => {
            let updated = manager.add_grade(&student, &course, grade)?;
            println!(
                "Recorded {:.2} for '{}'; GPA is now {:.2}",
                grade,
                course.trim(),
                updated.gpa()
            );
        }

        GradeCommands::Remove { student, course } => {
            let updated = manager.remove_grade(&student, &course)?;
            println!(
                "Removed grade for '{}'; GPA is now {:.2}",
                course.trim(),
                updated.gpa()
            );
        }
    }

    Ok(())
}
