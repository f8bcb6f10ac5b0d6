//! Student CLI commands
//!
//! Implements CLI commands for adding, viewing, editing and deleting students.

use chrono::Local;
use clap::{Args, Subcommand};

use crate::display::{format_student_details, format_student_list};
use crate::error::RecordsResult;
use crate::models::{NewStudent, StudentUpdate};
use crate::services::StudentManager;

/// Fields for a new student
#[derive(Args, Debug, Clone)]
pub struct NewStudentArgs {
    /// Student ID (at least 3 characters)
    #[arg(long = "id")]
    pub student_id: String,
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub email: String,
    /// Phone number with at least 10 digits
    #[arg(long)]
    pub phone: String,
    /// Date of birth (YYYY-MM-DD)
    #[arg(long = "dob")]
    pub date_of_birth: String,
    #[arg(long, default_value = "")]
    pub address: String,
    #[arg(long, default_value = "")]
    pub major: String,
}

impl From<NewStudentArgs> for NewStudent {
    fn from(args: NewStudentArgs) -> Self {
        NewStudent {
            student_id: args.student_id,
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            phone: args.phone,
            date_of_birth: args.date_of_birth,
            address: args.address,
            major: args.major,
        }
    }
}

/// Student subcommands
#[derive(Subcommand)]
pub enum StudentCommands {
    /// Add a new student
    Add(NewStudentArgs),

    /// Show a student's details
    Show {
        /// Student ID
        id: String,
    },

    /// List all students
    List,

    /// Edit a student's details
    Edit {
        /// Student ID
        id: String,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        /// Date of birth (YYYY-MM-DD)
        #[arg(long = "dob")]
        date_of_birth: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        major: Option<String>,
    },

    /// Delete a student
    Delete {
        /// Student ID
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a student command
pub fn handle_student_command(manager: &mut StudentManager, cmd: StudentCommands) -> RecordsResult<()> {
    let today = Local::now().date_naive();

    match cmd {
        StudentCommands::Add(args) => {
            let student = manager.add_student(&args.into())?;
            println!("Added student: {}", student);
        }

        StudentCommands::Show { id } => {
            let student = manager.get_student(&id)?;
            print!("{}", format_student_details(&student, today));
        }

        StudentCommands::List => {
            println!("{}", format_student_list(&manager.list_students(), today));
        }

        StudentCommands::Edit {
            id,
            first_name,
            last_name,
            email,
            phone,
            date_of_birth,
            address,
            major,
        } => {
            let update = StudentUpdate {
                first_name,
                last_name,
                email,
                phone,
                date_of_birth,
                address,
                major,
            };
            let student = manager.update_student(&id, &update)?;
            println!("Updated student: {}", student);
        }

        StudentCommands::Delete { id, force } => {
            let student = manager.get_student(&id)?;

            if !force {
                println!("About to delete student: {}", student);
                println!("Use --force to confirm deletion");
                return Ok(());
            }

            let deleted = manager.delete_student(&id)?;
            println!("Deleted student: {}", deleted);
        }
    }

    Ok(())
}
