use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use student_records::cli::{
    handle_backup_command, handle_course_command, handle_grade_command, handle_query_command,
    handle_student_command, handle_transfer_command, BackupCommands, CourseCommands,
    GradeCommands, QueryCommands, StudentCommands, TransferCommands,
};
use student_records::config::{paths::RecordsPaths, settings::Settings};
use student_records::services::StudentManager;
use student_records::storage::Storage;
use student_records::RecordsError;

#[derive(Parser)]
#[command(
    name = "students",
    version,
    about = "Terminal-based student record management",
    long_about = "Keeps a collection of student records in a JSON file: personal \
                  details, course enrollments and grades with a derived GPA. Every \
                  change is backed up and recorded in an audit log."
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Student management commands
    #[command(subcommand)]
    Student(StudentCommands),

    /// Course enrollment commands
    #[command(subcommand)]
    Course(CourseCommands),

    /// Grade commands
    #[command(subcommand)]
    Grade(GradeCommands),

    #[command(flatten)]
    Query(QueryCommands),

    #[command(flatten)]
    Transfer(TransferCommands),

    /// Backup management commands
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = RecordsPaths::new()?;

    let command = match cli.command {
        Some(command) => command,
        None => {
            println!("Student Records - terminal-based student record management");
            println!();
            println!("Run 'students --help' for usage information.");
            return Ok(());
        }
    };

    match command {
        Commands::Backup(cmd) => {
            let storage = Storage::new(paths)?;
            handle_backup_command(&storage, cmd)?;
        }
        Commands::Config => {
            let settings = Settings::load_or_create(&paths)?;
            println!("Student Records Configuration");
            println!("=============================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data file:        {}", paths.students_file().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Course delimiter:   '{}'", settings.course_delimiter);
            println!("  At-risk threshold:  {:.2}", settings.at_risk_threshold);
            println!("  Top students limit: {}", settings.top_students_limit);
            println!("  Audit enabled:      {}", settings.audit_enabled);
        }
        Commands::Student(cmd) => handle_student_command(&mut open_manager(paths)?, cmd)?,
        Commands::Course(cmd) => handle_course_command(&mut open_manager(paths)?, cmd)?,
        Commands::Grade(cmd) => handle_grade_command(&mut open_manager(paths)?, cmd)?,
        Commands::Query(cmd) => handle_query_command(&open_manager(paths)?, cmd)?,
        Commands::Transfer(cmd) => handle_transfer_command(&mut open_manager(paths)?, cmd)?,
    }

    Ok(())
}

/// Open the student collection, pointing at the backups when the data file is unreadable
fn open_manager(paths: RecordsPaths) -> Result<StudentManager> {
    StudentManager::open(paths).map_err(|e| match e {
        RecordsError::CorruptData { .. } => anyhow!(
            "{}\nRun 'students backup restore latest --force' to recover the most recent backup.",
            e
        ),
        other => other.into(),
    })
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "student_records=debug"
    } else {
        "student_records=warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
