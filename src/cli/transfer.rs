//! CSV export and import commands

use std::path::PathBuf;

use chrono::Local;
use clap::Subcommand;

use crate::display::format_import_report;
use crate::error::RecordsResult;
use crate::export::default_export_filename;
use crate::services::StudentManager;

/// Export and import commands
#[derive(Subcommand)]
pub enum TransferCommands {
    /// Export all students to a CSV file
    Export {
        /// Output file (defaults to students_export_<timestamp>.csv)
        file: Option<PathBuf>,
    },

    /// Import students from a CSV file
    Import {
        /// CSV file with a header row
        file: PathBuf,
        /// Confirm importing into a store that already has students
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle an export or import command
pub fn handle_transfer_command(
    manager: &mut StudentManager,
    cmd: TransferCommands,
) -> RecordsResult<()> {
    match cmd {
        TransferCommands::Export { file } => {
            let path = file.unwrap_or_else(|| {
                PathBuf::from(default_export_filename(Local::now().naive_local()))
            });
            let count = manager.export_csv(&path)?;
            println!("Exported {} student(s) to {}", count, path.display());
        }

        TransferCommands::Import { file, force } => {
            if !manager.is_empty() && !force {
                println!(
                    "The store already holds {} student(s); imported rows will be added to them.",
                    manager.len()
                );
                println!("Use --force to confirm the import");
                return Ok(());
            }

            let report = manager.import_csv(&file)?;
            print!("{}", format_import_report(&report));
        }
    }

    Ok(())
}
