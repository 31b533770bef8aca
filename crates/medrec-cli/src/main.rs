//! MedRec CLI
//!
//! Command-line interface for the hospital record keeper

use clap::{Parser, Subcommand};
use medrec_core::logging_facility::{self, Profile};
use std::path::PathBuf;

mod commands;
mod shell;

#[derive(Debug, Parser)]
#[command(name = "medrec")]
#[command(about = "MedRec - Hospital record keeper", long_about = None)]
struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = "MEDREC_DB", default_value = ".medrec/hospital.db")]
    db: PathBuf,

    /// Logging profile: dev, prod or quiet
    #[arg(long, global = true, env = "MEDREC_LOG", default_value = "quiet")]
    log_profile: Profile,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Interactive menu (the default when no command is given)
    Shell,
    /// Drop and recreate every table, then load a seed
    Seed(commands::seed::SeedArgs),
    /// Drop and recreate every table, leaving them empty
    Reset,
}

fn main() {
    let cli = Cli::parse();
    logging_facility::init(cli.log_profile);

    let result = match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => commands::shell::execute(&cli.db),
        Commands::Seed(args) => commands::seed::execute(&cli.db, args),
        Commands::Reset => commands::reset::execute(&cli.db),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
