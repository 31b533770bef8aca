//! Seed command
//!
//! Usage: medrec seed [PATH] [--db PATH]

use clap::Args;
use std::path::{Path, PathBuf};

use medrec_store::seed::{self, import_seed, parse_seed_file};
use medrec_store::{db, migrations};

#[derive(Debug, Args)]
pub struct SeedArgs {
    /// Seed YAML file; the built-in seed is used when omitted
    pub path: Option<PathBuf>,
}

/// Execute seed import
pub fn execute(db_path: &Path, args: SeedArgs) -> Result<(), Box<dyn std::error::Error>> {
    let seed = match &args.path {
        Some(path) => {
            println!("Importing {}...", path.display());
            parse_seed_file(path)?
        }
        None => {
            println!("Importing built-in seed...");
            seed::default_seed()?
        }
    };

    let mut conn = db::open(db_path)?;
    migrations::apply_migrations(&mut conn)?;

    let summary = import_seed(&seed, &mut conn)?;
    println!(
        "✓ Seeded {} patients, {} doctors, {} appointments, {} medical records (digest: {})",
        summary.patients,
        summary.doctors,
        summary.appointments,
        summary.medical_records,
        summary.digest
    );
    Ok(())
}
