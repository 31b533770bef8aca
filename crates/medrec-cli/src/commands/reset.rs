//! Reset command
//!
//! Usage: medrec reset [--db PATH]

use std::path::Path;

use medrec_store::Session;

pub fn execute(db_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open(db_path)?;
    session.reset()?;
    println!("✓ Database reset: {}", db_path.display());
    Ok(())
}
