//! Interactive shell command
//!
//! Usage: medrec [shell] [--db PATH]

use std::io;
use std::path::Path;

use medrec_store::Session;

use crate::shell::Shell;

pub fn execute(db: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::open(db)?;
    tracing::debug!(db = %db.display(), "shell session opened");

    let stdin = io::stdin();
    let stdout = io::stdout();
    Shell::new(&mut session, stdin.lock(), stdout.lock()).run()?;
    Ok(())
}
