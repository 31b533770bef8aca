//! One connection plus one entity registry

use std::path::Path;

use medrec_core::Registry;
use rusqlite::Connection;

use crate::db;
use crate::errors::Result;
use crate::migrations::apply_migrations;
use crate::schema;

/// Everything an interactive session needs: a migrated connection reused for
/// every operation and the registry of records loaded through it
pub struct Session {
    pub conn: Connection,
    pub registry: Registry,
}

impl Session {
    /// Open the database file at `path` and bring its schema up to date
    ///
    /// # Errors
    ///
    /// `Io` if the parent directory cannot be created, `Persistence` or
    /// `Migration` if the database cannot be opened or migrated.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut conn = db::open(path)?;
        apply_migrations(&mut conn)?;
        Ok(Self::with_connection(conn))
    }

    pub fn open_in_memory() -> Result<Self> {
        let mut conn = db::open_in_memory()?;
        apply_migrations(&mut conn)?;
        Ok(Self::with_connection(conn))
    }

    fn with_connection(conn: Connection) -> Self {
        Self {
            conn,
            registry: Registry::new(),
        }
    }

    /// Forget every loaded instance; the next lookup loads fresh ones
    pub fn clear_registry(&mut self) {
        self.registry = Registry::new();
    }

    /// Drop and recreate every record table, then forget every instance
    /// loaded from the old tables
    ///
    /// # Errors
    ///
    /// `Persistence` if a table cannot be dropped or created.
    pub fn reset(&mut self) -> Result<()> {
        schema::reset(&self.conn)?;
        self.clear_registry();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PatientRepo;

    #[test]
    fn test_open_in_memory_is_migrated() {
        let session = Session::open_in_memory().unwrap();
        assert_eq!(crate::schema::existing_tables(&session.conn).unwrap().len(), 4);
        assert!(session.registry.is_empty());
    }

    #[test]
    fn test_file_session_survives_reopen() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("hospital.db");
        {
            let mut session = Session::open(&path).unwrap();
            PatientRepo::create(&session.conn, &mut session.registry, "Ada", "Lovelace", 36)
                .unwrap();
        }
        let mut session = Session::open(&path).unwrap();
        let all = PatientRepo::get_all(&session.conn, &mut session.registry).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].borrow().full_name(), "Ada Lovelace");
    }

    #[test]
    fn test_clear_registry() {
        let mut session = Session::open_in_memory().unwrap();
        PatientRepo::create(&session.conn, &mut session.registry, "Ada", "Lovelace", 36).unwrap();
        assert_eq!(session.registry.len(), 1);
        session.clear_registry();
        assert!(session.registry.is_empty());
    }

    #[test]
    fn test_reset_does_not_hand_old_instance_to_new_row() {
        let mut session = Session::open_in_memory().unwrap();
        let john =
            PatientRepo::create(&session.conn, &mut session.registry, "John", "Doe", 30).unwrap();

        session.reset().unwrap();
        assert!(session.registry.is_empty());

        let ann =
            PatientRepo::create(&session.conn, &mut session.registry, "Ann", "Able", 41).unwrap();
        assert_eq!(ann.borrow().id(), john.borrow().id());
        assert!(!std::rc::Rc::ptr_eq(&john, &ann));
        assert_eq!(john.borrow().full_name(), "John Doe");
    }
}
