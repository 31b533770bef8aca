//! Table definitions
//!
//! The DDL files under `migrations/` are the single source of truth; the
//! migration runner and the per-entity `create_table` operations both embed
//! them from here.

use crate::errors::{from_rusqlite, Result};
use medrec_core::EntityKind;
use rusqlite::Connection;

pub const PATIENTS_DDL: &str = include_str!("../migrations/001_patients.sql");
pub const DOCTORS_DDL: &str = include_str!("../migrations/002_doctors.sql");
pub const APPOINTMENTS_DDL: &str = include_str!("../migrations/003_appointments.sql");
pub const MEDICAL_RECORDS_DDL: &str = include_str!("../migrations/004_medical_records.sql");

/// Parent tables first, so dropping in reverse never strands a child row
pub const CREATE_ORDER: [EntityKind; 4] = [
    EntityKind::Patient,
    EntityKind::Doctor,
    EntityKind::Appointment,
    EntityKind::MedicalRecord,
];

pub fn ddl_for(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Patient => PATIENTS_DDL,
        EntityKind::Doctor => DOCTORS_DDL,
        EntityKind::Appointment => APPOINTMENTS_DDL,
        EntityKind::MedicalRecord => MEDICAL_RECORDS_DDL,
    }
}

pub fn create_table(conn: &Connection, kind: EntityKind) -> Result<()> {
    conn.execute_batch(ddl_for(kind)).map_err(from_rusqlite)
}

pub fn drop_table(conn: &Connection, kind: EntityKind) -> Result<()> {
    conn.execute_batch(&format!("DROP TABLE IF EXISTS {}", kind.table()))
        .map_err(from_rusqlite)
}

pub fn create_all(conn: &Connection) -> Result<()> {
    for kind in CREATE_ORDER {
        create_table(conn, kind)?;
    }
    Ok(())
}

pub fn drop_all(conn: &Connection) -> Result<()> {
    for kind in CREATE_ORDER.iter().rev() {
        drop_table(conn, *kind)?;
    }
    Ok(())
}

/// Drop and recreate every record table, leaving them empty
pub fn reset(conn: &Connection) -> Result<()> {
    drop_all(conn)?;
    create_all(conn)
}

/// Names of the record tables currently present
pub fn existing_tables(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare(
            "SELECT name FROM sqlite_master
             WHERE type = 'table' AND name IN ('patients', 'doctors', 'appointments', 'medical_records')
             ORDER BY name",
        )
        .map_err(from_rusqlite)?;
    let names = stmt
        .query_map([], |row| row.get(0))
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<String>, _>>()
        .map_err(from_rusqlite)?;
    Ok(names)
}
