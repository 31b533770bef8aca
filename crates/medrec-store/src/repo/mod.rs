//! Persistence operations for every record type
//!
//! Each repository is a unit struct whose associated functions take the
//! connection explicitly and, for anything that loads rows, the session's
//! `Registry`. Loaded rows always pass through the registry (see `rows`), so
//! a record loaded twice is the same `Shared` instance.

pub mod appointment_repo;
pub mod doctor_repo;
pub mod medical_record_repo;
pub mod patient_repo;
pub mod rows;

pub use appointment_repo::AppointmentRepo;
pub use doctor_repo::DoctorRepo;
pub use medical_record_repo::MedicalRecordRepo;
pub use patient_repo::PatientRepo;

use crate::errors::{from_rusqlite, Result};
use medrec_core::{log_op_end, log_op_error, log_op_start, EntityKind, MedRecError};
use rusqlite::{Connection, OptionalExtension, Params, Row};

/// Run `f` between start and end/end_error log events
///
/// Errors that do not yet name an operation are tagged with `op`.
pub(crate) fn instrumented<T>(op: &'static str, f: impl FnOnce() -> Result<T>) -> Result<T> {
    log_op_start!(op);
    let start = std::time::Instant::now();

    let result = f();
    let elapsed = start.elapsed().as_millis() as u64;
    match result {
        Ok(value) => {
            log_op_end!(op, duration_ms = elapsed);
            Ok(value)
        }
        Err(e) => {
            let e = if e.op().is_some() { e } else { e.with_op(op) };
            log_op_error!(op, e.clone(), duration_ms = elapsed);
            Err(e)
        }
    }
}

/// Fail with `UnknownReference` unless a row with `id` exists in `kind`'s table
pub(crate) fn ensure_exists(conn: &Connection, kind: EntityKind, id: i64) -> Result<()> {
    let found: Option<i64> = conn
        .query_row(
            &format!("SELECT id FROM {} WHERE id = ?1", kind.table()),
            [id],
            |row| row.get(0),
        )
        .optional()
        .map_err(from_rusqlite)?;
    match found {
        Some(_) => Ok(()),
        None => Err(MedRecError::UnknownReference { entity: kind, id }.into()),
    }
}

/// Map every row of a query with `map`
pub(crate) fn query_rows<R, P, F>(conn: &Connection, sql: &str, params: P, map: F) -> Result<Vec<R>>
where
    P: Params,
    F: FnMut(&Row<'_>) -> rusqlite::Result<R>,
{
    let mut stmt = conn.prepare(sql).map_err(from_rusqlite)?;
    let rows = stmt
        .query_map(params, map)
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;
    Ok(rows)
}

/// Map the first row of a query, if any
pub(crate) fn query_first<R, P, F>(conn: &Connection, sql: &str, params: P, map: F) -> Result<Option<R>>
where
    P: Params,
    F: FnOnce(&Row<'_>) -> rusqlite::Result<R>,
{
    conn.query_row(sql, params, map)
        .optional()
        .map_err(from_rusqlite)
}

/// Translate the affected-row count of an UPDATE/DELETE by id
pub(crate) fn expect_one_row(changed: usize, kind: EntityKind, id: i64) -> Result<()> {
    if changed == 0 {
        return Err(MedRecError::NotFound { entity: kind, id }.into());
    }
    Ok(())
}
