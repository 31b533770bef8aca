//! Patient persistence

use medrec_core::core_types::Sensitive;
use medrec_core::{EntityKind, MedRecError, Patient, Registry, Shared};
use rusqlite::{params, Connection};

use super::rows::PatientRow;
use super::{
    expect_one_row, instrumented, query_first, query_rows, AppointmentRepo, MedicalRecordRepo,
};
use crate::errors::{from_rusqlite, Result};
use crate::schema;

pub struct PatientRepo;

impl PatientRepo {
    pub fn create_table(conn: &Connection) -> Result<()> {
        schema::create_table(conn, EntityKind::Patient)
    }

    /// Drops the table; appointments and medical records referencing it are
    /// removed by the cascade, and all three are forgotten by the registry
    pub fn drop_table(conn: &Connection, registry: &mut Registry) -> Result<()> {
        schema::drop_table(conn, EntityKind::Patient)?;
        registry.forget(EntityKind::Patient);
        Ok(())
    }

    /// Insert an unsaved patient, assign the generated id and register it
    ///
    /// # Errors
    ///
    /// `AlreadyExists` if the patient already has an id.
    pub fn save(conn: &Connection, registry: &mut Registry, patient: Patient) -> Result<Shared<Patient>> {
        instrumented("patient.save", || {
            if let Some(id) = patient.id() {
                return Err(MedRecError::AlreadyPersisted {
                    entity: EntityKind::Patient,
                    id,
                }
                .into());
            }
            conn.execute(
                "INSERT INTO patients (first_name, last_name, age) VALUES (?1, ?2, ?3)",
                params![patient.first_name(), patient.last_name(), patient.age()],
            )
            .map_err(from_rusqlite)?;

            let mut patient = patient;
            patient.mark_saved(conn.last_insert_rowid());
            Ok(registry.patients.register(patient)?)
        })
    }

    /// Validate, insert and register a new patient
    ///
    /// # Errors
    ///
    /// `InvalidInput` if a field fails validation; nothing is written.
    pub fn create(
        conn: &Connection,
        registry: &mut Registry,
        first_name: &str,
        last_name: &str,
        age: i64,
    ) -> Result<Shared<Patient>> {
        let patient = Patient::new(first_name, last_name, age)?;
        Self::save(conn, registry, patient)
    }

    /// Overwrite the stored row with every field of `patient`
    ///
    /// # Errors
    ///
    /// `NotPersisted` for an unsaved patient, `NotFound` if its row is gone.
    pub fn update(conn: &Connection, patient: &Patient) -> Result<()> {
        instrumented("patient.update", || {
            let id = patient.id().ok_or(MedRecError::NotPersisted {
                entity: EntityKind::Patient,
            })?;
            let changed = conn
                .execute(
                    "UPDATE patients SET first_name = ?1, last_name = ?2, age = ?3 WHERE id = ?4",
                    params![patient.first_name(), patient.last_name(), patient.age(), id],
                )
                .map_err(from_rusqlite)?;
            expect_one_row(changed, EntityKind::Patient, id)
        })
    }

    /// Remove the patient's row (and, by cascade, its appointments and records)
    ///
    /// # Errors
    ///
    /// `NotPersisted` for an unsaved patient, `NotFound` if its row is gone.
    pub fn delete(conn: &Connection, patient: &Patient) -> Result<()> {
        instrumented("patient.delete", || {
            let id = patient.id().ok_or(MedRecError::NotPersisted {
                entity: EntityKind::Patient,
            })?;
            let changed = conn
                .execute("DELETE FROM patients WHERE id = ?1", [id])
                .map_err(from_rusqlite)?;
            expect_one_row(changed, EntityKind::Patient, id)
        })
    }

    /// Every patient, in insertion order
    pub fn get_all(conn: &Connection, registry: &mut Registry) -> Result<Vec<Shared<Patient>>> {
        instrumented("patient.get_all", || {
            let rows = query_rows(
                conn,
                &format!("SELECT {} FROM patients ORDER BY id", PatientRow::COLUMNS),
                [],
                PatientRow::read,
            )?;
            rows.into_iter()
                .map(|row| Self::load(conn, registry, row))
                .collect()
        })
    }

    pub fn find_by_id(conn: &Connection, registry: &mut Registry, id: i64) -> Result<Option<Shared<Patient>>> {
        instrumented("patient.find_by_id", || {
            let row = query_first(
                conn,
                &format!("SELECT {} FROM patients WHERE id = ?1", PatientRow::COLUMNS),
                [id],
                PatientRow::read,
            )?;
            row.map(|row| Self::load(conn, registry, row)).transpose()
        })
    }

    /// First patient (lowest id) with exactly this first and last name
    pub fn find_by_name(
        conn: &Connection,
        registry: &mut Registry,
        first_name: &str,
        last_name: &str,
    ) -> Result<Option<Shared<Patient>>> {
        instrumented("patient.find_by_name", || {
            tracing::debug!(
                first_name = %Sensitive::new(first_name),
                last_name = %Sensitive::new(last_name),
                "looking up patient by name"
            );
            let row = query_first(
                conn,
                &format!(
                    "SELECT {} FROM patients WHERE first_name = ?1 AND last_name = ?2 ORDER BY id LIMIT 1",
                    PatientRow::COLUMNS
                ),
                params![first_name.trim(), last_name.trim()],
                PatientRow::read,
            )?;
            row.map(|row| Self::load(conn, registry, row)).transpose()
        })
    }

    /// Register the row and re-derive its related records
    fn load(conn: &Connection, registry: &mut Registry, row: PatientRow) -> Result<Shared<Patient>> {
        let id = row.id;
        let patient = row.register(registry)?;
        let records = MedicalRecordRepo::find_by_patient_id(conn, registry, id)?;
        let appointments = AppointmentRepo::find_by_patient_id(conn, registry, id)?;
        patient.borrow_mut().attach_related(records, appointments);
        Ok(patient)
    }
}
