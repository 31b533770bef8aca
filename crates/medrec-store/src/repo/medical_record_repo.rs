//! Medical record persistence

use chrono::NaiveDate;
use medrec_core::{EntityKind, MedRecError, MedicalRecord, Registry, Shared};
use rusqlite::{params, Connection};

use super::rows::MedicalRecordRow;
use super::{ensure_exists, expect_one_row, instrumented, query_first, query_rows};
use crate::errors::{from_rusqlite, Result};
use crate::schema;

pub struct MedicalRecordRepo;

impl MedicalRecordRepo {
    pub fn create_table(conn: &Connection) -> Result<()> {
        schema::create_table(conn, EntityKind::MedicalRecord)
    }

    pub fn drop_table(conn: &Connection, registry: &mut Registry) -> Result<()> {
        schema::drop_table(conn, EntityKind::MedicalRecord)?;
        registry.forget(EntityKind::MedicalRecord);
        Ok(())
    }

    /// Insert an unsaved record, assign the generated id and register it
    ///
    /// # Errors
    ///
    /// `UnknownReference` if the patient or doctor row does not exist,
    /// `AlreadyExists` if the record already has an id.
    pub fn save(
        conn: &Connection,
        registry: &mut Registry,
        record: MedicalRecord,
    ) -> Result<Shared<MedicalRecord>> {
        instrumented("medical_record.save", || {
            if let Some(id) = record.id() {
                return Err(MedRecError::AlreadyPersisted {
                    entity: EntityKind::MedicalRecord,
                    id,
                }
                .into());
            }
            Self::check_references(conn, &record)?;
            conn.execute(
                "INSERT INTO medical_records (patient_id, doctor_id, record_date, diagnosis, treatment)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    record.patient_id(),
                    record.doctor_id(),
                    record.record_date(),
                    record.diagnosis(),
                    record.treatment(),
                ],
            )
            .map_err(from_rusqlite)?;

            let mut record = record;
            record.mark_saved(conn.last_insert_rowid());
            Ok(registry.medical_records.register(record)?)
        })
    }

    pub fn create(
        conn: &Connection,
        registry: &mut Registry,
        patient_id: i64,
        doctor_id: i64,
        record_date: NaiveDate,
        diagnosis: &str,
        treatment: &str,
    ) -> Result<Shared<MedicalRecord>> {
        let record = MedicalRecord::new(patient_id, doctor_id, record_date, diagnosis, treatment)?;
        Self::save(conn, registry, record)
    }

    pub fn update(conn: &Connection, record: &MedicalRecord) -> Result<()> {
        instrumented("medical_record.update", || {
            let id = record.id().ok_or(MedRecError::NotPersisted {
                entity: EntityKind::MedicalRecord,
            })?;
            Self::check_references(conn, record)?;
            let changed = conn
                .execute(
                    "UPDATE medical_records
                     SET patient_id = ?1, doctor_id = ?2, record_date = ?3, diagnosis = ?4, treatment = ?5
                     WHERE id = ?6",
                    params![
                        record.patient_id(),
                        record.doctor_id(),
                        record.record_date(),
                        record.diagnosis(),
                        record.treatment(),
                        id,
                    ],
                )
                .map_err(from_rusqlite)?;
            expect_one_row(changed, EntityKind::MedicalRecord, id)
        })
    }

    pub fn delete(conn: &Connection, record: &MedicalRecord) -> Result<()> {
        instrumented("medical_record.delete", || {
            let id = record.id().ok_or(MedRecError::NotPersisted {
                entity: EntityKind::MedicalRecord,
            })?;
            let changed = conn
                .execute("DELETE FROM medical_records WHERE id = ?1", [id])
                .map_err(from_rusqlite)?;
            expect_one_row(changed, EntityKind::MedicalRecord, id)
        })
    }

    pub fn get_all(conn: &Connection, registry: &mut Registry) -> Result<Vec<Shared<MedicalRecord>>> {
        instrumented("medical_record.get_all", || {
            Self::load_where(conn, registry, "1 = 1", None)
        })
    }

    pub fn find_by_id(
        conn: &Connection,
        registry: &mut Registry,
        id: i64,
    ) -> Result<Option<Shared<MedicalRecord>>> {
        instrumented("medical_record.find_by_id", || {
            let row = query_first(
                conn,
                &format!(
                    "SELECT {} FROM medical_records WHERE id = ?1",
                    MedicalRecordRow::COLUMNS
                ),
                [id],
                MedicalRecordRow::read,
            )?;
            row.map(|row| row.register(registry)).transpose()
        })
    }

    /// Records of one patient, in insertion order
    pub fn find_by_patient_id(
        conn: &Connection,
        registry: &mut Registry,
        patient_id: i64,
    ) -> Result<Vec<Shared<MedicalRecord>>> {
        instrumented("medical_record.find_by_patient_id", || {
            Self::load_where(conn, registry, "patient_id = ?1", Some(patient_id))
        })
    }

    /// Records written by one doctor, in insertion order
    pub fn find_by_doctor_id(
        conn: &Connection,
        registry: &mut Registry,
        doctor_id: i64,
    ) -> Result<Vec<Shared<MedicalRecord>>> {
        instrumented("medical_record.find_by_doctor_id", || {
            Self::load_where(conn, registry, "doctor_id = ?1", Some(doctor_id))
        })
    }

    fn load_where(
        conn: &Connection,
        registry: &mut Registry,
        condition: &str,
        key: Option<i64>,
    ) -> Result<Vec<Shared<MedicalRecord>>> {
        let sql = format!(
            "SELECT {} FROM medical_records WHERE {} ORDER BY id",
            MedicalRecordRow::COLUMNS,
            condition
        );
        let rows = match key {
            Some(key) => query_rows(conn, &sql, [key], MedicalRecordRow::read)?,
            None => query_rows(conn, &sql, [], MedicalRecordRow::read)?,
        };
        rows.into_iter().map(|row| row.register(registry)).collect()
    }

    fn check_references(conn: &Connection, record: &MedicalRecord) -> Result<()> {
        ensure_exists(conn, EntityKind::Patient, record.patient_id())?;
        ensure_exists(conn, EntityKind::Doctor, record.doctor_id())
    }
}
