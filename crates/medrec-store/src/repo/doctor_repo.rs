//! Doctor persistence

use medrec_core::{Doctor, EntityKind, MedRecError, Registry, Shared};
use rusqlite::{params, Connection};

use super::rows::DoctorRow;
use super::{
    expect_one_row, instrumented, query_first, query_rows, AppointmentRepo, MedicalRecordRepo,
};
use crate::errors::{from_rusqlite, Result};
use crate::schema;

pub struct DoctorRepo;

impl DoctorRepo {
    pub fn create_table(conn: &Connection) -> Result<()> {
        schema::create_table(conn, EntityKind::Doctor)
    }

    pub fn drop_table(conn: &Connection, registry: &mut Registry) -> Result<()> {
        schema::drop_table(conn, EntityKind::Doctor)?;
        registry.forget(EntityKind::Doctor);
        Ok(())
    }

    /// Insert an unsaved doctor, assign the generated id and register it
    pub fn save(conn: &Connection, registry: &mut Registry, doctor: Doctor) -> Result<Shared<Doctor>> {
        instrumented("doctor.save", || {
            if let Some(id) = doctor.id() {
                return Err(MedRecError::AlreadyPersisted {
                    entity: EntityKind::Doctor,
                    id,
                }
                .into());
            }
            conn.execute(
                "INSERT INTO doctors (first_name, last_name, specialty) VALUES (?1, ?2, ?3)",
                params![doctor.first_name(), doctor.last_name(), doctor.specialty()],
            )
            .map_err(from_rusqlite)?;

            let mut doctor = doctor;
            doctor.mark_saved(conn.last_insert_rowid());
            Ok(registry.doctors.register(doctor)?)
        })
    }

    pub fn create(
        conn: &Connection,
        registry: &mut Registry,
        first_name: &str,
        last_name: &str,
        specialty: &str,
    ) -> Result<Shared<Doctor>> {
        let doctor = Doctor::new(first_name, last_name, specialty)?;
        Self::save(conn, registry, doctor)
    }

    pub fn update(conn: &Connection, doctor: &Doctor) -> Result<()> {
        instrumented("doctor.update", || {
            let id = doctor.id().ok_or(MedRecError::NotPersisted {
                entity: EntityKind::Doctor,
            })?;
            let changed = conn
                .execute(
                    "UPDATE doctors SET first_name = ?1, last_name = ?2, specialty = ?3 WHERE id = ?4",
                    params![doctor.first_name(), doctor.last_name(), doctor.specialty(), id],
                )
                .map_err(from_rusqlite)?;
            expect_one_row(changed, EntityKind::Doctor, id)
        })
    }

    pub fn delete(conn: &Connection, doctor: &Doctor) -> Result<()> {
        instrumented("doctor.delete", || {
            let id = doctor.id().ok_or(MedRecError::NotPersisted {
                entity: EntityKind::Doctor,
            })?;
            let changed = conn
                .execute("DELETE FROM doctors WHERE id = ?1", [id])
                .map_err(from_rusqlite)?;
            expect_one_row(changed, EntityKind::Doctor, id)
        })
    }

    pub fn get_all(conn: &Connection, registry: &mut Registry) -> Result<Vec<Shared<Doctor>>> {
        instrumented("doctor.get_all", || {
            let rows = query_rows(
                conn,
                &format!("SELECT {} FROM doctors ORDER BY id", DoctorRow::COLUMNS),
                [],
                DoctorRow::read,
            )?;
            rows.into_iter()
                .map(|row| Self::load(conn, registry, row))
                .collect()
        })
    }

    pub fn find_by_id(conn: &Connection, registry: &mut Registry, id: i64) -> Result<Option<Shared<Doctor>>> {
        instrumented("doctor.find_by_id", || {
            let row = query_first(
                conn,
                &format!("SELECT {} FROM doctors WHERE id = ?1", DoctorRow::COLUMNS),
                [id],
                DoctorRow::read,
            )?;
            row.map(|row| Self::load(conn, registry, row)).transpose()
        })
    }

    pub fn find_by_name(
        conn: &Connection,
        registry: &mut Registry,
        first_name: &str,
        last_name: &str,
    ) -> Result<Option<Shared<Doctor>>> {
        instrumented("doctor.find_by_name", || {
            let row = query_first(
                conn,
                &format!(
                    "SELECT {} FROM doctors WHERE first_name = ?1 AND last_name = ?2 ORDER BY id LIMIT 1",
                    DoctorRow::COLUMNS
                ),
                params![first_name.trim(), last_name.trim()],
                DoctorRow::read,
            )?;
            row.map(|row| Self::load(conn, registry, row)).transpose()
        })
    }

    /// Doctors whose specialty matches, ignoring case
    pub fn find_by_specialty(
        conn: &Connection,
        registry: &mut Registry,
        specialty: &str,
    ) -> Result<Vec<Shared<Doctor>>> {
        instrumented("doctor.find_by_specialty", || {
            let rows = query_rows(
                conn,
                &format!(
                    "SELECT {} FROM doctors WHERE specialty = ?1 COLLATE NOCASE ORDER BY id",
                    DoctorRow::COLUMNS
                ),
                [specialty.trim()],
                DoctorRow::read,
            )?;
            rows.into_iter()
                .map(|row| Self::load(conn, registry, row))
                .collect()
        })
    }

    fn load(conn: &Connection, registry: &mut Registry, row: DoctorRow) -> Result<Shared<Doctor>> {
        let id = row.id;
        let doctor = row.register(registry)?;
        let records = MedicalRecordRepo::find_by_doctor_id(conn, registry, id)?;
        let appointments = AppointmentRepo::find_by_doctor_id(conn, registry, id)?;
        doctor.borrow_mut().attach_related(records, appointments);
        Ok(doctor)
    }
}
