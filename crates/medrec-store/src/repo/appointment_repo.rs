//! Appointment persistence

use medrec_core::{Appointment, EntityKind, MedRecError, Registry, Shared};
use rusqlite::{params, Connection};

use super::rows::AppointmentRow;
use super::{ensure_exists, expect_one_row, instrumented, query_first, query_rows};
use crate::errors::{from_rusqlite, Result};
use crate::schema;

pub struct AppointmentRepo;

impl AppointmentRepo {
    pub fn create_table(conn: &Connection) -> Result<()> {
        schema::create_table(conn, EntityKind::Appointment)
    }

    pub fn drop_table(conn: &Connection, registry: &mut Registry) -> Result<()> {
        schema::drop_table(conn, EntityKind::Appointment)?;
        registry.forget(EntityKind::Appointment);
        Ok(())
    }

    /// Insert an unsaved appointment, assign the generated id and register it
    ///
    /// # Errors
    ///
    /// `UnknownReference` if the patient or doctor row does not exist,
    /// `AlreadyExists` if the appointment already has an id.
    pub fn save(
        conn: &Connection,
        registry: &mut Registry,
        appointment: Appointment,
    ) -> Result<Shared<Appointment>> {
        instrumented("appointment.save", || {
            if let Some(id) = appointment.id() {
                return Err(MedRecError::AlreadyPersisted {
                    entity: EntityKind::Appointment,
                    id,
                }
                .into());
            }
            Self::check_references(conn, &appointment)?;
            conn.execute(
                "INSERT INTO appointments (appointment_date, patient_id, doctor_id, notes)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    appointment.appointment_date(),
                    appointment.patient_id(),
                    appointment.doctor_id(),
                    appointment.notes(),
                ],
            )
            .map_err(from_rusqlite)?;

            let mut appointment = appointment;
            appointment.mark_saved(conn.last_insert_rowid());
            Ok(registry.appointments.register(appointment)?)
        })
    }

    pub fn create(
        conn: &Connection,
        registry: &mut Registry,
        appointment_date: chrono::NaiveDateTime,
        patient_id: i64,
        doctor_id: i64,
        notes: Option<&str>,
    ) -> Result<Shared<Appointment>> {
        let appointment = Appointment::new(appointment_date, patient_id, doctor_id, notes)?;
        Self::save(conn, registry, appointment)
    }

    /// # Errors
    ///
    /// `NotPersisted`, `NotFound`, or `UnknownReference` when a changed
    /// foreign key points nowhere.
    pub fn update(conn: &Connection, appointment: &Appointment) -> Result<()> {
        instrumented("appointment.update", || {
            let id = appointment.id().ok_or(MedRecError::NotPersisted {
                entity: EntityKind::Appointment,
            })?;
            Self::check_references(conn, appointment)?;
            let changed = conn
                .execute(
                    "UPDATE appointments
                     SET appointment_date = ?1, patient_id = ?2, doctor_id = ?3, notes = ?4
                     WHERE id = ?5",
                    params![
                        appointment.appointment_date(),
                        appointment.patient_id(),
                        appointment.doctor_id(),
                        appointment.notes(),
                        id,
                    ],
                )
                .map_err(from_rusqlite)?;
            expect_one_row(changed, EntityKind::Appointment, id)
        })
    }

    pub fn delete(conn: &Connection, appointment: &Appointment) -> Result<()> {
        instrumented("appointment.delete", || {
            let id = appointment.id().ok_or(MedRecError::NotPersisted {
                entity: EntityKind::Appointment,
            })?;
            let changed = conn
                .execute("DELETE FROM appointments WHERE id = ?1", [id])
                .map_err(from_rusqlite)?;
            expect_one_row(changed, EntityKind::Appointment, id)
        })
    }

    pub fn get_all(conn: &Connection, registry: &mut Registry) -> Result<Vec<Shared<Appointment>>> {
        instrumented("appointment.get_all", || {
            Self::load_where(conn, registry, "1 = 1", None)
        })
    }

    pub fn find_by_id(
        conn: &Connection,
        registry: &mut Registry,
        id: i64,
    ) -> Result<Option<Shared<Appointment>>> {
        instrumented("appointment.find_by_id", || {
            let row = query_first(
                conn,
                &format!("SELECT {} FROM appointments WHERE id = ?1", AppointmentRow::COLUMNS),
                [id],
                AppointmentRow::read,
            )?;
            row.map(|row| row.register(registry)).transpose()
        })
    }

    /// Appointments of one patient, in insertion order
    pub fn find_by_patient_id(
        conn: &Connection,
        registry: &mut Registry,
        patient_id: i64,
    ) -> Result<Vec<Shared<Appointment>>> {
        instrumented("appointment.find_by_patient_id", || {
            Self::load_where(conn, registry, "patient_id = ?1", Some(patient_id))
        })
    }

    /// Appointments of one doctor, in insertion order
    pub fn find_by_doctor_id(
        conn: &Connection,
        registry: &mut Registry,
        doctor_id: i64,
    ) -> Result<Vec<Shared<Appointment>>> {
        instrumented("appointment.find_by_doctor_id", || {
            Self::load_where(conn, registry, "doctor_id = ?1", Some(doctor_id))
        })
    }

    fn load_where(
        conn: &Connection,
        registry: &mut Registry,
        condition: &str,
        key: Option<i64>,
    ) -> Result<Vec<Shared<Appointment>>> {
        let sql = format!(
            "SELECT {} FROM appointments WHERE {} ORDER BY id",
            AppointmentRow::COLUMNS,
            condition
        );
        let rows = match key {
            Some(key) => query_rows(conn, &sql, [key], AppointmentRow::read)?,
            None => query_rows(conn, &sql, [], AppointmentRow::read)?,
        };
        rows.into_iter().map(|row| row.register(registry)).collect()
    }

    fn check_references(conn: &Connection, appointment: &Appointment) -> Result<()> {
        ensure_exists(conn, EntityKind::Patient, appointment.patient_id())?;
        ensure_exists(conn, EntityKind::Doctor, appointment.doctor_id())
    }
}
