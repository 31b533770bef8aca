//! Row mapper
//!
//! A raw row is first read into a plain `*Row` struct (no validation, so it
//! fits inside rusqlite's mapping closures), then turned into a validated
//! record and registered. Registration refreshes an existing instance in
//! place rather than replacing it.

use chrono::{NaiveDate, NaiveDateTime};
use medrec_core::{Appointment, Doctor, MedicalRecord, Patient, Registry, Shared};
use rusqlite::Row;

use crate::errors::Result;

#[derive(Debug, Clone)]
pub struct PatientRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub age: i64,
}

impl PatientRow {
    pub const COLUMNS: &'static str = "id, first_name, last_name, age";

    pub fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            age: row.get(3)?,
        })
    }

    /// Validate and register; related rows are attached by the caller
    pub fn register(self, registry: &mut Registry) -> Result<Shared<Patient>> {
        let patient = Patient::from_row(self.id, &self.first_name, &self.last_name, self.age)?;
        Ok(registry.patients.register(patient)?)
    }
}

#[derive(Debug, Clone)]
pub struct DoctorRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub specialty: String,
}

impl DoctorRow {
    pub const COLUMNS: &'static str = "id, first_name, last_name, specialty";

    pub fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            specialty: row.get(3)?,
        })
    }

    pub fn register(self, registry: &mut Registry) -> Result<Shared<Doctor>> {
        let doctor = Doctor::from_row(self.id, &self.first_name, &self.last_name, &self.specialty)?;
        Ok(registry.doctors.register(doctor)?)
    }
}

#[derive(Debug, Clone)]
pub struct AppointmentRow {
    pub id: i64,
    pub appointment_date: NaiveDateTime,
    pub patient_id: i64,
    pub doctor_id: i64,
    pub notes: Option<String>,
}

impl AppointmentRow {
    pub const COLUMNS: &'static str = "id, appointment_date, patient_id, doctor_id, notes";

    pub fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            appointment_date: row.get(1)?,
            patient_id: row.get(2)?,
            doctor_id: row.get(3)?,
            notes: row.get(4)?,
        })
    }

    pub fn register(self, registry: &mut Registry) -> Result<Shared<Appointment>> {
        let appointment = Appointment::from_row(
            self.id,
            self.appointment_date,
            self.patient_id,
            self.doctor_id,
            self.notes.as_deref(),
        )?;
        Ok(registry.appointments.register(appointment)?)
    }
}

#[derive(Debug, Clone)]
pub struct MedicalRecordRow {
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: i64,
    pub record_date: NaiveDate,
    pub diagnosis: String,
    pub treatment: String,
}

impl MedicalRecordRow {
    pub const COLUMNS: &'static str = "id, patient_id, doctor_id, record_date, diagnosis, treatment";

    pub fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            patient_id: row.get(1)?,
            doctor_id: row.get(2)?,
            record_date: row.get(3)?,
            diagnosis: row.get(4)?,
            treatment: row.get(5)?,
        })
    }

    pub fn register(self, registry: &mut Registry) -> Result<Shared<MedicalRecord>> {
        let record = MedicalRecord::from_row(
            self.id,
            self.patient_id,
            self.doctor_id,
            self.record_date,
            &self.diagnosis,
            &self.treatment,
        )?;
        Ok(registry.medical_records.register(record)?)
    }
}
