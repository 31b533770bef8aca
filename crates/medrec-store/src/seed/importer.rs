//! Seed importer orchestration
//!
//! Resets the record tables and saves every seed row through the persistence
//! operations, all inside one transaction. Seed keys are resolved to the ids
//! the database assigns as rows are inserted.

use std::collections::HashMap;
use std::path::Path;

use medrec_core::validation::{parse_appointment_date, parse_record_date};
use medrec_core::{Appointment, Doctor, ExError, MedicalRecord, Patient, Registry};
use rusqlite::Connection;

use crate::errors::{from_rusqlite, seed_validation, Result};
use crate::repo::{instrumented, AppointmentRepo, DoctorRepo, MedicalRecordRepo, PatientRepo};
use crate::schema;
use crate::seed::{compute_seed_digest, parse_seed_file, SeedV0};

/// Row counts written by an import, plus the seed digest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub digest: String,
    pub doctors: usize,
    pub patients: usize,
    pub appointments: usize,
    pub medical_records: usize,
}

/// Parse, validate and import a seed file
pub fn import_seed_file(path: &Path, conn: &mut Connection) -> Result<SeedSummary> {
    let seed = parse_seed_file(path)?;
    import_seed(&seed, conn)
}

/// Replace the contents of every record table with `seed`
///
/// Nothing is changed if any row fails; the transaction is rolled back when
/// it is dropped uncommitted.
pub fn import_seed(seed: &SeedV0, conn: &mut Connection) -> Result<SeedSummary> {
    instrumented("seed.import", || {
        let digest = compute_seed_digest(seed)?;
        let tx = conn.transaction().map_err(from_rusqlite)?;

        schema::reset(&tx)?;

        // Instances created here are never handed out, so they get their own registry
        let mut registry = Registry::new();

        let mut doctor_ids: HashMap<&str, i64> = HashMap::new();
        for doctor in &seed.doctors {
            let model = Doctor::new(&doctor.first_name, &doctor.last_name, &doctor.specialty)?;
            let saved = DoctorRepo::save(&tx, &mut registry, model)?;
            let id = saved.borrow().id().ok_or_else(|| missing_id(&doctor.key))?;
            doctor_ids.insert(doctor.key.as_str(), id);
        }

        let mut patient_ids: HashMap<&str, i64> = HashMap::new();
        for patient in &seed.patients {
            let model = Patient::new(&patient.first_name, &patient.last_name, patient.age)?;
            let saved = PatientRepo::save(&tx, &mut registry, model)?;
            let id = saved.borrow().id().ok_or_else(|| missing_id(&patient.key))?;
            patient_ids.insert(patient.key.as_str(), id);
        }

        for appointment in &seed.appointments {
            let model = Appointment::new(
                parse_appointment_date(&appointment.date)?,
                lookup(&patient_ids, &appointment.patient)?,
                lookup(&doctor_ids, &appointment.doctor)?,
                appointment.notes.as_deref(),
            )?;
            AppointmentRepo::save(&tx, &mut registry, model)?;
        }

        for record in &seed.medical_records {
            let model = MedicalRecord::new(
                lookup(&patient_ids, &record.patient)?,
                lookup(&doctor_ids, &record.doctor)?,
                parse_record_date(&record.date)?,
                &record.diagnosis,
                &record.treatment,
            )?;
            MedicalRecordRepo::save(&tx, &mut registry, model)?;
        }

        tx.commit().map_err(from_rusqlite)?;

        tracing::info!(digest = %digest, "seed imported");
        Ok(SeedSummary {
            digest,
            doctors: seed.doctors.len(),
            patients: seed.patients.len(),
            appointments: seed.appointments.len(),
            medical_records: seed.medical_records.len(),
        })
    })
}

fn lookup(ids: &HashMap<&str, i64>, key: &str) -> Result<i64> {
    ids.get(key)
        .copied()
        .ok_or_else(|| seed_validation(format!("Unknown seed key: {}", key)))
}

fn missing_id(key: &str) -> ExError {
    seed_validation(format!("Row {} was saved without an id", key))
}
