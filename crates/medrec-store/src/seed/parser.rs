//! Seed parser with validation
//!
//! Parses YAML and validates schema version, key uniqueness, referential
//! integrity and every field value, so a seed that parses can be imported
//! without a validation failure half way through.

use crate::errors::{seed_validation, Result};
use crate::seed::format_v0::SeedV0;
use medrec_core::validation::{parse_appointment_date, parse_record_date};
use medrec_core::{Doctor, ExError, MedRecError, Patient};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Parse a seed file from a path
pub fn parse_seed_file(path: &Path) -> Result<SeedV0> {
    let content = fs::read_to_string(path)
        .map_err(|e| seed_validation(format!("Failed to read seed file: {}", e)))?;

    parse_seed_str(&content)
}

/// Parse a seed from a string
pub fn parse_seed_str(content: &str) -> Result<SeedV0> {
    let seed: SeedV0 = serde_yaml::from_str(content)
        .map_err(|e| seed_validation(format!("YAML parse error: {}", e)))?;

    validate_seed(&seed)?;

    Ok(seed)
}

fn validate_seed(seed: &SeedV0) -> Result<()> {
    if seed.schema_version != 0 {
        return Err(seed_validation(format!(
            "Unsupported schema_version: {}. Expected 0",
            seed.schema_version
        )));
    }

    let doctor_keys = unique_keys("doctor", seed.doctors.iter().map(|d| d.key.as_str()))?;
    let patient_keys = unique_keys("patient", seed.patients.iter().map(|p| p.key.as_str()))?;

    for doctor in &seed.doctors {
        Doctor::new(&doctor.first_name, &doctor.last_name, &doctor.specialty)
            .map_err(|e| field_error("doctor", &doctor.key, e))?;
    }
    for patient in &seed.patients {
        Patient::new(&patient.first_name, &patient.last_name, patient.age)
            .map_err(|e| field_error("patient", &patient.key, e))?;
    }

    for (index, appointment) in seed.appointments.iter().enumerate() {
        let label = format!("appointments[{}]", index);
        check_reference(&label, "patient", &appointment.patient, &patient_keys)?;
        check_reference(&label, "doctor", &appointment.doctor, &doctor_keys)?;
        parse_appointment_date(&appointment.date).map_err(|e| field_error("entry", &label, e))?;
    }

    for (index, record) in seed.medical_records.iter().enumerate() {
        let label = format!("medical_records[{}]", index);
        check_reference(&label, "patient", &record.patient, &patient_keys)?;
        check_reference(&label, "doctor", &record.doctor, &doctor_keys)?;
        parse_record_date(&record.date).map_err(|e| field_error("entry", &label, e))?;
        if record.diagnosis.trim().is_empty() || record.treatment.trim().is_empty() {
            return Err(seed_validation(format!(
                "Entry {} needs a diagnosis and a treatment",
                label
            )));
        }
    }

    Ok(())
}

fn unique_keys<'a>(what: &str, keys: impl Iterator<Item = &'a str>) -> Result<HashSet<&'a str>> {
    let mut seen = HashSet::new();
    for key in keys {
        if !seen.insert(key) {
            return Err(seed_validation(format!("Duplicate {} key: {}", what, key)));
        }
    }
    Ok(seen)
}

fn check_reference(label: &str, what: &str, key: &str, known: &HashSet<&str>) -> Result<()> {
    if known.contains(key) {
        return Ok(());
    }
    Err(seed_validation(format!(
        "Entry {} references non-existent {}: {}",
        label, what, key
    )))
}

fn field_error(what: &str, key: &str, err: MedRecError) -> ExError {
    seed_validation(format!("Invalid {} {}: {}", what, key, err))
}
