use std::fmt;

use chrono::NaiveDate;

use crate::errors::{EntityKind, Result};
use crate::registry::Record;
use crate::validation::{non_empty_string, positive_integer, RECORD_DATE_FORMAT};

/// A diagnosis and treatment entered by a doctor for a patient
#[derive(Debug, Clone, PartialEq)]
pub struct MedicalRecord {
    id: Option<i64>,
    patient_id: i64,
    doctor_id: i64,
    record_date: NaiveDate,
    diagnosis: String,
    treatment: String,
}

impl MedicalRecord {
    /// Create an unsaved medical record
    ///
    /// # Errors
    ///
    /// `InvalidField` if an id is not positive or diagnosis/treatment is blank.
    pub fn new(
        patient_id: i64,
        doctor_id: i64,
        record_date: NaiveDate,
        diagnosis: &str,
        treatment: &str,
    ) -> Result<Self> {
        Ok(Self {
            id: None,
            patient_id: positive_integer("patient_id", "Patient ID", patient_id)?,
            doctor_id: positive_integer("doctor_id", "Doctor ID", doctor_id)?,
            record_date,
            diagnosis: non_empty_string("diagnosis", "Diagnosis", diagnosis)?,
            treatment: non_empty_string("treatment", "Treatment", treatment)?,
        })
    }

    /// # Errors
    ///
    /// `InvalidField` if the stored values violate a field constraint.
    pub fn from_row(
        id: i64,
        patient_id: i64,
        doctor_id: i64,
        record_date: NaiveDate,
        diagnosis: &str,
        treatment: &str,
    ) -> Result<Self> {
        let mut record = Self::new(patient_id, doctor_id, record_date, diagnosis, treatment)?;
        record.id = Some(id);
        Ok(record)
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn mark_saved(&mut self, id: i64) {
        self.id = Some(id);
    }

    pub fn patient_id(&self) -> i64 {
        self.patient_id
    }

    pub fn doctor_id(&self) -> i64 {
        self.doctor_id
    }

    pub fn record_date(&self) -> NaiveDate {
        self.record_date
    }

    pub fn diagnosis(&self) -> &str {
        &self.diagnosis
    }

    pub fn treatment(&self) -> &str {
        &self.treatment
    }

    pub fn set_patient_id(&mut self, patient_id: i64) -> Result<()> {
        self.patient_id = positive_integer("patient_id", "Patient ID", patient_id)?;
        Ok(())
    }

    pub fn set_doctor_id(&mut self, doctor_id: i64) -> Result<()> {
        self.doctor_id = positive_integer("doctor_id", "Doctor ID", doctor_id)?;
        Ok(())
    }

    pub fn set_record_date(&mut self, record_date: NaiveDate) {
        self.record_date = record_date;
    }

    pub fn set_diagnosis(&mut self, diagnosis: &str) -> Result<()> {
        self.diagnosis = non_empty_string("diagnosis", "Diagnosis", diagnosis)?;
        Ok(())
    }

    pub fn set_treatment(&mut self, treatment: &str) -> Result<()> {
        self.treatment = non_empty_string("treatment", "Treatment", treatment)?;
        Ok(())
    }
}

impl Record for MedicalRecord {
    const KIND: EntityKind = EntityKind::MedicalRecord;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn refresh_from(&mut self, row: Self) {
        self.patient_id = row.patient_id;
        self.doctor_id = row.doctor_id;
        self.record_date = row.record_date;
        self.diagnosis = row.diagnosis;
        self.treatment = row.treatment;
    }
}

impl fmt::Display for MedicalRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "Medical record #{}: ", id)?,
            None => write!(f, "Medical record (unsaved): ")?,
        }
        write!(
            f,
            "{} patient {} / doctor {}: {} -> {}",
            self.record_date.format(RECORD_DATE_FORMAT),
            self.patient_id,
            self.doctor_id,
            self.diagnosis,
            self.treatment
        )
    }
}
