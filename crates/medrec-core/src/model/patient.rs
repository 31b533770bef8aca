use std::fmt;

use crate::errors::{EntityKind, Result};
use crate::registry::{Record, Shared};
use crate::validation::{non_empty_string, positive_integer};

use super::{Appointment, MedicalRecord};

/// A patient admitted to the hospital
///
/// Fields are private; every setter validates before assigning, so a
/// `Patient` value is always valid. Related medical records and appointments
/// are attached by the loader and are not persisted through the patient.
#[derive(Debug, Clone)]
pub struct Patient {
    id: Option<i64>,
    first_name: String,
    last_name: String,
    age: i64,
    medical_records: Vec<Shared<MedicalRecord>>,
    appointments: Vec<Shared<Appointment>>,
}

impl Patient {
    /// Create an unsaved patient
    ///
    /// # Errors
    ///
    /// `InvalidField` if a name is blank or the age is not positive.
    pub fn new(first_name: &str, last_name: &str, age: i64) -> Result<Self> {
        Ok(Self {
            id: None,
            first_name: non_empty_string("first_name", "First name", first_name)?,
            last_name: non_empty_string("last_name", "Last name", last_name)?,
            age: positive_integer("age", "Age", age)?,
            medical_records: Vec::new(),
            appointments: Vec::new(),
        })
    }

    /// Rebuild a patient from stored column values
    ///
    /// # Errors
    ///
    /// `InvalidField` if the stored values violate a field constraint.
    pub fn from_row(id: i64, first_name: &str, last_name: &str, age: i64) -> Result<Self> {
        let mut patient = Self::new(first_name, last_name, age)?;
        patient.id = Some(id);
        Ok(patient)
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// Record the id the database generated on insert
    pub fn mark_saved(&mut self, id: i64) {
        self.id = Some(id);
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn age(&self) -> i64 {
        self.age
    }

    pub fn set_first_name(&mut self, first_name: &str) -> Result<()> {
        self.first_name = non_empty_string("first_name", "First name", first_name)?;
        Ok(())
    }

    pub fn set_last_name(&mut self, last_name: &str) -> Result<()> {
        self.last_name = non_empty_string("last_name", "Last name", last_name)?;
        Ok(())
    }

    pub fn set_age(&mut self, age: i64) -> Result<()> {
        self.age = positive_integer("age", "Age", age)?;
        Ok(())
    }

    pub fn medical_records(&self) -> &[Shared<MedicalRecord>] {
        &self.medical_records
    }

    pub fn appointments(&self) -> &[Shared<Appointment>] {
        &self.appointments
    }

    /// Replace the related rows derived at load time
    pub fn attach_related(
        &mut self,
        medical_records: Vec<Shared<MedicalRecord>>,
        appointments: Vec<Shared<Appointment>>,
    ) {
        self.medical_records = medical_records;
        self.appointments = appointments;
    }
}

impl Record for Patient {
    const KIND: EntityKind = EntityKind::Patient;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn refresh_from(&mut self, row: Self) {
        self.first_name = row.first_name;
        self.last_name = row.last_name;
        self.age = row.age;
    }
}

impl fmt::Display for Patient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "Patient #{}: ", id)?,
            None => write!(f, "Patient (unsaved): ")?,
        }
        write!(
            f,
            "{} {}, age {} ({} medical records, {} appointments)",
            self.first_name,
            self.last_name,
            self.age,
            self.medical_records.len(),
            self.appointments.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::MedRecError;

    #[test]
    fn test_new_patient_is_unsaved() {
        let patient = Patient::new("John", "Doe", 30).unwrap();
        assert_eq!(patient.id(), None);
        assert_eq!(patient.full_name(), "John Doe");
    }

    #[test]
    fn test_empty_first_name_rejected() {
        let err = Patient::new("", "Doe", 30).unwrap_err();
        assert!(matches!(
            err,
            MedRecError::InvalidField {
                field: "first_name",
                ..
            }
        ));
        assert_eq!(err.to_string(), "First name must be a non-empty string");
    }

    #[test]
    fn test_setters_keep_old_value_on_failure() {
        let mut patient = Patient::new("John", "Doe", 30).unwrap();
        assert!(patient.set_age(-1).is_err());
        assert!(patient.set_last_name("  ").is_err());
        assert_eq!(patient.age(), 30);
        assert_eq!(patient.last_name(), "Doe");

        patient.set_age(31).unwrap();
        assert_eq!(patient.age(), 31);
    }

    #[test]
    fn test_display() {
        let patient = Patient::from_row(3, "Jane", "Smith", 25).unwrap();
        assert_eq!(
            patient.to_string(),
            "Patient #3: Jane Smith, age 25 (0 medical records, 0 appointments)"
        );
    }
}
