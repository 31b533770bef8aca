use std::fmt;

use crate::errors::{EntityKind, Result};
use crate::registry::{Record, Shared};
use crate::validation::non_empty_string;

use super::{Appointment, MedicalRecord};

/// A member of the medical staff
#[derive(Debug, Clone)]
pub struct Doctor {
    id: Option<i64>,
    first_name: String,
    last_name: String,
    specialty: String,
    medical_records: Vec<Shared<MedicalRecord>>,
    appointments: Vec<Shared<Appointment>>,
}

impl Doctor {
    /// Create an unsaved doctor
    ///
    /// # Errors
    ///
    /// `InvalidField` if any field is blank.
    pub fn new(first_name: &str, last_name: &str, specialty: &str) -> Result<Self> {
        Ok(Self {
            id: None,
            first_name: non_empty_string("first_name", "First name", first_name)?,
            last_name: non_empty_string("last_name", "Last name", last_name)?,
            specialty: non_empty_string("specialty", "Specialty", specialty)?,
            medical_records: Vec::new(),
            appointments: Vec::new(),
        })
    }

    /// # Errors
    ///
    /// `InvalidField` if the stored values violate a field constraint.
    pub fn from_row(id: i64, first_name: &str, last_name: &str, specialty: &str) -> Result<Self> {
        let mut doctor = Self::new(first_name, last_name, specialty)?;
        doctor.id = Some(id);
        Ok(doctor)
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

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
        format!("Dr. {} {}", self.first_name, self.last_name)
    }

    pub fn specialty(&self) -> &str {
        &self.specialty
    }

    pub fn set_first_name(&mut self, first_name: &str) -> Result<()> {
        self.first_name = non_empty_string("first_name", "First name", first_name)?;
        Ok(())
    }

    pub fn set_last_name(&mut self, last_name: &str) -> Result<()> {
        self.last_name = non_empty_string("last_name", "Last name", last_name)?;
        Ok(())
    }

    pub fn set_specialty(&mut self, specialty: &str) -> Result<()> {
        self.specialty = non_empty_string("specialty", "Specialty", specialty)?;
        Ok(())
    }

    pub fn medical_records(&self) -> &[Shared<MedicalRecord>] {
        &self.medical_records
    }

    pub fn appointments(&self) -> &[Shared<Appointment>] {
        &self.appointments
    }

    pub fn attach_related(
        &mut self,
        medical_records: Vec<Shared<MedicalRecord>>,
        appointments: Vec<Shared<Appointment>>,
    ) {
        self.medical_records = medical_records;
        self.appointments = appointments;
    }
}

impl Record for Doctor {
    const KIND: EntityKind = EntityKind::Doctor;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn refresh_from(&mut self, row: Self) {
        self.first_name = row.first_name;
        self.last_name = row.last_name;
        self.specialty = row.specialty;
    }
}

impl fmt::Display for Doctor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "Doctor #{}: ", id)?,
            None => write!(f, "Doctor (unsaved): ")?,
        }
        write!(
            f,
            "{} ({}), {} appointments",
            self.full_name(),
            self.specialty,
            self.appointments.len()
        )
    }
}
