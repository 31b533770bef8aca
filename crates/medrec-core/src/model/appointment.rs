use std::fmt;

use chrono::NaiveDateTime;

use crate::errors::{EntityKind, Result};
use crate::registry::Record;
use crate::validation::{optional_text, positive_integer, APPOINTMENT_DATE_FORMAT};

/// A scheduled visit between one patient and one doctor
///
/// Only the shape of the foreign keys is checked here; whether the referenced
/// rows exist is checked by the store at save/update time.
#[derive(Debug, Clone, PartialEq)]
pub struct Appointment {
    id: Option<i64>,
    appointment_date: NaiveDateTime,
    patient_id: i64,
    doctor_id: i64,
    notes: Option<String>,
}

impl Appointment {
    /// Create an unsaved appointment; blank notes are stored as absent
    ///
    /// # Errors
    ///
    /// `InvalidField` if either id is not positive.
    pub fn new(
        appointment_date: NaiveDateTime,
        patient_id: i64,
        doctor_id: i64,
        notes: Option<&str>,
    ) -> Result<Self> {
        Ok(Self {
            id: None,
            appointment_date,
            patient_id: positive_integer("patient_id", "Patient ID", patient_id)?,
            doctor_id: positive_integer("doctor_id", "Doctor ID", doctor_id)?,
            notes: optional_text(notes),
        })
    }

    /// # Errors
    ///
    /// `InvalidField` if the stored values violate a field constraint.
    pub fn from_row(
        id: i64,
        appointment_date: NaiveDateTime,
        patient_id: i64,
        doctor_id: i64,
        notes: Option<&str>,
    ) -> Result<Self> {
        let mut appointment = Self::new(appointment_date, patient_id, doctor_id, notes)?;
        appointment.id = Some(id);
        Ok(appointment)
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn mark_saved(&mut self, id: i64) {
        self.id = Some(id);
    }

    pub fn appointment_date(&self) -> NaiveDateTime {
        self.appointment_date
    }

    pub fn patient_id(&self) -> i64 {
        self.patient_id
    }

    pub fn doctor_id(&self) -> i64 {
        self.doctor_id
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn set_appointment_date(&mut self, appointment_date: NaiveDateTime) {
        self.appointment_date = appointment_date;
    }

    pub fn set_patient_id(&mut self, patient_id: i64) -> Result<()> {
        self.patient_id = positive_integer("patient_id", "Patient ID", patient_id)?;
        Ok(())
    }

    pub fn set_doctor_id(&mut self, doctor_id: i64) -> Result<()> {
        self.doctor_id = positive_integer("doctor_id", "Doctor ID", doctor_id)?;
        Ok(())
    }

    pub fn set_notes(&mut self, notes: Option<&str>) {
        self.notes = optional_text(notes);
    }
}

impl Record for Appointment {
    const KIND: EntityKind = EntityKind::Appointment;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn refresh_from(&mut self, row: Self) {
        self.appointment_date = row.appointment_date;
        self.patient_id = row.patient_id;
        self.doctor_id = row.doctor_id;
        self.notes = row.notes;
    }
}

impl fmt::Display for Appointment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "Appointment #{}: ", id)?,
            None => write!(f, "Appointment (unsaved): ")?,
        }
        write!(
            f,
            "{} patient {} with doctor {}",
            self.appointment_date.format(APPOINTMENT_DATE_FORMAT),
            self.patient_id,
            self.doctor_id
        )?;
        if let Some(notes) = &self.notes {
            write!(f, " - {}", notes)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::parse_appointment_date;

    #[test]
    fn test_zero_patient_id_rejected() {
        let date = parse_appointment_date("2024-05-01 10:00").unwrap();
        let err = Appointment::new(date, 0, 1, None).unwrap_err();
        assert_eq!(err.to_string(), "Patient ID must be a positive integer");
    }

    #[test]
    fn test_display_with_notes() {
        let date = parse_appointment_date("2024-05-01 10:00").unwrap();
        let appt = Appointment::from_row(5, date, 1, 2, Some("bring x-rays")).unwrap();
        assert_eq!(
            appt.to_string(),
            "Appointment #5: 2024-05-01 10:00 patient 1 with doctor 2 - bring x-rays"
        );
    }

    #[test]
    fn test_blank_notes_become_none() {
        let date = parse_appointment_date("2024-05-01 10:00").unwrap();
        let mut appt = Appointment::new(date, 1, 2, Some("")).unwrap();
        assert_eq!(appt.notes(), None);
        appt.set_notes(Some("follow-up"));
        assert_eq!(appt.notes(), Some("follow-up"));
    }
}
