use std::io::{BufRead, Write};

use medrec_core::validation::{parse_appointment_date, parse_positive_integer, APPOINTMENT_DATE_FORMAT};
use medrec_core::{Appointment, Record, Shared};
use medrec_store::AppointmentRepo;

use super::menu::{VisitChoice, APPOINTMENT_MENU};
use super::{Shell, ShellResult};

/// Answer to the notes prompt that removes existing notes
const CLEAR_NOTES: &str = "-";

impl<R: BufRead, W: Write> Shell<'_, R, W> {
    pub(super) fn appointment_menu(&mut self) -> ShellResult<()> {
        loop {
            self.say(format_args!("\n{}", APPOINTMENT_MENU))?;
            let line = self.prompt("> ")?;
            match VisitChoice::parse(&line) {
                Some(VisitChoice::Back) => return Ok(()),
                Some(VisitChoice::List) => self.list_appointments()?,
                Some(VisitChoice::FindById) => self.find_appointment_by_id()?,
                Some(VisitChoice::FindByPatient) => self.list_appointments_by_patient()?,
                Some(VisitChoice::FindByDoctor) => self.list_appointments_by_doctor()?,
                Some(VisitChoice::Create) => self.create_appointment()?,
                Some(VisitChoice::Update) => self.update_appointment()?,
                Some(VisitChoice::Delete) => self.delete_appointment()?,
                None => self.say("Invalid choice")?,
            }
        }
    }

    fn list_appointments(&mut self) -> ShellResult<()> {
        match AppointmentRepo::get_all(&self.session.conn, &mut self.session.registry) {
            Ok(appointments) => self.print_all(&appointments, "No appointments found"),
            Err(e) => self.report("listing appointments", &e),
        }
    }

    fn select_appointment(&mut self) -> ShellResult<Option<Shared<Appointment>>> {
        let Some(id) = self.read_id("Enter the appointment's id: ")? else {
            return Ok(None);
        };
        match AppointmentRepo::find_by_id(&self.session.conn, &mut self.session.registry, id) {
            Ok(Some(appointment)) => Ok(Some(appointment)),
            Ok(None) => {
                self.say(format_args!("Appointment {} not found", id))?;
                Ok(None)
            }
            Err(e) => {
                self.report("loading appointment", &e)?;
                Ok(None)
            }
        }
    }

    fn find_appointment_by_id(&mut self) -> ShellResult<()> {
        if let Some(appointment) = self.select_appointment()? {
            let line = appointment.borrow().to_string();
            self.say(line)?;
        }
        Ok(())
    }

    fn list_appointments_by_patient(&mut self) -> ShellResult<()> {
        let Some(patient_id) = self.read_id("Enter the patient's id: ")? else {
            return Ok(());
        };
        match AppointmentRepo::find_by_patient_id(&self.session.conn, &mut self.session.registry, patient_id) {
            Ok(appointments) => self.print_all(&appointments, "No appointments found"),
            Err(e) => self.report("listing appointments", &e),
        }
    }

    fn list_appointments_by_doctor(&mut self) -> ShellResult<()> {
        let Some(doctor_id) = self.read_id("Enter the doctor's id: ")? else {
            return Ok(());
        };
        match AppointmentRepo::find_by_doctor_id(&self.session.conn, &mut self.session.registry, doctor_id) {
            Ok(appointments) => self.print_all(&appointments, "No appointments found"),
            Err(e) => self.report("listing appointments", &e),
        }
    }

    fn create_appointment(&mut self) -> ShellResult<()> {
        let raw_date = self.prompt("Enter the appointment date (YYYY-MM-DD HH:MM): ")?;
        let raw_patient = self.prompt("Enter the patient's id: ")?;
        let raw_doctor = self.prompt("Enter the doctor's id: ")?;
        let notes = self.prompt("Enter notes (optional): ")?;

        let fields = parse_appointment_date(&raw_date).and_then(|date| {
            let patient_id = parse_positive_integer("patient_id", "Patient ID", &raw_patient)?;
            let doctor_id = parse_positive_integer("doctor_id", "Doctor ID", &raw_doctor)?;
            Ok((date, patient_id, doctor_id))
        });
        let (date, patient_id, doctor_id) = match fields {
            Ok(fields) => fields,
            Err(e) => return self.say(format_args!("Error creating appointment: {}", e)),
        };

        match AppointmentRepo::create(
            &self.session.conn,
            &mut self.session.registry,
            date,
            patient_id,
            doctor_id,
            Some(notes.as_str()),
        ) {
            Ok(appointment) => {
                let line = appointment.borrow().to_string();
                self.say(format_args!("Success: {}", line))
            }
            Err(e) => self.report("creating appointment", &e),
        }
    }

    fn update_appointment(&mut self) -> ShellResult<()> {
        let Some(appointment) = self.select_appointment()? else {
            return Ok(());
        };
        let mut draft = appointment.borrow().clone();

        let current_date = draft.appointment_date().format(APPOINTMENT_DATE_FORMAT).to_string();
        if let Some(value) = self.prompt_update("Enter the new appointment date", &current_date)? {
            match parse_appointment_date(&value) {
                Ok(date) => draft.set_appointment_date(date),
                Err(e) => return self.say(format_args!("Error updating appointment: {}", e)),
            }
        }
        let current_patient = draft.patient_id().to_string();
        if let Some(value) = self.prompt_update("Enter the new patient id", &current_patient)? {
            let result = parse_positive_integer("patient_id", "Patient ID", &value)
                .and_then(|id| draft.set_patient_id(id));
            if let Err(e) = result {
                return self.say(format_args!("Error updating appointment: {}", e));
            }
        }
        let current_doctor = draft.doctor_id().to_string();
        if let Some(value) = self.prompt_update("Enter the new doctor id", &current_doctor)? {
            let result = parse_positive_integer("doctor_id", "Doctor ID", &value)
                .and_then(|id| draft.set_doctor_id(id));
            if let Err(e) = result {
                return self.say(format_args!("Error updating appointment: {}", e));
            }
        }
        let current_notes = draft.notes().unwrap_or_default().to_string();
        let label = format!("Enter new notes ('{}' clears them)", CLEAR_NOTES);
        if let Some(value) = self.prompt_update(&label, &current_notes)? {
            if value == CLEAR_NOTES {
                draft.set_notes(None);
            } else {
                draft.set_notes(Some(&value));
            }
        }

        if let Err(e) = AppointmentRepo::update(&self.session.conn, &draft) {
            return self.report("updating appointment", &e);
        }
        appointment.borrow_mut().refresh_from(draft);
        let line = appointment.borrow().to_string();
        self.say(format_args!("Success: {}", line))
    }

    fn delete_appointment(&mut self) -> ShellResult<()> {
        let Some(appointment) = self.select_appointment()? else {
            return Ok(());
        };
        let result = AppointmentRepo::delete(&self.session.conn, &appointment.borrow());
        match result {
            Ok(()) => {
                let id = appointment.borrow().id().unwrap_or_default();
                self.say(format_args!("Appointment {} deleted", id))
            }
            Err(e) => self.report("deleting appointment", &e),
        }
    }
}
