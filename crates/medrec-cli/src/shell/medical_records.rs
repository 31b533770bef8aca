use std::io::{BufRead, Write};

use medrec_core::validation::{parse_positive_integer, parse_record_date, RECORD_DATE_FORMAT};
use medrec_core::{MedicalRecord, Record, Shared};
use medrec_store::MedicalRecordRepo;

use super::menu::{VisitChoice, MEDICAL_RECORD_MENU};
use super::{Shell, ShellResult};

impl<R: BufRead, W: Write> Shell<'_, R, W> {
    pub(super) fn medical_record_menu(&mut self) -> ShellResult<()> {
        loop {
            self.say(format_args!("\n{}", MEDICAL_RECORD_MENU))?;
            let line = self.prompt("> ")?;
            match VisitChoice::parse(&line) {
                Some(VisitChoice::Back) => return Ok(()),
                Some(VisitChoice::List) => self.list_medical_records()?,
                Some(VisitChoice::FindById) => self.find_medical_record_by_id()?,
                Some(VisitChoice::FindByPatient) => self.list_medical_records_by_patient()?,
                Some(VisitChoice::FindByDoctor) => self.list_medical_records_by_doctor()?,
                Some(VisitChoice::Create) => self.create_medical_record()?,
                Some(VisitChoice::Update) => self.update_medical_record()?,
                Some(VisitChoice::Delete) => self.delete_medical_record()?,
                None => self.say("Invalid choice")?,
            }
        }
    }

    fn list_medical_records(&mut self) -> ShellResult<()> {
        match MedicalRecordRepo::get_all(&self.session.conn, &mut self.session.registry) {
            Ok(records) => self.print_all(&records, "No medical records found"),
            Err(e) => self.report("listing medical records", &e),
        }
    }

    fn select_medical_record(&mut self) -> ShellResult<Option<Shared<MedicalRecord>>> {
        let Some(id) = self.read_id("Enter the medical record's id: ")? else {
            return Ok(None);
        };
        match MedicalRecordRepo::find_by_id(&self.session.conn, &mut self.session.registry, id) {
            Ok(Some(record)) => Ok(Some(record)),
            Ok(None) => {
                self.say(format_args!("Medical record {} not found", id))?;
                Ok(None)
            }
            Err(e) => {
                self.report("loading medical record", &e)?;
                Ok(None)
            }
        }
    }

    fn find_medical_record_by_id(&mut self) -> ShellResult<()> {
        if let Some(record) = self.select_medical_record()? {
            let line = record.borrow().to_string();
            self.say(line)?;
        }
        Ok(())
    }

    fn list_medical_records_by_patient(&mut self) -> ShellResult<()> {
        let Some(patient_id) = self.read_id("Enter the patient's id: ")? else {
            return Ok(());
        };
        match MedicalRecordRepo::find_by_patient_id(&self.session.conn, &mut self.session.registry, patient_id) {
            Ok(records) => self.print_all(&records, "No medical records found"),
            Err(e) => self.report("listing medical records", &e),
        }
    }

    fn list_medical_records_by_doctor(&mut self) -> ShellResult<()> {
        let Some(doctor_id) = self.read_id("Enter the doctor's id: ")? else {
            return Ok(());
        };
        match MedicalRecordRepo::find_by_doctor_id(&self.session.conn, &mut self.session.registry, doctor_id) {
            Ok(records) => self.print_all(&records, "No medical records found"),
            Err(e) => self.report("listing medical records", &e),
        }
    }

    fn create_medical_record(&mut self) -> ShellResult<()> {
        let raw_patient = self.prompt("Enter the patient's id: ")?;
        let raw_doctor = self.prompt("Enter the doctor's id: ")?;
        let raw_date = self.prompt("Enter the record date (YYYY-MM-DD): ")?;
        let diagnosis = self.prompt("Enter the diagnosis: ")?;
        let treatment = self.prompt("Enter the treatment: ")?;

        let fields = parse_positive_integer("patient_id", "Patient ID", &raw_patient).and_then(|patient_id| {
            let doctor_id = parse_positive_integer("doctor_id", "Doctor ID", &raw_doctor)?;
            let date = parse_record_date(&raw_date)?;
            Ok((patient_id, doctor_id, date))
        });
        let (patient_id, doctor_id, date) = match fields {
            Ok(fields) => fields,
            Err(e) => return self.say(format_args!("Error creating medical record: {}", e)),
        };

        match MedicalRecordRepo::create(
            &self.session.conn,
            &mut self.session.registry,
            patient_id,
            doctor_id,
            date,
            &diagnosis,
            &treatment,
        ) {
            Ok(record) => {
                let line = record.borrow().to_string();
                self.say(format_args!("Success: {}", line))
            }
            Err(e) => self.report("creating medical record", &e),
        }
    }

    fn update_medical_record(&mut self) -> ShellResult<()> {
        let Some(record) = self.select_medical_record()? else {
            return Ok(());
        };
        let mut draft = record.borrow().clone();

        let current_patient = draft.patient_id().to_string();
        if let Some(value) = self.prompt_update("Enter the new patient id", &current_patient)? {
            let result = parse_positive_integer("patient_id", "Patient ID", &value)
                .and_then(|id| draft.set_patient_id(id));
            if let Err(e) = result {
                return self.say(format_args!("Error updating medical record: {}", e));
            }
        }
        let current_doctor = draft.doctor_id().to_string();
        if let Some(value) = self.prompt_update("Enter the new doctor id", &current_doctor)? {
            let result = parse_positive_integer("doctor_id", "Doctor ID", &value)
                .and_then(|id| draft.set_doctor_id(id));
            if let Err(e) = result {
                return self.say(format_args!("Error updating medical record: {}", e));
            }
        }
        let current_date = draft.record_date().format(RECORD_DATE_FORMAT).to_string();
        if let Some(value) = self.prompt_update("Enter the new record date", &current_date)? {
            match parse_record_date(&value) {
                Ok(date) => draft.set_record_date(date),
                Err(e) => return self.say(format_args!("Error updating medical record: {}", e)),
            }
        }
        if let Some(value) = self.prompt_update("Enter the new diagnosis", draft.diagnosis())? {
            if let Err(e) = draft.set_diagnosis(&value) {
                return self.say(format_args!("Error updating medical record: {}", e));
            }
        }
        if let Some(value) = self.prompt_update("Enter the new treatment", draft.treatment())? {
            if let Err(e) = draft.set_treatment(&value) {
                return self.say(format_args!("Error updating medical record: {}", e));
            }
        }

        if let Err(e) = MedicalRecordRepo::update(&self.session.conn, &draft) {
            return self.report("updating medical record", &e);
        }
        record.borrow_mut().refresh_from(draft);
        let line = record.borrow().to_string();
        self.say(format_args!("Success: {}", line))
    }

    fn delete_medical_record(&mut self) -> ShellResult<()> {
        let Some(record) = self.select_medical_record()? else {
            return Ok(());
        };
        let result = MedicalRecordRepo::delete(&self.session.conn, &record.borrow());
        match result {
            Ok(()) => {
                let id = record.borrow().id().unwrap_or_default();
                self.say(format_args!("Medical record {} deleted", id))
            }
            Err(e) => self.report("deleting medical record", &e),
        }
    }
}
