use std::io::{BufRead, Write};

use medrec_core::validation::parse_positive_integer;
use medrec_core::{Patient, Record, Shared};
use medrec_store::PatientRepo;

use super::menu::{PatientChoice, PATIENT_MENU};
use super::{Shell, ShellResult};

impl<R: BufRead, W: Write> Shell<'_, R, W> {
    pub(super) fn patient_menu(&mut self) -> ShellResult<()> {
        loop {
            self.say(format_args!("\n{}", PATIENT_MENU))?;
            let line = self.prompt("> ")?;
            match PatientChoice::parse(&line) {
                Some(PatientChoice::Back) => return Ok(()),
                Some(PatientChoice::List) => self.list_patients()?,
                Some(PatientChoice::FindById) => self.find_patient_by_id()?,
                Some(PatientChoice::FindByName) => self.find_patient_by_name()?,
                Some(PatientChoice::Create) => self.create_patient()?,
                Some(PatientChoice::Update) => self.update_patient()?,
                Some(PatientChoice::Delete) => self.delete_patient()?,
                Some(PatientChoice::MedicalRecords) => self.list_patient_medical_records()?,
                Some(PatientChoice::Appointments) => self.list_patient_appointments()?,
                None => self.say("Invalid choice")?,
            }
        }
    }

    pub(super) fn list_patients(&mut self) -> ShellResult<()> {
        match PatientRepo::get_all(&self.session.conn, &mut self.session.registry) {
            Ok(patients) => self.print_all(&patients, "No patients found"),
            Err(e) => self.report("listing patients", &e),
        }
    }

    /// Prompt for an id and load that patient, reporting when it is missing
    fn select_patient(&mut self) -> ShellResult<Option<Shared<Patient>>> {
        let Some(id) = self.read_id("Enter the patient's id: ")? else {
            return Ok(None);
        };
        match PatientRepo::find_by_id(&self.session.conn, &mut self.session.registry, id) {
            Ok(Some(patient)) => Ok(Some(patient)),
            Ok(None) => {
                self.say(format_args!("Patient {} not found", id))?;
                Ok(None)
            }
            Err(e) => {
                self.report("loading patient", &e)?;
                Ok(None)
            }
        }
    }

    fn find_patient_by_id(&mut self) -> ShellResult<()> {
        if let Some(patient) = self.select_patient()? {
            let line = patient.borrow().to_string();
            self.say(line)?;
        }
        Ok(())
    }

    fn find_patient_by_name(&mut self) -> ShellResult<()> {
        let first_name = self.prompt("Enter the patient's first name: ")?;
        let last_name = self.prompt("Enter the patient's last name: ")?;
        match PatientRepo::find_by_name(
            &self.session.conn,
            &mut self.session.registry,
            &first_name,
            &last_name,
        ) {
            Ok(Some(patient)) => {
                let line = patient.borrow().to_string();
                self.say(line)
            }
            Ok(None) => self.say(format_args!(
                "Patient {} {} not found",
                first_name.trim(),
                last_name.trim()
            )),
            Err(e) => self.report("finding patient", &e),
        }
    }

    fn create_patient(&mut self) -> ShellResult<()> {
        let first_name = self.prompt("Enter the patient's first name: ")?;
        let last_name = self.prompt("Enter the patient's last name: ")?;
        let raw_age = self.prompt("Enter the patient's age: ")?;
        let age = match parse_positive_integer("age", "Age", &raw_age) {
            Ok(age) => age,
            Err(e) => return self.say(format_args!("Error creating patient: {}", e)),
        };

        match PatientRepo::create(
            &self.session.conn,
            &mut self.session.registry,
            &first_name,
            &last_name,
            age,
        ) {
            Ok(patient) => {
                let line = patient.borrow().to_string();
                self.say(format_args!("Success: {}", line))
            }
            Err(e) => self.report("creating patient", &e),
        }
    }

    fn update_patient(&mut self) -> ShellResult<()> {
        let Some(patient) = self.select_patient()? else {
            return Ok(());
        };
        let mut draft = patient.borrow().clone();

        if let Some(value) = self.prompt_update("Enter the patient's new first name", draft.first_name())? {
            if let Err(e) = draft.set_first_name(&value) {
                return self.say(format_args!("Error updating patient: {}", e));
            }
        }
        if let Some(value) = self.prompt_update("Enter the patient's new last name", draft.last_name())? {
            if let Err(e) = draft.set_last_name(&value) {
                return self.say(format_args!("Error updating patient: {}", e));
            }
        }
        let current_age = draft.age().to_string();
        if let Some(value) = self.prompt_update("Enter the patient's new age", &current_age)? {
            let result = parse_positive_integer("age", "Age", &value).and_then(|age| draft.set_age(age));
            if let Err(e) = result {
                return self.say(format_args!("Error updating patient: {}", e));
            }
        }

        if let Err(e) = PatientRepo::update(&self.session.conn, &draft) {
            return self.report("updating patient", &e);
        }
        patient.borrow_mut().refresh_from(draft);
        let line = patient.borrow().to_string();
        self.say(format_args!("Success: {}", line))
    }

    fn delete_patient(&mut self) -> ShellResult<()> {
        let Some(patient) = self.select_patient()? else {
            return Ok(());
        };
        let result = PatientRepo::delete(&self.session.conn, &patient.borrow());
        match result {
            Ok(()) => {
                let id = patient.borrow().id().unwrap_or_default();
                self.say(format_args!("Patient {} deleted", id))
            }
            Err(e) => self.report("deleting patient", &e),
        }
    }

    fn list_patient_medical_records(&mut self) -> ShellResult<()> {
        if let Some(patient) = self.select_patient()? {
            let records = patient.borrow().medical_records().to_vec();
            self.print_all(&records, "No medical records for this patient")?;
        }
        Ok(())
    }

    fn list_patient_appointments(&mut self) -> ShellResult<()> {
        if let Some(patient) = self.select_patient()? {
            let appointments = patient.borrow().appointments().to_vec();
            self.print_all(&appointments, "No appointments for this patient")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::run_script;
    use medrec_store::{PatientRepo, Session};

    #[test]
    fn test_create_and_list_patient() {
        let mut session = Session::open_in_memory().unwrap();
        let out = run_script(&mut session, "2\n4\nJohn\nDoe\n30\n1\n0\n0\n");

        assert!(out.contains("Success: Patient #1: John Doe, age 30"));
        assert!(out.contains("Patient #1: John Doe, age 30 (0 medical records, 0 appointments)"));
    }

    #[test]
    fn test_create_patient_validation_error() {
        let mut session = Session::open_in_memory().unwrap();
        let out = run_script(&mut session, "2\n4\n \nDoe\n30\n0\n0\n");

        assert!(out.contains("Error creating patient: First name must be a non-empty string"));
        assert!(PatientRepo::get_all(&session.conn, &mut session.registry)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_create_patient_non_numeric_age() {
        let mut session = Session::open_in_memory().unwrap();
        let out = run_script(&mut session, "2\n4\nJohn\nDoe\nthirty\n0\n0\n");

        assert!(out.contains("Error creating patient: Age must be a positive integer"));
    }

    #[test]
    fn test_update_keeps_blank_answers() {
        let mut session = Session::open_in_memory().unwrap();
        let patient =
            PatientRepo::create(&session.conn, &mut session.registry, "John", "Doe", 30).unwrap();

        let out = run_script(&mut session, "2\n5\n1\n\nDough\n31\n0\n0\n");

        assert!(out.contains("Enter the patient's new first name [John]: "));
        assert!(out.contains("Success: Patient #1: John Dough, age 31"));
        assert_eq!(patient.borrow().last_name(), "Dough");
        assert_eq!(patient.borrow().age(), 31);
    }

    #[test]
    fn test_invalid_update_leaves_record_alone() {
        let mut session = Session::open_in_memory().unwrap();
        let patient =
            PatientRepo::create(&session.conn, &mut session.registry, "John", "Doe", 30).unwrap();

        let out = run_script(&mut session, "2\n5\n1\nJack\n\n-4\n0\n0\n");

        assert!(out.contains("Error updating patient: Age must be a positive integer"));
        assert_eq!(patient.borrow().first_name(), "John");
    }

    #[test]
    fn test_delete_and_missing_patient() {
        let mut session = Session::open_in_memory().unwrap();
        PatientRepo::create(&session.conn, &mut session.registry, "John", "Doe", 30).unwrap();

        let out = run_script(&mut session, "2\n6\n1\n2\n1\n0\n0\n");

        assert!(out.contains("Patient 1 deleted"));
        assert!(out.contains("Patient 1 not found"));
    }

    #[test]
    fn test_find_by_name_not_found() {
        let mut session = Session::open_in_memory().unwrap();
        let out = run_script(&mut session, "2\n3\nJim\nBeam\n0\n0\n");

        assert!(out.contains("Patient Jim Beam not found"));
    }
}
