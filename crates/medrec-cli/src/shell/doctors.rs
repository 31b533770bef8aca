use std::io::{BufRead, Write};

use medrec_core::{Doctor, Record, Shared};
use medrec_store::DoctorRepo;

use super::menu::{DoctorChoice, DOCTOR_MENU};
use super::{Shell, ShellResult};

impl<R: BufRead, W: Write> Shell<'_, R, W> {
    pub(super) fn doctor_menu(&mut self) -> ShellResult<()> {
        loop {
            self.say(format_args!("\n{}", DOCTOR_MENU))?;
            let line = self.prompt("> ")?;
            match DoctorChoice::parse(&line) {
                Some(DoctorChoice::Back) => return Ok(()),
                Some(DoctorChoice::List) => self.list_doctors()?,
                Some(DoctorChoice::FindById) => self.find_doctor_by_id()?,
                Some(DoctorChoice::FindByName) => self.find_doctor_by_name()?,
                Some(DoctorChoice::FindBySpecialty) => self.find_doctors_by_specialty()?,
                Some(DoctorChoice::Create) => self.create_doctor()?,
                Some(DoctorChoice::Update) => self.update_doctor()?,
                Some(DoctorChoice::Delete) => self.delete_doctor()?,
                Some(DoctorChoice::MedicalRecords) => self.list_doctor_medical_records()?,
                Some(DoctorChoice::Appointments) => self.list_doctor_appointments()?,
                None => self.say("Invalid choice")?,
            }
        }
    }

    fn list_doctors(&mut self) -> ShellResult<()> {
        match DoctorRepo::get_all(&self.session.conn, &mut self.session.registry) {
            Ok(doctors) => self.print_all(&doctors, "No doctors found"),
            Err(e) => self.report("listing doctors", &e),
        }
    }

    fn select_doctor(&mut self) -> ShellResult<Option<Shared<Doctor>>> {
        let Some(id) = self.read_id("Enter the doctor's id: ")? else {
            return Ok(None);
        };
        match DoctorRepo::find_by_id(&self.session.conn, &mut self.session.registry, id) {
            Ok(Some(doctor)) => Ok(Some(doctor)),
            Ok(None) => {
                self.say(format_args!("Doctor {} not found", id))?;
                Ok(None)
            }
            Err(e) => {
                self.report("loading doctor", &e)?;
                Ok(None)
            }
        }
    }

    fn find_doctor_by_id(&mut self) -> ShellResult<()> {
        if let Some(doctor) = self.select_doctor()? {
            let line = doctor.borrow().to_string();
            self.say(line)?;
        }
        Ok(())
    }

    fn find_doctor_by_name(&mut self) -> ShellResult<()> {
        let first_name = self.prompt("Enter the doctor's first name: ")?;
        let last_name = self.prompt("Enter the doctor's last name: ")?;
        match DoctorRepo::find_by_name(
            &self.session.conn,
            &mut self.session.registry,
            &first_name,
            &last_name,
        ) {
            Ok(Some(doctor)) => {
                let line = doctor.borrow().to_string();
                self.say(line)
            }
            Ok(None) => self.say(format_args!(
                "Doctor {} {} not found",
                first_name.trim(),
                last_name.trim()
            )),
            Err(e) => self.report("finding doctor", &e),
        }
    }

    fn find_doctors_by_specialty(&mut self) -> ShellResult<()> {
        let specialty = self.prompt("Enter the specialty: ")?;
        match DoctorRepo::find_by_specialty(&self.session.conn, &mut self.session.registry, &specialty) {
            Ok(doctors) => self.print_all(&doctors, "No doctors with that specialty"),
            Err(e) => self.report("finding doctors", &e),
        }
    }

    fn create_doctor(&mut self) -> ShellResult<()> {
        let first_name = self.prompt("Enter the doctor's first name: ")?;
        let last_name = self.prompt("Enter the doctor's last name: ")?;
        let specialty = self.prompt("Enter the doctor's specialty: ")?;

        match DoctorRepo::create(
            &self.session.conn,
            &mut self.session.registry,
            &first_name,
            &last_name,
            &specialty,
        ) {
            Ok(doctor) => {
                let line = doctor.borrow().to_string();
                self.say(format_args!("Success: {}", line))
            }
            Err(e) => self.report("creating doctor", &e),
        }
    }

    fn update_doctor(&mut self) -> ShellResult<()> {
        let Some(doctor) = self.select_doctor()? else {
            return Ok(());
        };
        let mut draft = doctor.borrow().clone();

        if let Some(value) = self.prompt_update("Enter the doctor's new first name", draft.first_name())? {
            if let Err(e) = draft.set_first_name(&value) {
                return self.say(format_args!("Error updating doctor: {}", e));
            }
        }
        if let Some(value) = self.prompt_update("Enter the doctor's new last name", draft.last_name())? {
            if let Err(e) = draft.set_last_name(&value) {
                return self.say(format_args!("Error updating doctor: {}", e));
            }
        }
        if let Some(value) = self.prompt_update("Enter the doctor's new specialty", draft.specialty())? {
            if let Err(e) = draft.set_specialty(&value) {
                return self.say(format_args!("Error updating doctor: {}", e));
            }
        }

        if let Err(e) = DoctorRepo::update(&self.session.conn, &draft) {
            return self.report("updating doctor", &e);
        }
        doctor.borrow_mut().refresh_from(draft);
        let line = doctor.borrow().to_string();
        self.say(format_args!("Success: {}", line))
    }

    fn delete_doctor(&mut self) -> ShellResult<()> {
        let Some(doctor) = self.select_doctor()? else {
            return Ok(());
        };
        let result = DoctorRepo::delete(&self.session.conn, &doctor.borrow());
        match result {
            Ok(()) => {
                let id = doctor.borrow().id().unwrap_or_default();
                self.say(format_args!("Doctor {} deleted", id))
            }
            Err(e) => self.report("deleting doctor", &e),
        }
    }

    fn list_doctor_medical_records(&mut self) -> ShellResult<()> {
        if let Some(doctor) = self.select_doctor()? {
            let records = doctor.borrow().medical_records().to_vec();
            self.print_all(&records, "No medical records for this doctor")?;
        }
        Ok(())
    }

    fn list_doctor_appointments(&mut self) -> ShellResult<()> {
        if let Some(doctor) = self.select_doctor()? {
            let appointments = doctor.borrow().appointments().to_vec();
            self.print_all(&appointments, "No appointments for this doctor")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::run_script;
    use medrec_store::{DoctorRepo, Session};

    #[test]
    fn test_create_and_find_by_specialty() {
        let mut session = Session::open_in_memory().unwrap();
        let out = run_script(
            &mut session,
            "3\n5\nGregory\nHouse\nDiagnostics\n4\ndiagnostics\n0\n0\n",
        );

        assert!(out.contains("Success: Doctor #1: Dr. Gregory House (Diagnostics)"));
        assert_eq!(out.matches("Doctor #1: Dr. Gregory House").count(), 2);
    }

    #[test]
    fn test_update_specialty() {
        let mut session = Session::open_in_memory().unwrap();
        DoctorRepo::create(&session.conn, &mut session.registry, "Meredith", "Grey", "Surgery")
            .unwrap();

        let out = run_script(&mut session, "3\n6\n1\n\n\nGeneral Surgery\n0\n0\n");

        assert!(out.contains("Success: Doctor #1: Dr. Meredith Grey (General Surgery)"));
    }

    #[test]
    fn test_unknown_doctor_id() {
        let mut session = Session::open_in_memory().unwrap();
        let out = run_script(&mut session, "3\n2\n7\n2\nabc\n0\n0\n");

        assert!(out.contains("Doctor 7 not found"));
        assert!(out.contains("ID must be a positive integer"));
    }
}
