//! Interactive numbered-menu shell
//!
//! The shell reads one line per prompt from any `BufRead` and writes to any
//! `Write`, so tests drive it with in-memory buffers. Domain errors are
//! printed and the loop carries on; only terminal I/O failures end it early.
//! End of input anywhere behaves like choosing exit.

mod appointments;
mod doctors;
mod medical_records;
pub mod menu;
mod patients;

use std::fmt;
use std::io::{self, BufRead, Write};

use medrec_core::validation::parse_positive_integer;
use medrec_core::{ExError, Shared};
use medrec_store::Session;
use thiserror::Error;

use menu::{MainChoice, MAIN_MENU};

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("end of input")]
    EndOfInput,

    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

pub type ShellResult<T> = Result<T, ShellError>;

pub struct Shell<'s, R, W> {
    session: &'s mut Session,
    input: R,
    output: W,
}

impl<'s, R: BufRead, W: Write> Shell<'s, R, W> {
    pub fn new(session: &'s mut Session, input: R, output: W) -> Self {
        Self {
            session,
            input,
            output,
        }
    }

    /// Run until the user exits or input ends
    ///
    /// # Errors
    ///
    /// Only when reading or writing the terminal fails.
    pub fn run(mut self) -> io::Result<()> {
        match self.main_loop() {
            Ok(()) | Err(ShellError::EndOfInput) => {
                writeln!(self.output, "Goodbye!")?;
                self.output.flush()
            }
            Err(ShellError::Io(e)) => Err(e),
        }
    }

    fn main_loop(&mut self) -> ShellResult<()> {
        loop {
            self.say(format_args!("\n{}", MAIN_MENU))?;
            let line = self.prompt("> ")?;
            match MainChoice::parse(&line) {
                Some(MainChoice::Exit) => return Ok(()),
                Some(MainChoice::ListPatients) => self.list_patients()?,
                Some(MainChoice::Patients) => self.patient_menu()?,
                Some(MainChoice::Doctors) => self.doctor_menu()?,
                Some(MainChoice::Appointments) => self.appointment_menu()?,
                Some(MainChoice::MedicalRecords) => self.medical_record_menu()?,
                None => self.say("Invalid choice")?,
            }
        }
    }

    /// Print `label` and read one line without its line ending
    fn prompt(&mut self, label: &str) -> ShellResult<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ShellError::EndOfInput);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Prompt showing the current value; `None` when the answer is blank
    fn prompt_update(&mut self, label: &str, current: &str) -> ShellResult<Option<String>> {
        let raw = self.prompt(&format!("{} [{}]: ", label, current))?;
        let raw = raw.trim();
        Ok((!raw.is_empty()).then(|| raw.to_string()))
    }

    /// Prompt for an id; an invalid answer is reported and yields `None`
    fn read_id(&mut self, label: &str) -> ShellResult<Option<i64>> {
        let raw = self.prompt(label)?;
        match parse_positive_integer("id", "ID", &raw) {
            Ok(id) => Ok(Some(id)),
            Err(e) => {
                self.say(e)?;
                Ok(None)
            }
        }
    }

    fn say(&mut self, message: impl fmt::Display) -> ShellResult<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    fn report(&mut self, action: &str, err: &ExError) -> ShellResult<()> {
        if err.message().is_empty() {
            self.say(format_args!("Error {}: {}", action, err))
        } else {
            self.say(format_args!("Error {}: {}", action, err.message()))
        }
    }

    fn print_all<T: fmt::Display>(&mut self, items: &[Shared<T>], empty: &str) -> ShellResult<()> {
        if items.is_empty() {
            return self.say(empty);
        }
        for item in items {
            let line = item.borrow().to_string();
            self.say(line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Feed `input` to a fresh in-memory session and return everything printed
    pub(super) fn run_script(session: &mut Session, input: &str) -> String {
        let mut output = Vec::new();
        Shell::new(session, input.as_bytes(), &mut output)
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_exit_choice() {
        let mut session = Session::open_in_memory().unwrap();
        let out = run_script(&mut session, "0\n");
        assert!(out.contains("--- Hospital Management System ---"));
        assert!(out.ends_with("Goodbye!\n"));
    }

    #[test]
    fn test_end_of_input_exits() {
        let mut session = Session::open_in_memory().unwrap();
        let out = run_script(&mut session, "");
        assert!(out.ends_with("Goodbye!\n"));
    }

    #[test]
    fn test_invalid_choice_reloops() {
        let mut session = Session::open_in_memory().unwrap();
        let out = run_script(&mut session, "9\nhello\n0\n");
        assert_eq!(out.matches("Invalid choice").count(), 2);
        assert_eq!(out.matches("0. Exit the program").count(), 3);
    }

    #[test]
    fn test_list_patients_when_empty() {
        let mut session = Session::open_in_memory().unwrap();
        let out = run_script(&mut session, "1\n0\n");
        assert!(out.contains("No patients found"));
    }
}
