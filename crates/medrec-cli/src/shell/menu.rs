//! Menu text and choice parsing
//!
//! Choices are matched exactly after trimming surrounding whitespace.

pub const MAIN_MENU: &str = "\
--- Hospital Management System ---
0. Exit the program
1. List all patients
2. Manage patients
3. Manage doctors
4. Manage appointments
5. Manage medical records";

pub const PATIENT_MENU: &str = "\
--- Patients ---
0. Back
1. List all patients
2. Find patient by id
3. Find patient by name
4. Create patient
5. Update patient
6. Delete patient
7. List a patient's medical records
8. List a patient's appointments";

pub const DOCTOR_MENU: &str = "\
--- Doctors ---
0. Back
1. List all doctors
2. Find doctor by id
3. Find doctor by name
4. Find doctors by specialty
5. Create doctor
6. Update doctor
7. Delete doctor
8. List a doctor's medical records
9. List a doctor's appointments";

pub const APPOINTMENT_MENU: &str = "\
--- Appointments ---
0. Back
1. List all appointments
2. Find appointment by id
3. List appointments of a patient
4. List appointments of a doctor
5. Create appointment
6. Update appointment
7. Delete appointment";

pub const MEDICAL_RECORD_MENU: &str = "\
--- Medical Records ---
0. Back
1. List all medical records
2. Find medical record by id
3. List medical records of a patient
4. List medical records of a doctor
5. Create medical record
6. Update medical record
7. Delete medical record";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainChoice {
    Exit,
    ListPatients,
    Patients,
    Doctors,
    Appointments,
    MedicalRecords,
}

impl MainChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "0" => Some(Self::Exit),
            "1" => Some(Self::ListPatients),
            "2" => Some(Self::Patients),
            "3" => Some(Self::Doctors),
            "4" => Some(Self::Appointments),
            "5" => Some(Self::MedicalRecords),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatientChoice {
    Back,
    List,
    FindById,
    FindByName,
    Create,
    Update,
    Delete,
    MedicalRecords,
    Appointments,
}

impl PatientChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "0" => Some(Self::Back),
            "1" => Some(Self::List),
            "2" => Some(Self::FindById),
            "3" => Some(Self::FindByName),
            "4" => Some(Self::Create),
            "5" => Some(Self::Update),
            "6" => Some(Self::Delete),
            "7" => Some(Self::MedicalRecords),
            "8" => Some(Self::Appointments),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoctorChoice {
    Back,
    List,
    FindById,
    FindByName,
    FindBySpecialty,
    Create,
    Update,
    Delete,
    MedicalRecords,
    Appointments,
}

impl DoctorChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "0" => Some(Self::Back),
            "1" => Some(Self::List),
            "2" => Some(Self::FindById),
            "3" => Some(Self::FindByName),
            "4" => Some(Self::FindBySpecialty),
            "5" => Some(Self::Create),
            "6" => Some(Self::Update),
            "7" => Some(Self::Delete),
            "8" => Some(Self::MedicalRecords),
            "9" => Some(Self::Appointments),
            _ => None,
        }
    }
}

/// Appointments and medical records share one sub-menu layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitChoice {
    Back,
    List,
    FindById,
    FindByPatient,
    FindByDoctor,
    Create,
    Update,
    Delete,
}

impl VisitChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "0" => Some(Self::Back),
            "1" => Some(Self::List),
            "2" => Some(Self::FindById),
            "3" => Some(Self::FindByPatient),
            "4" => Some(Self::FindByDoctor),
            "5" => Some(Self::Create),
            "6" => Some(Self::Update),
            "7" => Some(Self::Delete),
            _ => None,
        }
    }
}
