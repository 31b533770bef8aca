pub mod appointment;
pub mod doctor;
pub mod medical_record;
pub mod patient;

pub use appointment::Appointment;
pub use doctor::Doctor;
pub use medical_record::MedicalRecord;
pub use patient::Patient;
