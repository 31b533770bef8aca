//! Seed Format v0 schema
//!
//! Rows refer to each other by `key`, a label local to the seed file; the
//! database ids are assigned on import.

use serde::{Deserialize, Serialize};

/// Top-level seed file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedV0 {
    /// Schema version (must be 0 for this format)
    pub schema_version: u32,

    #[serde(default)]
    pub doctors: Vec<SeedDoctor>,

    #[serde(default)]
    pub patients: Vec<SeedPatient>,

    #[serde(default)]
    pub appointments: Vec<SeedAppointment>,

    #[serde(default)]
    pub medical_records: Vec<SeedMedicalRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedDoctor {
    pub key: String,
    pub first_name: String,
    pub last_name: String,
    pub specialty: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedPatient {
    pub key: String,
    pub first_name: String,
    pub last_name: String,
    pub age: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedAppointment {
    /// Key of a patient in the same file
    pub patient: String,

    /// Key of a doctor in the same file
    pub doctor: String,

    /// `YYYY-MM-DD HH:MM`
    pub date: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedMedicalRecord {
    pub patient: String,
    pub doctor: String,

    /// `YYYY-MM-DD`
    pub date: String,

    pub diagnosis: String,
    pub treatment: String,
}
