//! MedRec Core - validated hospital records and the in-memory entity registry
//!
//! This crate provides:
//! - Patient, Doctor, Appointment and MedicalRecord models whose fields are
//!   validated on every assignment
//! - The entity registry that keeps one live instance per primary key
//! - The error facility (domain errors plus stable error kinds and codes)
//! - The structured logging facility shared by every MedRec crate
//!
//! Persistence lives in `medrec-store`; nothing here touches SQL.

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod registry;
pub mod validation;

/// Re-exported so the logging macros resolve schema constants from any crate
pub use medrec_core_types as core_types;

pub use errors::{EntityKind, ExError, ExErrorKind, MedRecError, Result};
pub use model::{Appointment, Doctor, MedicalRecord, Patient};
pub use registry::{IdentityMap, Record, Registry, Shared};
