//! MedRec Store - SQLite persistence for hospital records
//!
//! Provides:
//! - Connection setup and the per-session `Session` (connection + registry)
//! - Embedded, checksummed schema migrations
//! - Row mapping and persistence operations for every record type
//! - YAML seed parsing and import

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;
pub mod schema;
pub mod seed;
pub mod session;

pub use errors::Result;
pub use repo::{AppointmentRepo, DoctorRepo, MedicalRecordRepo, PatientRepo};
pub use session::Session;
