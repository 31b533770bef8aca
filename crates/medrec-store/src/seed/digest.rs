//! Seed digest canonicalization
//!
//! Computes a stable SHA256 digest of a seed so two files that list the same
//! rows in a different order report the same digest.

use crate::errors::Result;
use crate::seed::format_v0::SeedV0;
use medrec_core::{ExError, ExErrorKind};
use sha2::{Digest, Sha256};

/// Compute a stable digest for a seed
///
/// Returns a SHA256 hex digest of the canonicalized seed serialized as JSON.
pub fn compute_seed_digest(seed: &SeedV0) -> Result<String> {
    let canonical = canonicalize_seed(seed);

    let json = serde_json::to_string(&canonical).map_err(|e| {
        ExError::new(ExErrorKind::Internal)
            .with_op("seed_digest")
            .with_message(format!("Failed to serialize canonical seed: {}", e))
    })?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

/// Sort every list by its natural key
fn canonicalize_seed(seed: &SeedV0) -> SeedV0 {
    let mut canonical = seed.clone();
    canonical.doctors.sort_by(|a, b| a.key.cmp(&b.key));
    canonical.patients.sort_by(|a, b| a.key.cmp(&b.key));
    canonical.appointments.sort_by(|a, b| {
        (&a.date, &a.patient, &a.doctor, &a.notes).cmp(&(&b.date, &b.patient, &b.doctor, &b.notes))
    });
    canonical.medical_records.sort_by(|a, b| {
        (&a.date, &a.patient, &a.doctor, &a.diagnosis, &a.treatment)
            .cmp(&(&b.date, &b.patient, &b.doctor, &b.diagnosis, &b.treatment))
    });
    canonical
}
