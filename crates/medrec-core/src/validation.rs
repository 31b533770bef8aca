//! Field validators shared by every record type
//!
//! Each validator returns the normalized value or an `InvalidField` error
//! whose message is fit to show to the person at the keyboard.

use chrono::{NaiveDate, NaiveDateTime};

use crate::errors::{MedRecError, Result};

/// Format used to store and display appointment times
pub const APPOINTMENT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";
/// Format used to store and display medical record dates
pub const RECORD_DATE_FORMAT: &str = "%Y-%m-%d";

const APPOINTMENT_DATE_INPUTS: [&str; 3] = ["%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Reject empty and whitespace-only strings; surrounding whitespace is dropped
pub fn non_empty_string(field: &'static str, label: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(MedRecError::invalid(
            field,
            format!("{} must be a non-empty string", label),
        ));
    }
    Ok(trimmed.to_string())
}

pub fn positive_integer(field: &'static str, label: &str, value: i64) -> Result<i64> {
    if value <= 0 {
        return Err(MedRecError::invalid(
            field,
            format!("{} must be a positive integer", label),
        ));
    }
    Ok(value)
}

/// Parse free text as a positive integer
pub fn parse_positive_integer(field: &'static str, label: &str, raw: &str) -> Result<i64> {
    let value: i64 = raw.trim().parse().map_err(|_| {
        MedRecError::invalid(field, format!("{} must be a positive integer", label))
    })?;
    positive_integer(field, label, value)
}

/// Optional text: blank means absent
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub fn parse_appointment_date(raw: &str) -> Result<NaiveDateTime> {
    let raw = raw.trim();
    APPOINTMENT_DATE_INPUTS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| {
            MedRecError::invalid(
                "appointment_date",
                "Appointment date must look like YYYY-MM-DD HH:MM",
            )
        })
}

pub fn parse_record_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), RECORD_DATE_FORMAT).map_err(|_| {
        MedRecError::invalid("record_date", "Record date must look like YYYY-MM-DD")
    })
}
