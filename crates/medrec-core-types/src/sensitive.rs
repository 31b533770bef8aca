//! Redaction marker for patient-identifying values
//!
//! Names and free-text clinical notes must never reach a log sink. Wrapping a
//! value in `Sensitive<T>` makes both `Debug` and `Display` print a fixed
//! placeholder, so it is safe to hand to `tracing` fields.

use std::fmt;

const REDACTED: &str = "[redacted]";

/// Wrapper whose formatting never reveals the inner value
///
/// ```
/// use medrec_core_types::Sensitive;
///
/// let name = Sensitive::new("Jane Smith");
/// assert_eq!(format!("{}", name), "[redacted]");
/// assert_eq!(name.expose(), &"Jane Smith");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Borrow the wrapped value
    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for Sensitive<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}
