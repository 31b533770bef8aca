use medrec_core_types::schema;
use std::fmt;
use thiserror::Error;

/// Result type alias using MedRecError
pub type Result<T> = std::result::Result<T, MedRecError>;

/// The four record types persisted by MedRec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Patient,
    Doctor,
    Appointment,
    MedicalRecord,
}

impl EntityKind {
    /// Stable lower-case label used in log fields
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Patient => schema::ENTITY_PATIENT,
            EntityKind::Doctor => schema::ENTITY_DOCTOR,
            EntityKind::Appointment => schema::ENTITY_APPOINTMENT,
            EntityKind::MedicalRecord => schema::ENTITY_MEDICAL_RECORD,
        }
    }

    /// Name of the table holding rows of this kind
    pub fn table(&self) -> &'static str {
        match self {
            EntityKind::Patient => "patients",
            EntityKind::Doctor => "doctors",
            EntityKind::Appointment => "appointments",
            EntityKind::MedicalRecord => "medical_records",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Patient => "Patient",
            EntityKind::Doctor => "Doctor",
            EntityKind::Appointment => "Appointment",
            EntityKind::MedicalRecord => "Medical record",
        };
        f.write_str(name)
    }
}

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code. Validation failures, dangling
/// references and missing rows are deliberately separate kinds so callers can
/// tell "you typed something wrong" apart from "that row is gone".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// A field value violated its constraint
    InvalidInput,
    /// A foreign key points at a row that does not exist
    UnknownReference,
    NotFound,
    /// update/delete called on a record that was never saved
    NotPersisted,
    /// save called on a record that already has an id
    AlreadyExists,
    Persistence,
    Migration,
    Seed,
    Io,
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::UnknownReference => "ERR_UNKNOWN_REFERENCE",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::NotPersisted => "ERR_NOT_PERSISTED",
            ExErrorKind::AlreadyExists => "ERR_ALREADY_EXISTS",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Migration => "ERR_MIGRATION",
            ExErrorKind::Seed => "ERR_SEED",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// True for the kinds a user can fix by re-entering input
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ExErrorKind::InvalidInput | ExErrorKind::UnknownReference
        )
    }

    /// True for failures caused by what the user asked for rather than by
    /// the system; these are logged below the warning threshold
    pub fn is_user_error(&self) -> bool {
        self.is_validation() || matches!(self, ExErrorKind::NotFound)
    }
}

/// Canonical structured error type
///
/// Carries the classification plus enough context (operation, entity, field)
/// to produce a useful log line without re-parsing the message.
#[derive(Debug, Clone, PartialEq)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity: Option<EntityKind>,
    entity_id: Option<i64>,
    field: Option<&'static str>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity: None,
            entity_id: None,
            field: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity context
    pub fn with_entity(mut self, entity: EntityKind) -> Self {
        self.entity = Some(entity);
        self
    }

    pub fn with_entity_id(mut self, id: i64) -> Self {
        self.entity_id = Some(id);
        self
    }

    pub fn with_field(mut self, field: &'static str) -> Self {
        self.field = Some(field);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity(&self) -> Option<EntityKind> {
        self.entity
    }

    pub fn entity_id(&self) -> Option<i64> {
        self.entity_id
    }

    pub fn field(&self) -> Option<&'static str> {
        self.field
    }

    /// Human readable message, without code or context decoration
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ExError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let (Some(entity), Some(id)) = (self.entity, self.entity_id) {
            write!(f, " ({} {})", entity.label(), id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain errors raised by record validation and persistence rules
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MedRecError {
    /// A field assignment violated its constraint
    #[error("{reason}")]
    InvalidField { field: &'static str, reason: String },

    /// A foreign key references a row that does not exist
    #[error("{entity} {id} does not exist")]
    UnknownReference { entity: EntityKind, id: i64 },

    /// The row targeted by update/delete is gone
    #[error("{entity} {id} not found")]
    NotFound { entity: EntityKind, id: i64 },

    #[error("{entity} has not been saved yet")]
    NotPersisted { entity: EntityKind },

    #[error("{entity} {id} is already saved")]
    AlreadyPersisted { entity: EntityKind, id: i64 },
}

impl MedRecError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        MedRecError::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ExErrorKind {
        match self {
            MedRecError::InvalidField { .. } => ExErrorKind::InvalidInput,
            MedRecError::UnknownReference { .. } => ExErrorKind::UnknownReference,
            MedRecError::NotFound { .. } => ExErrorKind::NotFound,
            MedRecError::NotPersisted { .. } => ExErrorKind::NotPersisted,
            MedRecError::AlreadyPersisted { .. } => ExErrorKind::AlreadyExists,
        }
    }
}

impl From<MedRecError> for ExError {
    fn from(err: MedRecError) -> Self {
        let message = err.to_string();
        let base = ExError::new(err.kind()).with_message(message);
        match err {
            MedRecError::InvalidField { field, .. } => base.with_field(field),
            MedRecError::UnknownReference { entity, id }
            | MedRecError::NotFound { entity, id }
            | MedRecError::AlreadyPersisted { entity, id } => {
                base.with_entity(entity).with_entity_id(id)
            }
            MedRecError::NotPersisted { entity } => base.with_entity(entity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_unique() {
        let kinds = [
            ExErrorKind::InvalidInput,
            ExErrorKind::UnknownReference,
            ExErrorKind::NotFound,
            ExErrorKind::NotPersisted,
            ExErrorKind::AlreadyExists,
            ExErrorKind::Persistence,
            ExErrorKind::Migration,
            ExErrorKind::Seed,
            ExErrorKind::Io,
            ExErrorKind::Internal,
        ];
        let mut codes: Vec<_> = kinds.iter().map(|k| k.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
    }

    #[test]
    fn test_invalid_field_converts_to_invalid_input() {
        let err = MedRecError::invalid("age", "Age must be a positive integer");
        let ex: ExError = err.into();
        assert_eq!(ex.kind(), ExErrorKind::InvalidInput);
        assert_eq!(ex.field(), Some("age"));
        assert_eq!(ex.message(), "Age must be a positive integer");
        assert!(ex.kind().is_validation());
    }

    #[test]
    fn test_not_found_is_not_validation() {
        let ex: ExError = MedRecError::NotFound {
            entity: EntityKind::Patient,
            id: 4,
        }
        .into();
        assert_eq!(ex.kind(), ExErrorKind::NotFound);
        assert_eq!(ex.entity_id(), Some(4));
        assert!(!ex.kind().is_validation());
        assert!(ex.kind().is_user_error());
        assert_eq!(ex.message(), "Patient 4 not found");
    }

    #[test]
    fn test_system_failures_are_not_user_errors() {
        assert!(ExErrorKind::UnknownReference.is_user_error());
        assert!(!ExErrorKind::Persistence.is_user_error());
        assert!(!ExErrorKind::NotPersisted.is_user_error());
        assert!(!ExErrorKind::Migration.is_user_error());
    }

    #[test]
    fn test_display_includes_code_op_and_entity() {
        let ex = ExError::new(ExErrorKind::UnknownReference)
            .with_op("appointment.save")
            .with_entity(EntityKind::Doctor)
            .with_entity_id(9)
            .with_message("Doctor 9 does not exist");
        assert_eq!(
            ex.to_string(),
            "[ERR_UNKNOWN_REFERENCE] in operation 'appointment.save': Doctor 9 does not exist (doctor 9)"
        );
    }
}
