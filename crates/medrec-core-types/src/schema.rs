//! Canonical schema constants for structured logging
//!
//! Every operation log line carries the same keys so log consumers can filter
//! by `op` and `event` without knowing which crate emitted it.

// Canonical field keys
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

// Entity labels, matching the table each entity lives in
pub const ENTITY_PATIENT: &str = "patient";
pub const ENTITY_DOCTOR: &str = "doctor";
pub const ENTITY_APPOINTMENT: &str = "appointment";
pub const ENTITY_MEDICAL_RECORD: &str = "medical_record";
