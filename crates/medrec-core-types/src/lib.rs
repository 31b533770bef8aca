//! Types shared by the MedRec error and logging facilities
//!
//! - **Schema constants**: canonical log field keys, event names and entity labels
//! - **Sensitive data**: `Sensitive<T>` marker that keeps patient identity out of logs

pub mod schema;
pub mod sensitive;

pub use sensitive::Sensitive;
