//! Audit trail for locally owned records
//!
//! Saved scenarios and the allocation plan are the only records this tool
//! writes. Every change to them is appended to `audit.log` as a JSON line
//! with the record's state before and after.

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
