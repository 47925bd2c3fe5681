//! Audit log CLI command

use crate::error::CashflowResult;
use crate::storage::Storage;

pub fn handle_audit_command(storage: &Storage, limit: usize) -> CashflowResult<()> {
    let entries = storage.audit_reader().read_recent(limit)?;
    if entries.is_empty() {
        println!("No audit entries.");
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry);
    }
    Ok(())
}
