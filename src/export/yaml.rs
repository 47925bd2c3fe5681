//! YAML export

use std::io::Write;

use serde::Serialize;

use crate::error::CashflowResult;

use super::json::ExportDocument;

/// Write the document as YAML under a short comment header
pub fn export_yaml<W, T>(document: &ExportDocument<T>, writer: &mut W) -> CashflowResult<()>
where
    W: Write,
    T: Serialize,
{
    writeln!(writer, "# CashflowCLI export")?;
    writeln!(writer, "# Generated: {}", document.exported_at)?;
    writeln!(writer)?;
    serde_yaml::to_writer(writer, document)?;
    Ok(())
}
