//! Helpers for the hub's stderr output.

use std::io::Write;

use crate::error::HubError;

/// Writes the one-line message for a fatal error.
pub fn write_error(err: &mut dyn Write, error: &HubError) -> std::io::Result<()> {
    writeln!(err, "{}", error)
}

/// Writes the per-player exit reports collected during shutdown.
pub fn write_reports(err: &mut dyn Write, reports: &[String]) -> std::io::Result<()> {
    for line in reports {
        writeln!(err, "{}", line)?;
    }
    Ok(())
}
