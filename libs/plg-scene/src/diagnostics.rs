//! Mirrors report diagnostics to `tracing`.

use plg_types::{Diagnostic, Severity};

/// Emits one tracing event per diagnostic, at the matching level.
pub fn log_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        match diagnostic.severity {
            Severity::Error => tracing::error!("{}", diagnostic),
            Severity::Warning => tracing::warn!("{}", diagnostic),
            Severity::Info => tracing::info!("{}", diagnostic),
        }
    }
}
