//! Diagnostic types shared across the PLG pipeline.
//!
//! Every recoverable condition (a skipped section, a padded color list) is
//! reported as a [`Diagnostic`] instead of an error, so a host keeps running
//! whatever the outcome of one export or import.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        };
        f.write_str(label)
    }
}

/// Pipeline stage that produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    Extract,
    Encode,
    Decode,
    Import,
    Export,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::Extract => "extract",
            Stage::Encode => "encode",
            Stage::Decode => "decode",
            Stage::Import => "import",
            Stage::Export => "export",
        };
        f.write_str(label)
    }
}

/// A diagnostic message with severity and, when relevant, the section it
/// concerns.
///
/// # Examples
/// ```
/// use plg_types::{Diagnostic, Severity, Stage};
/// let diag = Diagnostic::warning(Stage::Decode, "colors padded").in_section(2);
/// assert_eq!(diag.severity, Severity::Warning);
/// assert_eq!(diag.to_string(), "warning [decode] section 2: colors padded");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub stage: Stage,
    pub message: String,
    pub section: Option<usize>,
    pub hint: Option<String>,
}

impl Diagnostic {
    pub fn new(severity: Severity, stage: Stage, message: impl Into<String>) -> Self {
        Self {
            severity,
            stage,
            message: message.into(),
            section: None,
            hint: None,
        }
    }

    pub fn error(stage: Stage, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, stage, message)
    }

    pub fn warning(stage: Stage, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, stage, message)
    }

    pub fn info(stage: Stage, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, stage, message)
    }

    pub fn in_section(mut self, index: usize) -> Self {
        self.section = Some(index);
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.severity, self.stage)?;
        if let Some(section) = self.section {
            write!(f, " section {section}")?;
        }
        write!(f, ": {}", self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, " (hint: {hint})")?;
        }
        Ok(())
    }
}

/// Counts the diagnostics of the given severity.
pub fn count_severity(diagnostics: &[Diagnostic], severity: Severity) -> usize {
    diagnostics.iter().filter(|d| d.severity == severity).count()
}
