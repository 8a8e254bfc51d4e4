//! A single build-tool diagnostic with its source location.

use crate::severity::Severity;
use serde::{Deserialize, Serialize};

/// A build-tool-reported issue with a source location and message.
///
/// Diagnostics are immutable once produced. The paging pipeline owns a
/// diagnostic only while it sits in a priority lane and hands it off on
/// emission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity level reported by the build tool.
    pub severity: Severity,
    /// Path of the file the diagnostic points at, as reported by the build tool.
    pub file: String,
    /// One-based line number.
    pub line: u32,
    /// One-based column number.
    pub column: u32,
    /// The diagnostic message.
    pub message: String,
}

impl Diagnostic {
    /// Creates a new error diagnostic.
    pub fn error(file: impl Into<String>, line: u32, column: u32, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            file: file.into(),
            line,
            column,
            message: message.into(),
        }
    }

    /// Creates a new warning diagnostic.
    pub fn warning(
        file: impl Into<String>,
        line: u32,
        column: u32,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Warning,
            file: file.into(),
            line,
            column,
            message: message.into(),
        }
    }

    /// Returns a copy of this diagnostic with a different severity.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_error() {
        let diag = Diagnostic::error("src/main.rs", 10, 5, "mismatched types");
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.file, "src/main.rs");
        assert_eq!((diag.line, diag.column), (10, 5));
    }

    #[test]
    fn create_warning() {
        let diag = Diagnostic::warning("src/lib.rs", 1, 1, "unused import");
        assert_eq!(diag.severity, Severity::Warning);
        assert_eq!(diag.message, "unused import");
    }

    #[test]
    fn deserialize_unknown_severity() {
        let json = r#"{"severity":"info","file":"a.rs","line":1,"column":2,"message":"m"}"#;
        let diag: Diagnostic = serde_json::from_str(json).unwrap();
        assert_eq!(diag.severity, Severity::Unknown);
    }

    #[test]
    fn serialize_field_order() {
        let diag = Diagnostic::error("a.rs", 3, 4, "boom");
        let json = serde_json::to_string(&diag).unwrap();
        assert_eq!(
            json,
            r#"{"severity":"error","file":"a.rs","line":3,"column":4,"message":"boom"}"#
        );
    }
}
