//! Human-readable rendering of diagnostics.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;

/// Renders diagnostics in a rustc-style terminal format.
///
/// Produces output like:
/// ```text
/// error: mismatched types
///   --> src/main.rs:10:5
/// ```
pub struct TerminalRenderer {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Renders a single diagnostic into a formatted string.
    pub fn render(&self, diag: &Diagnostic) -> String {
        let mut out = String::new();
        let label = self.paint(diag.severity, diag.severity.as_str());
        out.push_str(&format!("{label}: {}\n", diag.message));
        out.push_str(&format!(
            "  --> {}:{}:{}\n",
            diag.file, diag.line, diag.column
        ));
        out
    }

    fn paint(&self, severity: Severity, text: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        let code = match severity {
            Severity::Error => "31",
            Severity::Warning => "33",
            Severity::Unknown => "36",
        };
        format!("\x1b[1;{code}m{text}\x1b[0m")
    }
}
