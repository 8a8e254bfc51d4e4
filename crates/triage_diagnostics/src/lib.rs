//! Build diagnostics, build progress, and the sources that produce them.
//!
//! This crate defines the [`Diagnostic`] record reported by a build tool, its
//! [`Severity`], the [`BuildProgress`] snapshot passed through to clients, and
//! the pull-based [`DiagnosticSource`] trait consumed by the paging pipeline.
//! [`TerminalRenderer`] formats diagnostics for human-readable output.

#![warn(missing_docs)]

pub mod diagnostic;
pub mod progress;
pub mod renderer;
pub mod severity;
pub mod source;

pub use diagnostic::Diagnostic;
pub use progress::BuildProgress;
pub use renderer::TerminalRenderer;
pub use severity::Severity;
pub use source::{
    DiagnosticSource, JsonLinesSource, SnapshotCursor, SnapshotSource, SourceError,
};
