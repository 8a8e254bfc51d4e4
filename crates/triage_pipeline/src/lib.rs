//! Bounded-memory paging of build diagnostics under count and token budgets.
//!
//! A call pulls diagnostics from a [`DiagnosticSource`](triage_diagnostics::DiagnosticSource),
//! filters them by severity and file glob, routes them into an error lane and a
//! warning lane, skips what earlier pages already served, and admits items
//! onto the page until a budget ceiling would be crossed. Truncated pages carry
//! an opaque cursor that resumes the sequence without server-side state.
//!
//! ```
//! use triage_diagnostics::{Diagnostic, SnapshotSource};
//! use triage_pipeline::{PageOptions, PageRequest, Pipeline, TruncationReason};
//!
//! let snapshot = SnapshotSource::new(vec![
//!     Diagnostic::warning("src/lib.rs", 3, 1, "unused import"),
//!     Diagnostic::error("src/main.rs", 7, 9, "mismatched types"),
//! ]);
//! let request = PageRequest { max_diagnostics: Some(1), ..PageRequest::default() };
//! let page = Pipeline::default()
//!     .run_page(&request, snapshot.cursor(), &PageOptions::default())
//!     .unwrap();
//! assert_eq!(page.diagnostics[0].message, "mismatched types");
//! assert_eq!(page.truncation_reason, Some(TruncationReason::MaxDiagnosticsLimit));
//! assert!(page.next_cursor.is_some());
//! ```

#![warn(missing_docs)]

pub mod budget;
pub mod cost;
pub mod cursor;
pub mod deadline;
pub mod error;
pub mod filter;
pub mod pipeline;
pub mod priority;
pub mod request;
pub mod response;

pub use budget::{BudgetLimiter, BudgetSpec, Page, TruncationReason};
pub use cost::CostModel;
pub use cursor::{fingerprint, Cursor};
pub use deadline::Deadline;
pub use error::PipelineError;
pub use filter::{FilterSpec, Predicate, SeverityFilter};
pub use pipeline::{PageOptions, Pipeline};
pub use priority::PriorityBuffer;
pub use request::{PageRequest, ResolvedRequest};
pub use response::{Response, Summary};
