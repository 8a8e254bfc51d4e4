//! Error types for the paging pipeline.

use triage_diagnostics::SourceError;

/// Errors that fail a paging call.
///
/// Truncation is not an error: a page cut short by a budget is a normal,
/// flagged outcome. Every variant here means no page is returned at all.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A request field describing the filter is malformed.
    #[error("invalid filter in `{field}`: {reason}")]
    InvalidFilter {
        /// The request field at fault (`severity_filter` or `file_pattern`).
        field: &'static str,
        /// Description of the problem.
        reason: String,
    },

    /// The continuation cursor cannot be used with this request.
    #[error("invalid cursor: {reason}; restart from the first page")]
    InvalidCursor {
        /// Description of the problem.
        reason: String,
    },

    /// The diagnostic source could not be read.
    #[error(transparent)]
    SourceUnavailable(#[from] SourceError),

    /// A token cost computation overflowed.
    #[error("token cost overflow while pricing a diagnostic in {file}")]
    CostOverflow {
        /// File of the diagnostic being priced.
        file: String,
    },

    /// An internal invariant failed; the call is aborted rather than degraded.
    #[error("internal pipeline error: {reason}")]
    Internal {
        /// Description of the failure.
        reason: String,
    },

    /// The caller's deadline passed before the page was complete.
    #[error("deadline exceeded after {pulled} pulls from the {stage}")]
    DeadlineExceeded {
        /// The stage whose pull found the deadline expired.
        stage: &'static str,
        /// Items that stage had already pulled.
        pulled: u64,
    },
}

impl PipelineError {
    pub(crate) fn invalid_cursor(reason: impl Into<String>) -> Self {
        PipelineError::InvalidCursor {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_filter() {
        let err = PipelineError::InvalidFilter {
            field: "file_pattern",
            reason: "unclosed bracket".to_string(),
        };
        assert_eq!(
            format!("{err}"),
            "invalid filter in `file_pattern`: unclosed bracket"
        );
    }

    #[test]
    fn display_invalid_cursor() {
        let err = PipelineError::invalid_cursor("fingerprint mismatch");
        assert_eq!(
            format!("{err}"),
            "invalid cursor: fingerprint mismatch; restart from the first page"
        );
    }

    #[test]
    fn source_error_is_transparent() {
        let err: PipelineError = SourceError::Unavailable {
            reason: "build server not initialized".to_string(),
        }
        .into();
        assert_eq!(
            format!("{err}"),
            "diagnostic source unavailable: build server not initialized"
        );
    }

    #[test]
    fn display_deadline() {
        let err = PipelineError::DeadlineExceeded {
            stage: "priority buffer",
            pulled: 7,
        };
        assert_eq!(
            format!("{err}"),
            "deadline exceeded after 7 pulls from the priority buffer"
        );
    }
}
