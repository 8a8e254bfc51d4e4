//! Severity and file-pattern predicates applied to each pulled diagnostic.
//!
//! A [`FilterSpec`] is a plain request value. [`Predicate::compile`] validates
//! it once, before anything is pulled from the source, and the resulting
//! predicate is applied per item by the [`Filtered`] stage.

use std::fmt;
use std::str::FromStr;

use glob::{MatchOptions, Pattern};
use serde::{Deserialize, Serialize};
use triage_diagnostics::{Diagnostic, Severity};

use crate::error::PipelineError;

/// Which severities a request wants to see.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityFilter {
    /// Admit every diagnostic.
    #[default]
    All,
    /// Admit only errors.
    Error,
    /// Admit warnings, including diagnostics of unknown severity.
    Warning,
}

impl SeverityFilter {
    /// Returns `true` if a diagnostic of `severity` passes this filter.
    ///
    /// [`Severity::Unknown`] travels with warnings.
    pub fn admits(self, severity: Severity) -> bool {
        match self {
            SeverityFilter::All => true,
            SeverityFilter::Error => severity.is_error(),
            SeverityFilter::Warning => !severity.is_error(),
        }
    }

    /// The lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            SeverityFilter::All => "all",
            SeverityFilter::Error => "error",
            SeverityFilter::Warning => "warning",
        }
    }
}

impl fmt::Display for SeverityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeverityFilter {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(SeverityFilter::All),
            "error" => Ok(SeverityFilter::Error),
            "warning" => Ok(SeverityFilter::Warning),
            other => Err(PipelineError::InvalidFilter {
                field: "severity_filter",
                reason: format!("unknown severity `{other}`, expected all, error, or warning"),
            }),
        }
    }
}

/// The filter half of a request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterSpec {
    /// Severity predicate.
    pub severity: SeverityFilter,
    /// Optional glob matched against the diagnostic's file path.
    pub file_pattern: Option<String>,
}

/// A validated, ready-to-apply filter.
#[derive(Clone, Debug)]
pub struct Predicate {
    severity: SeverityFilter,
    pattern: Option<Pattern>,
}

/// `*` and `?` stop at path separators; `**` crosses them.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

impl Predicate {
    /// Validates a filter spec, failing fast on a malformed glob.
    pub fn compile(spec: &FilterSpec) -> Result<Self, PipelineError> {
        let pattern = spec
            .file_pattern
            .as_deref()
            .map(|raw| {
                Pattern::new(raw).map_err(|e| PipelineError::InvalidFilter {
                    field: "file_pattern",
                    reason: format!("`{raw}`: {} at position {}", e.msg, e.pos),
                })
            })
            .transpose()?;
        Ok(Self {
            severity: spec.severity,
            pattern,
        })
    }

    /// Returns `true` if the diagnostic passes both predicates.
    pub fn admits(&self, diag: &Diagnostic) -> bool {
        if !self.severity.admits(diag.severity) {
            return false;
        }
        match &self.pattern {
            Some(pattern) => pattern.matches_with(&diag.file, MATCH_OPTIONS),
            None => true,
        }
    }
}

/// Pull stage that forwards only admitted diagnostics.
///
/// Errors from upstream pass through untouched so the caller can fail the call.
pub struct Filtered<I> {
    upstream: I,
    predicate: Predicate,
}

impl<I> Filtered<I> {
    /// Wraps `upstream` with the given predicate.
    pub fn new(upstream: I, predicate: Predicate) -> Self {
        Self {
            upstream,
            predicate,
        }
    }
}

impl<I> Iterator for Filtered<I>
where
    I: Iterator<Item = Result<Diagnostic, PipelineError>>,
{
    type Item = Result<Diagnostic, PipelineError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.upstream.next()? {
                Ok(diag) if self.predicate.admits(&diag) => return Some(Ok(diag)),
                Ok(diag) => {
                    log::trace!("filtered out {}:{}:{}", diag.file, diag.line, diag.column);
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
