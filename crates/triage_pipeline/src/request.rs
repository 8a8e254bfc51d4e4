//! The caller-facing request and its validation.

use serde::{Deserialize, Serialize};
use triage_config::PipelineConfig;

use crate::budget::BudgetSpec;
use crate::error::PipelineError;
use crate::filter::{FilterSpec, Predicate, SeverityFilter};

/// A page request as received from a client. Every field is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageRequest {
    /// Maximum number of diagnostics on the page.
    pub max_diagnostics: Option<u64>,
    /// Continuation token from a previous page; absent or empty means first page.
    pub cursor: Option<String>,
    /// `all`, `error`, or `warning`.
    pub severity_filter: Option<String>,
    /// Glob matched against each diagnostic's file path.
    pub file_pattern: Option<String>,
    /// Token ceiling; the configured default applies when absent.
    pub token_limit: Option<u64>,
}

/// A request whose filter has been validated and whose defaults are applied.
#[derive(Clone, Debug)]
pub struct ResolvedRequest {
    /// The filter as requested.
    pub filter: FilterSpec,
    /// The compiled filter.
    pub predicate: Predicate,
    /// Budgets with the default token limit applied.
    pub budget: BudgetSpec,
    /// The raw continuation token, if any.
    pub cursor: Option<String>,
}

impl PageRequest {
    /// Validates the filter and applies configured defaults.
    ///
    /// Runs before the source is touched, so an invalid filter never causes a pull.
    pub fn resolve(&self, config: &PipelineConfig) -> Result<ResolvedRequest, PipelineError> {
        let severity = match self.severity_filter.as_deref() {
            Some(raw) => raw.parse::<SeverityFilter>()?,
            None => SeverityFilter::All,
        };
        let filter = FilterSpec {
            severity,
            file_pattern: self.file_pattern.clone(),
        };
        let predicate = Predicate::compile(&filter)?;
        let budget = BudgetSpec {
            max_diagnostics: self.max_diagnostics,
            token_limit: Some(self.token_limit.unwrap_or(config.default_token_limit)),
        };
        let cursor = self
            .cursor
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        Ok(ResolvedRequest {
            filter,
            predicate,
            budget,
            cursor,
        })
    }
}
