//! Count and token ceilings on the page being assembled.

use serde::{Deserialize, Serialize};
use triage_diagnostics::Diagnostic;

use crate::cost::CostModel;
use crate::error::PipelineError;

/// Caller budgets for one page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BudgetSpec {
    /// Maximum number of diagnostics on the page.
    pub max_diagnostics: Option<u64>,
    /// Maximum summed token cost of the page.
    pub token_limit: Option<u64>,
}

/// Which ceiling stopped a page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TruncationReason {
    /// The next diagnostic would have pushed the page over `token_limit`.
    TokenLimit,
    /// The page already held `max_diagnostics` diagnostics.
    MaxDiagnosticsLimit,
}

/// The diagnostics admitted onto one page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Page {
    /// Admitted diagnostics in drain order.
    pub diagnostics: Vec<Diagnostic>,
    /// Sum of the cost of every admitted diagnostic.
    pub token_count: u64,
    /// Set when a ceiling stopped the page before upstream ran dry.
    pub truncation: Option<TruncationReason>,
}

/// Pull stage enforcing [`BudgetSpec`] ceilings with early termination.
pub struct BudgetLimiter {
    budget: BudgetSpec,
    cost: CostModel,
}

impl BudgetLimiter {
    /// Creates a limiter for the given budgets and cost model.
    pub fn new(budget: BudgetSpec, cost: CostModel) -> Self {
        Self { budget, cost }
    }

    /// Pulls candidates from `upstream` until a ceiling would be crossed or
    /// upstream ends.
    ///
    /// A candidate that would cross a ceiling is not admitted and nothing
    /// further is pulled. The count ceiling is checked first, so when both
    /// would trip on the same candidate the reason is
    /// [`TruncationReason::MaxDiagnosticsLimit`].
    pub fn assemble<I>(&self, upstream: I) -> Result<Page, PipelineError>
    where
        I: IntoIterator<Item = Result<Diagnostic, PipelineError>>,
    {
        let mut page = Page::default();
        for candidate in upstream {
            let candidate = candidate?;

            if let Some(max) = self.budget.max_diagnostics {
                if page.diagnostics.len() as u64 >= max {
                    page.truncation = Some(TruncationReason::MaxDiagnosticsLimit);
                    break;
                }
            }

            let cost = self.cost.cost(&candidate)?;
            let total = page
                .token_count
                .checked_add(cost)
                .ok_or_else(|| PipelineError::CostOverflow {
                    file: candidate.file.clone(),
                })?;
            if let Some(limit) = self.budget.token_limit {
                if total > limit {
                    if page.diagnostics.is_empty() {
                        log::warn!(
                            "diagnostic at {}:{} costs {cost} tokens, above the page limit of {limit}",
                            candidate.file,
                            candidate.line
                        );
                    }
                    page.truncation = Some(TruncationReason::TokenLimit);
                    break;
                }
            }

            page.token_count = total;
            page.diagnostics.push(candidate);
        }
        Ok(page)
    }
}
