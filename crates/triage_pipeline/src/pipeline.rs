//! The single-call paging pipeline.
//!
//! Source → Predicate Filter → Priority Buffer → skip(cursor) → Budget Limiter
//! → Response. Every stage pulls from its upstream on demand; the only state
//! that outlives a call is the cursor string handed back to the caller.

use triage_common::ContentHash;
use triage_config::{PipelineConfig, TriageConfig};
use triage_diagnostics::{Diagnostic, DiagnosticSource};

use crate::budget::BudgetLimiter;
use crate::cost::CostModel;
use crate::cursor::{fingerprint, Cursor};
use crate::deadline::{Deadline, Guarded};
use crate::error::PipelineError;
use crate::filter::Filtered;
use crate::priority::PriorityBuffer;
use crate::request::{PageRequest, ResolvedRequest};
use crate::response::{Assembly, Response};

/// Per-call options that are not part of the request's identity.
#[derive(Clone, Copy, Debug, Default)]
pub struct PageOptions {
    /// Abandon the call once this passes.
    pub deadline: Deadline,
}

/// Paging pipeline configured with capacity limits and a cost model.
#[derive(Clone, Debug)]
pub struct Pipeline {
    limits: PipelineConfig,
    cost: CostModel,
}

impl Pipeline {
    /// Creates a pipeline from a loaded configuration.
    pub fn new(config: &TriageConfig) -> Self {
        Self {
            limits: config.pipeline.clone(),
            cost: config.cost.into(),
        }
    }

    /// The cost model used to price diagnostics.
    pub fn cost_model(&self) -> CostModel {
        self.cost
    }

    /// Validates a request's filter and cursor without touching any source.
    ///
    /// These are the checks `run_page` runs first, available to callers that
    /// must open their source before paging.
    pub fn check_request(&self, request: &PageRequest) -> Result<(), PipelineError> {
        self.plan(request).map(|_| ())
    }

    fn plan(&self, request: &PageRequest) -> Result<Plan, PipelineError> {
        let resolved = request.resolve(&self.limits)?;
        let fp = fingerprint(&resolved.filter, &resolved.budget);
        let skip = match resolved.cursor.as_deref() {
            Some(token) => Cursor::decode(token, fp, self.limits.max_skip())?.skip_count,
            None => 0,
        };
        Ok(Plan {
            resolved,
            fingerprint: fp,
            skip,
        })
    }

    /// Assembles one page from `source`.
    ///
    /// The request is validated (filter, then cursor) before the source is
    /// touched. Any failure after that point aborts the call; a partial page
    /// is never returned.
    pub fn run_page<S>(
        &self,
        request: &PageRequest,
        mut source: S,
        options: &PageOptions,
    ) -> Result<Response, PipelineError>
    where
        S: DiagnosticSource,
    {
        let Plan {
            resolved,
            fingerprint: fp,
            skip,
        } = self.plan(request)?;

        source.check_available()?;

        let pulled = Guarded::new(SourcePull::new(&mut source), options.deadline, "source");
        let filtered = Filtered::new(pulled, resolved.predicate);
        let buffer = PriorityBuffer::fill(filtered, self.limits.buffer_capacity)?;
        let observed = buffer.observed();
        let saturated = buffer.saturated();
        log::debug!(
            "buffered {} errors and {} warnings (observed {observed}, skipping {skip})",
            buffer.error_lane_len(),
            buffer.warning_lane_len()
        );

        let skip_items = usize::try_from(skip).unwrap_or(usize::MAX);
        let remaining = Guarded::new(
            buffer.skip(skip_items).map(Ok::<Diagnostic, PipelineError>),
            options.deadline,
            "priority buffer",
        );
        let page = BudgetLimiter::new(resolved.budget, self.cost).assemble(remaining)?;

        let next_cursor = match page.truncation {
            Some(reason) => {
                let next_skip = skip
                    .checked_add(page.diagnostics.len() as u64)
                    .ok_or_else(|| PipelineError::Internal {
                        reason: "cursor skip count overflow".to_string(),
                    })?;
                log::debug!("page truncated by {reason:?}; next cursor skips {next_skip}");
                Some(Cursor::new(next_skip, fp).encode()?)
            }
            None => None,
        };

        Ok(Assembly {
            page,
            observed,
            saturated,
            next_cursor,
            progress: source.build_progress(),
        }
        .into_response())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(&TriageConfig::default())
    }
}

/// A validated request with its cursor decoded.
struct Plan {
    resolved: ResolvedRequest,
    fingerprint: ContentHash,
    skip: u64,
}

/// Adapts a [`DiagnosticSource`] to the pipeline's pull contract.
struct SourcePull<'a, S> {
    source: &'a mut S,
}

impl<'a, S> SourcePull<'a, S> {
    fn new(source: &'a mut S) -> Self {
        Self { source }
    }
}

impl<S: DiagnosticSource> Iterator for SourcePull<'_, S> {
    type Item = Result<Diagnostic, PipelineError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.source
            .next_diagnostic()
            .map(|item| item.map_err(PipelineError::from))
    }
}
