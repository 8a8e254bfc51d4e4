//! Deterministic token cost estimate for a diagnostic.
//!
//! `cost = ceil(chars / chars_per_token) + record_overhead`, where `chars` is
//! the number of Unicode scalar values in the severity name, the file path,
//! the message, and the decimal line and column numbers. The estimate is stable
//! across runs and platforms, which keeps `token_count <= token_limit` a
//! checkable contract.

use triage_config::CostConfig;
use triage_diagnostics::Diagnostic;

use crate::error::PipelineError;

/// The token cost model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CostModel {
    chars_per_token: u64,
    record_overhead: u64,
}

impl CostModel {
    /// Builds a cost model. A `chars_per_token` of zero is treated as one.
    pub fn new(chars_per_token: u64, record_overhead: u64) -> Self {
        Self {
            chars_per_token: chars_per_token.max(1),
            record_overhead,
        }
    }

    /// Prices a single diagnostic in tokens.
    pub fn cost(&self, diag: &Diagnostic) -> Result<u64, PipelineError> {
        let overflow = || PipelineError::CostOverflow {
            file: diag.file.clone(),
        };
        let chars = [
            diag.severity.as_str().chars().count() as u64,
            diag.file.chars().count() as u64,
            diag.message.chars().count() as u64,
            decimal_digits(diag.line),
            decimal_digits(diag.column),
        ]
        .into_iter()
        .try_fold(0u64, u64::checked_add)
        .ok_or_else(overflow)?;
        chars
            .div_ceil(self.chars_per_token)
            .checked_add(self.record_overhead)
            .ok_or_else(overflow)
    }
}

impl Default for CostModel {
    fn default() -> Self {
        CostConfig::default().into()
    }
}

impl From<CostConfig> for CostModel {
    fn from(config: CostConfig) -> Self {
        Self::new(config.chars_per_token, config.record_overhead)
    }
}

fn decimal_digits(n: u32) -> u64 {
    u64::from(n.checked_ilog10().unwrap_or(0) + 1)
}
