//! Configuration types deserialized from `triage.toml`.

use serde::Deserialize;

/// Default token ceiling applied when a request carries no `token_limit`.
pub const DEFAULT_TOKEN_LIMIT: u64 = 20_000;

/// Default Priority Buffer capacity.
pub const DEFAULT_BUFFER_CAPACITY: usize = 10_000;

/// Default estimate of characters per token.
pub const DEFAULT_CHARS_PER_TOKEN: u64 = 4;

/// Default fixed token overhead per emitted record.
pub const DEFAULT_RECORD_OVERHEAD: u64 = 12;

/// The top-level configuration parsed from `triage.toml`.
///
/// Every section is optional; missing sections and fields take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TriageConfig {
    /// Paging defaults and safety caps.
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Token cost model.
    #[serde(default)]
    pub cost: CostConfig,
}

/// Paging defaults and safety caps.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Token ceiling used when a request does not set one.
    pub default_token_limit: u64,
    /// Maximum number of diagnostics held in the priority lanes per call.
    pub buffer_capacity: usize,
    /// Largest `skip_count` accepted from a cursor. Defaults to `buffer_capacity`.
    pub max_skip: Option<u64>,
}

impl PipelineConfig {
    /// The effective cursor skip bound.
    pub fn max_skip(&self) -> u64 {
        self.max_skip.unwrap_or(self.buffer_capacity as u64)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            default_token_limit: DEFAULT_TOKEN_LIMIT,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            max_skip: None,
        }
    }
}

/// Parameters of the token cost estimate.
///
/// A diagnostic costs `ceil(chars / chars_per_token) + record_overhead` tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CostConfig {
    /// Characters counted as one token.
    pub chars_per_token: u64,
    /// Fixed tokens charged per record.
    pub record_overhead: u64,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            chars_per_token: DEFAULT_CHARS_PER_TOKEN,
            record_overhead: DEFAULT_RECORD_OVERHEAD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = TriageConfig::default();
        assert_eq!(config.pipeline.default_token_limit, 20_000);
        assert_eq!(config.pipeline.buffer_capacity, 10_000);
        assert_eq!(config.pipeline.max_skip(), 10_000);
        assert_eq!(config.cost.chars_per_token, 4);
        assert_eq!(config.cost.record_overhead, 12);
    }

    #[test]
    fn max_skip_follows_capacity() {
        let config: TriageConfig = toml::from_str("[pipeline]\nbuffer_capacity = 50\n").unwrap();
        assert_eq!(config.pipeline.max_skip(), 50);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: TriageConfig = toml::from_str("[cost]\nchars_per_token = 3\n").unwrap();
        assert_eq!(config.cost.chars_per_token, 3);
        assert_eq!(config.cost.record_overhead, DEFAULT_RECORD_OVERHEAD);
        assert_eq!(config.pipeline, PipelineConfig::default());
    }
}
