//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::TriageConfig;
use std::path::Path;

/// The file name looked up in the working directory when no path is given.
pub const CONFIG_FILE_NAME: &str = "triage.toml";

/// Loads and validates a `triage.toml` configuration from the given file.
pub fn load_config(path: &Path) -> Result<TriageConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&content, &path.display().to_string())
}

/// Parses and validates a `triage.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<TriageConfig, ConfigError> {
    parse(content, "<inline>")
}

fn parse(content: &str, origin: &str) -> Result<TriageConfig, ConfigError> {
    let config: TriageConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
        origin: origin.to_string(),
        reason: e.to_string(),
    })?;
    validate_config(&config)?;
    Ok(config)
}

fn positive(field: &'static str, value: u64) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::Invalid {
            field,
            reason: "must be > 0".to_string(),
        });
    }
    Ok(())
}

/// Validates that limits are positive and mutually consistent.
fn validate_config(config: &TriageConfig) -> Result<(), ConfigError> {
    let pipeline = &config.pipeline;
    positive("pipeline.default_token_limit", pipeline.default_token_limit)?;
    positive("pipeline.buffer_capacity", pipeline.buffer_capacity as u64)?;
    if let Some(max_skip) = pipeline.max_skip {
        positive("pipeline.max_skip", max_skip)?;
    }
    if pipeline.max_skip() > pipeline.buffer_capacity as u64 {
        return Err(ConfigError::Invalid {
            field: "pipeline.max_skip",
            reason: format!(
                "{} exceeds pipeline.buffer_capacity ({})",
                pipeline.max_skip(),
                pipeline.buffer_capacity
            ),
        });
    }
    positive("cost.chars_per_token", config.cost.chars_per_token)?;
    positive("cost.record_overhead", config.cost.record_overhead)?;
    Ok(())
}
