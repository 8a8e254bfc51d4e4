//! Errors raised while loading `triage.toml`.

use std::path::PathBuf;

/// Why a `triage.toml` could not be turned into a [`TriageConfig`](crate::TriageConfig).
///
/// Every variant names the file or the field at fault.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// The configuration file being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The content is not valid TOML or does not match the schema.
    #[error("failed to parse {origin}: {reason}")]
    Parse {
        /// The file path, or `<inline>` for string input.
        origin: String,
        /// Parser message, including line and column.
        reason: String,
    },

    /// A value parsed but is out of range.
    #[error("invalid `{field}`: {reason}")]
    Invalid {
        /// Dotted key of the offending value, e.g. `pipeline.buffer_capacity`.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_error_names_path() {
        let err = ConfigError::Read {
            path: PathBuf::from("ci/triage.toml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        };
        assert_eq!(format!("{err}"), "failed to read ci/triage.toml: file not found");
    }

    #[test]
    fn invalid_names_field() {
        let err = ConfigError::Invalid {
            field: "pipeline.buffer_capacity",
            reason: "must be > 0".to_string(),
        };
        assert_eq!(
            format!("{err}"),
            "invalid `pipeline.buffer_capacity`: must be > 0"
        );
    }
}
