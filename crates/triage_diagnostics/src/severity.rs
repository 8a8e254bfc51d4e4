//! Diagnostic severity levels ordered from least to most severe.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The severity level of a diagnostic message.
///
/// Build tools report severity as free text. Anything that is not recognized
/// as an error or a warning becomes [`Unknown`](Severity::Unknown), which is
/// routed and counted together with warnings.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Severity {
    /// A severity the build tool reported that is neither error nor warning.
    Unknown,
    /// A potential issue that does not fail the build.
    Warning,
    /// A definite problem that fails the build.
    Error,
}

impl Severity {
    /// Parses build-tool severity text, case-insensitively.
    ///
    /// Never fails: unrecognized text maps to [`Severity::Unknown`].
    pub fn parse_lenient(text: &str) -> Self {
        match text.trim().to_ascii_lowercase().as_str() {
            "error" => Severity::Error,
            "warning" | "warn" => Severity::Warning,
            _ => Severity::Unknown,
        }
    }

    /// Returns `true` if this severity is [`Error`](Severity::Error).
    pub fn is_error(self) -> bool {
        self == Severity::Error
    }

    /// The lowercase wire name of this severity.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Unknown => "unknown",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(Severity::parse_lenient(&text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering() {
        assert!(Severity::Unknown < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
    }

    #[test]
    fn parse_known() {
        assert_eq!(Severity::parse_lenient("error"), Severity::Error);
        assert_eq!(Severity::parse_lenient("ERROR"), Severity::Error);
        assert_eq!(Severity::parse_lenient("Warning"), Severity::Warning);
        assert_eq!(Severity::parse_lenient("warn"), Severity::Warning);
    }

    #[test]
    fn parse_unknown() {
        assert_eq!(Severity::parse_lenient("information"), Severity::Unknown);
        assert_eq!(Severity::parse_lenient(""), Severity::Unknown);
    }

    #[test]
    fn is_error() {
        assert!(Severity::Error.is_error());
        assert!(!Severity::Warning.is_error());
        assert!(!Severity::Unknown.is_error());
    }

    #[test]
    fn serde_uses_wire_names() {
        assert_eq!(serde_json::to_string(&Severity::Error).unwrap(), "\"error\"");
        let s: Severity = serde_json::from_str("\"hint\"").unwrap();
        assert_eq!(s, Severity::Unknown);
    }
}
