//! Build progress as reported by the build tool.

use serde::{Deserialize, Serialize};

/// A snapshot of the build's progress, passed through to clients untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum BuildProgress {
    /// No build has started yet.
    Waiting,
    /// A build is running.
    InProgress {
        /// Number of build units finished.
        complete: u32,
        /// Number of build units still pending.
        remaining: u32,
        /// Number of build units that failed so far.
        failed: u32,
    },
    /// The last build failed.
    Failed,
    /// The last build was interrupted before finishing.
    Interrupted,
    /// The last build completed successfully.
    Success,
}

impl BuildProgress {
    /// The snake_case state name, used as the response status.
    pub fn state_name(&self) -> &'static str {
        match self {
            BuildProgress::Waiting => "waiting",
            BuildProgress::InProgress { .. } => "in_progress",
            BuildProgress::Failed => "failed",
            BuildProgress::Interrupted => "interrupted",
            BuildProgress::Success => "success",
        }
    }
}
