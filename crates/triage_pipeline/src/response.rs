//! The final page record returned to the caller.

use serde::{Deserialize, Serialize};
use triage_diagnostics::{BuildProgress, Diagnostic};

use crate::budget::{Page, TruncationReason};

/// Status reported when the source knows nothing about build progress.
pub const STATUS_UNKNOWN: &str = "unknown";

/// Count summary for one page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Diagnostics observed from the source during this call, after filtering.
    pub total_diagnostics: u64,
    /// Diagnostics on this page.
    pub returned_diagnostics: u64,
    /// Errors on this page.
    pub error_count: u64,
    /// Warnings (including unknown severities) on this page.
    pub warning_count: u64,
    /// The priority buffer hit its capacity, so `total_diagnostics` may undercount.
    pub buffer_saturated: bool,
    /// Build progress reported by the source, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_summary: Option<BuildProgress>,
}

/// One page of diagnostics with truncation and pagination metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// Build state name (`waiting`, `in_progress`, ...) or `unknown`.
    pub status: String,
    /// Errors first, then warnings.
    pub diagnostics: Vec<Diagnostic>,
    /// A budget ceiling stopped this page early.
    pub truncated: bool,
    /// Which ceiling stopped the page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truncation_reason: Option<TruncationReason>,
    /// Token to pass back for the next page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    /// Summed cost of `diagnostics`.
    pub token_count: u64,
    /// Count summary.
    pub summary: Summary,
}

/// Inputs gathered by the upstream stages for one call.
pub struct Assembly {
    /// The budget-limited page.
    pub page: Page,
    /// Post-filter count of diagnostics pulled from the source.
    pub observed: u64,
    /// Whether the priority buffer hit capacity.
    pub saturated: bool,
    /// Encoded continuation token, present only for truncated pages.
    pub next_cursor: Option<String>,
    /// Build progress read from the source.
    pub progress: Option<BuildProgress>,
}

impl Assembly {
    /// Aggregates the page into a [`Response`]. Never fails.
    pub fn into_response(self) -> Response {
        let Assembly {
            page,
            observed,
            saturated,
            next_cursor,
            progress,
        } = self;
        let error_count = page
            .diagnostics
            .iter()
            .filter(|d| d.severity.is_error())
            .count() as u64;
        let returned = page.diagnostics.len() as u64;
        let status = progress
            .as_ref()
            .map_or(STATUS_UNKNOWN, BuildProgress::state_name)
            .to_string();
        Response {
            status,
            truncated: page.truncation.is_some(),
            truncation_reason: page.truncation,
            next_cursor,
            token_count: page.token_count,
            summary: Summary {
                total_diagnostics: observed,
                returned_diagnostics: returned,
                error_count,
                warning_count: returned - error_count,
                buffer_saturated: saturated,
                build_summary: progress,
            },
            diagnostics: page.diagnostics,
        }
    }
}
