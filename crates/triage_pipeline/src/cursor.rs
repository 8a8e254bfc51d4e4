//! Opaque, self-contained continuation cursors.
//!
//! A cursor carries how many prioritized diagnostics earlier pages already
//! served and a fingerprint of the request that issued it. No state is kept
//! between calls: resuming re-runs the pipeline and skips `skip_count` items.
//!
//! Wire form: the bincode encoding of a small header (magic, format version,
//! skip count, fingerprint), rendered as unpadded URL-safe base64.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use triage_common::ContentHash;

use crate::budget::BudgetSpec;
use crate::error::PipelineError;
use crate::filter::FilterSpec;

/// Magic bytes identifying a triage cursor.
const CURSOR_MAGIC: [u8; 4] = *b"TRG1";

/// Current cursor format version. Increment on breaking changes to the payload.
const CURSOR_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct CursorPayload {
    magic: [u8; 4],
    format_version: u32,
    skip_count: u64,
    fingerprint: ContentHash,
}

/// A decoded continuation cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cursor {
    /// Prioritized diagnostics already served by earlier pages.
    pub skip_count: u64,
    /// Fingerprint of the request shape the cursor belongs to.
    pub fingerprint: ContentHash,
}

impl Cursor {
    /// Creates a cursor.
    pub fn new(skip_count: u64, fingerprint: ContentHash) -> Self {
        Self {
            skip_count,
            fingerprint,
        }
    }

    /// Renders the cursor as an opaque token.
    pub fn encode(&self) -> Result<String, PipelineError> {
        let payload = CursorPayload {
            magic: CURSOR_MAGIC,
            format_version: CURSOR_FORMAT_VERSION,
            skip_count: self.skip_count,
            fingerprint: self.fingerprint,
        };
        let bytes = bincode::serde::encode_to_vec(&payload, bincode::config::standard())
            .map_err(|e| PipelineError::Internal {
                reason: format!("cursor encoding failed: {e}"),
            })?;
        Ok(URL_SAFE_NO_PAD.encode(bytes))
    }

    /// Decodes a token and checks it against the current request.
    ///
    /// Fails with [`PipelineError::InvalidCursor`] on malformed encoding,
    /// a foreign or outdated format, a fingerprint that does not match
    /// `expected`, or a skip count above `max_skip`.
    pub fn decode(token: &str, expected: ContentHash, max_skip: u64) -> Result<Self, PipelineError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(token.trim())
            .map_err(|e| PipelineError::invalid_cursor(format!("malformed token: {e}")))?;
        let (payload, read): (CursorPayload, usize) =
            bincode::serde::decode_from_slice(&bytes, bincode::config::standard())
                .map_err(|e| PipelineError::invalid_cursor(format!("malformed token: {e}")))?;
        if read != bytes.len() {
            return Err(PipelineError::invalid_cursor("trailing bytes after payload"));
        }
        if payload.magic != CURSOR_MAGIC {
            return Err(PipelineError::invalid_cursor("not a triage cursor"));
        }
        if payload.format_version != CURSOR_FORMAT_VERSION {
            return Err(PipelineError::invalid_cursor(format!(
                "unsupported cursor version {}",
                payload.format_version
            )));
        }
        if payload.fingerprint != expected {
            return Err(PipelineError::invalid_cursor(
                "issued for a different filter or budget",
            ));
        }
        if payload.skip_count > max_skip {
            return Err(PipelineError::invalid_cursor(format!(
                "skip count {} exceeds the limit of {max_skip}",
                payload.skip_count
            )));
        }
        Ok(Self::new(payload.skip_count, payload.fingerprint))
    }
}

/// Hashes the resolved filter and budgets a cursor is bound to.
///
/// `budget.token_limit` must already have the configured default applied so
/// that an omitted limit and an explicit equal limit fingerprint alike.
pub fn fingerprint(filter: &FilterSpec, budget: &BudgetSpec) -> ContentHash {
    let pattern = match &filter.file_pattern {
        Some(p) => format!("{}:{p}", p.len()),
        None => "-".to_string(),
    };
    let limit = |v: Option<u64>| v.map_or_else(|| "-".to_string(), |n| n.to_string());
    let canonical = format!(
        "v{CURSOR_FORMAT_VERSION}|severity={}|pattern={pattern}|max_diagnostics={}|token_limit={}",
        filter.severity,
        limit(budget.max_diagnostics),
        limit(budget.token_limit),
    );
    ContentHash::from_bytes(canonical.as_bytes())
}
