//! Two-lane priority buffer: errors before warnings in a single pass.
//!
//! Filling pulls admitted diagnostics until the upstream ends or the buffer
//! holds `capacity` items, routing each into the error lane or the warning
//! lane by severity. Arrival order is preserved within a lane. Draining hands
//! the error lane out first, then the warning lane, moving each diagnostic out
//! of the buffer.

use std::collections::VecDeque;

use triage_diagnostics::Diagnostic;

use crate::error::PipelineError;

/// The filled lanes of one paging call.
#[derive(Debug, Default)]
pub struct PriorityBuffer {
    errors: VecDeque<Diagnostic>,
    warnings: VecDeque<Diagnostic>,
    observed: u64,
    saturated: bool,
}

impl PriorityBuffer {
    /// Pulls from `upstream` until it ends or `capacity` items are buffered.
    ///
    /// The first upstream error aborts the fill and is returned; a partially
    /// filled buffer is dropped with it.
    pub fn fill<I>(upstream: I, capacity: usize) -> Result<Self, PipelineError>
    where
        I: IntoIterator<Item = Result<Diagnostic, PipelineError>>,
    {
        let mut buffer = Self::default();
        let mut upstream = upstream.into_iter();
        while buffer.len() < capacity {
            match upstream.next() {
                Some(item) => buffer.push(item?),
                None => return Ok(buffer),
            }
        }
        buffer.saturated = true;
        log::warn!(
            "priority buffer reached capacity {capacity}; remaining diagnostics were not read"
        );
        Ok(buffer)
    }

    fn push(&mut self, diag: Diagnostic) {
        self.observed += 1;
        if diag.severity.is_error() {
            log::trace!("error lane <- {}:{}", diag.file, diag.line);
            self.errors.push_back(diag);
        } else {
            log::trace!("warning lane <- {}:{}", diag.file, diag.line);
            self.warnings.push_back(diag);
        }
    }

    /// Number of diagnostics currently buffered.
    pub fn len(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }

    /// Returns `true` if both lanes are empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of diagnostics admitted into the lanes during the fill.
    pub fn observed(&self) -> u64 {
        self.observed
    }

    /// Returns `true` if the fill stopped at capacity rather than at end-of-stream.
    pub fn saturated(&self) -> bool {
        self.saturated
    }

    /// Number of buffered errors.
    pub fn error_lane_len(&self) -> usize {
        self.errors.len()
    }

    /// Number of buffered warning-lane diagnostics.
    pub fn warning_lane_len(&self) -> usize {
        self.warnings.len()
    }
}

/// Draining iterator: errors first, then warnings.
impl Iterator for PriorityBuffer {
    type Item = Diagnostic;

    fn next(&mut self) -> Option<Diagnostic> {
        self.errors
            .pop_front()
            .or_else(|| self.warnings.pop_front())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len();
        (n, Some(n))
    }
}

impl ExactSizeIterator for PriorityBuffer {}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_diagnostics::Severity;

    fn ok_items(diags: Vec<Diagnostic>) -> impl Iterator<Item = Result<Diagnostic, PipelineError>> {
        diags.into_iter().map(Ok)
    }

    #[test]
    fn errors_drain_before_warnings() {
        let input = vec![
            Diagnostic::warning("a.rs", 1, 1, "w1"),
            Diagnostic::error("a.rs", 2, 1, "e1"),
            Diagnostic::warning("a.rs", 3, 1, "w2"),
            Diagnostic::error("a.rs", 4, 1, "e2"),
        ];
        let buffer = PriorityBuffer::fill(ok_items(input), 100).unwrap();
        assert_eq!(buffer.error_lane_len(), 2);
        assert_eq!(buffer.warning_lane_len(), 2);
        let messages: Vec<_> = buffer.map(|d| d.message).collect();
        assert_eq!(messages, vec!["e1", "e2", "w1", "w2"]);
    }

    #[test]
    fn unknown_rides_warning_lane() {
        let input = vec![
            Diagnostic::warning("a.rs", 1, 1, "u").with_severity(Severity::Unknown),
            Diagnostic::error("a.rs", 2, 1, "e"),
        ];
        let buffer = PriorityBuffer::fill(ok_items(input), 100).unwrap();
        let order: Vec<_> = buffer.map(|d| d.severity).collect();
        assert_eq!(order, vec![Severity::Error, Severity::Unknown]);
    }

    #[test]
    fn stops_at_capacity() {
        let input: Vec<_> = (0..10)
            .map(|i| Diagnostic::warning("a.rs", i, 1, "w"))
            .collect();
        let mut pulled = 0;
        let upstream = ok_items(input).inspect(|_| pulled += 1);
        let buffer = PriorityBuffer::fill(upstream, 4).unwrap();
        assert_eq!(buffer.len(), 4);
        assert_eq!(buffer.observed(), 4);
        assert!(buffer.saturated());
        assert_eq!(pulled, 4);
    }

    #[test]
    fn exhausted_source_not_saturated() {
        let input = vec![Diagnostic::error("a.rs", 1, 1, "e")];
        let buffer = PriorityBuffer::fill(ok_items(input), 1_000).unwrap();
        assert!(!buffer.saturated());
        assert_eq!(buffer.observed(), 1);
    }

    #[test]
    fn upstream_error_aborts() {
        let input = vec![
            Ok(Diagnostic::error("a.rs", 1, 1, "e")),
            Err(PipelineError::DeadlineExceeded {
                stage: "source",
                pulled: 1,
            }),
        ];
        let err = PriorityBuffer::fill(input, 10).unwrap_err();
        assert!(matches!(err, PipelineError::DeadlineExceeded { .. }));
    }

    #[test]
    fn drain_size_hint_tracks_remaining() {
        let input = vec![
            Diagnostic::error("a.rs", 1, 1, "e"),
            Diagnostic::warning("a.rs", 2, 1, "w"),
        ];
        let mut buffer = PriorityBuffer::fill(ok_items(input), 10).unwrap();
        assert_eq!(buffer.size_hint(), (2, Some(2)));
        buffer.next();
        assert_eq!(buffer.size_hint(), (1, Some(1)));
        buffer.next();
        assert!(buffer.is_empty());
    }
}
