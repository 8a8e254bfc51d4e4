//! Caller-imposed deadlines checked at every pull.

use std::time::Instant;

use triage_diagnostics::Diagnostic;

use crate::error::PipelineError;

/// An optional point in time after which the call is abandoned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Deadline(Option<Instant>);

impl Deadline {
    /// No deadline.
    pub const NONE: Deadline = Deadline(None);

    /// A deadline at `at`.
    pub fn at(at: Instant) -> Self {
        Self(Some(at))
    }

    /// Returns `true` once the deadline has passed.
    pub fn expired(&self) -> bool {
        self.0.is_some_and(|at| Instant::now() >= at)
    }
}

/// Pull stage that fails with [`PipelineError::DeadlineExceeded`] once the
/// deadline passes, then ends.
pub struct Guarded<I> {
    upstream: I,
    deadline: Deadline,
    stage: &'static str,
    pulled: u64,
    tripped: bool,
}

impl<I> Guarded<I> {
    /// Wraps `upstream` with a deadline check before every pull. `stage`
    /// names the upstream in the error.
    pub fn new(upstream: I, deadline: Deadline, stage: &'static str) -> Self {
        Self {
            upstream,
            deadline,
            stage,
            pulled: 0,
            tripped: false,
        }
    }
}

impl<I> Iterator for Guarded<I>
where
    I: Iterator<Item = Result<Diagnostic, PipelineError>>,
{
    type Item = Result<Diagnostic, PipelineError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.tripped {
            return None;
        }
        if self.deadline.expired() {
            self.tripped = true;
            return Some(Err(PipelineError::DeadlineExceeded {
                stage: self.stage,
                pulled: self.pulled,
            }));
        }
        let item = self.upstream.next()?;
        self.pulled += 1;
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn items(n: u32) -> impl Iterator<Item = Result<Diagnostic, PipelineError>> {
        (0..n).map(|i| Ok(Diagnostic::error("a.rs", i + 1, 1, "e")))
    }

    #[test]
    fn no_deadline_passes_everything() {
        assert_eq!(Guarded::new(items(3), Deadline::NONE, "source").count(), 3);
        assert!(!Deadline::NONE.expired());
    }

    #[test]
    fn future_deadline_passes_everything() {
        let deadline = Deadline::at(Instant::now() + Duration::from_secs(3600));
        assert_eq!(Guarded::new(items(3), deadline, "source").count(), 3);
    }

    #[test]
    fn past_deadline_fails_once() {
        let deadline = Deadline::at(Instant::now());
        let mut guarded = Guarded::new(items(3), deadline, "priority buffer");
        assert!(matches!(
            guarded.next(),
            Some(Err(PipelineError::DeadlineExceeded {
                stage: "priority buffer",
                pulled: 0,
            }))
        ));
        assert!(guarded.next().is_none());
    }
}
