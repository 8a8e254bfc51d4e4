//! Pull-based diagnostic sources.
//!
//! A [`DiagnosticSource`] hands out one diagnostic per call until it reports
//! end-of-stream. Consumers pull only as many items as they need, so a source
//! backed by a growing build log is never read past the point a page fills.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::diagnostic::Diagnostic;
use crate::progress::BuildProgress;

/// Errors raised by a diagnostic source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The source could not be reached (e.g. the build tool is not initialized).
    #[error("diagnostic source unavailable: {reason}")]
    Unavailable {
        /// Why the source is unavailable.
        reason: String,
    },

    /// Reading from the source failed part-way through.
    #[error("failed to read diagnostics from {path}: {source}")]
    Io {
        /// The path being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A record could not be decoded.
    #[error("malformed diagnostic on line {line}: {reason}")]
    Malformed {
        /// One-based line number of the bad record.
        line: usize,
        /// Description of the decode failure.
        reason: String,
    },
}

/// A lazy sequence of diagnostics with an optional build-progress accessor.
pub trait DiagnosticSource {
    /// Checks that the source can be read, before any item is pulled.
    fn check_available(&self) -> Result<(), SourceError> {
        Ok(())
    }

    /// Returns the next diagnostic, an error, or `None` at end-of-stream.
    fn next_diagnostic(&mut self) -> Option<Result<Diagnostic, SourceError>>;

    /// The current build progress, if the source knows it.
    fn build_progress(&self) -> Option<BuildProgress> {
        None
    }
}

impl<S: DiagnosticSource + ?Sized> DiagnosticSource for &mut S {
    fn check_available(&self) -> Result<(), SourceError> {
        (**self).check_available()
    }

    fn next_diagnostic(&mut self) -> Option<Result<Diagnostic, SourceError>> {
        (**self).next_diagnostic()
    }

    fn build_progress(&self) -> Option<BuildProgress> {
        (**self).build_progress()
    }
}

/// A finite, in-memory snapshot of diagnostics.
///
/// Each call to [`cursor`](Self::cursor) starts a fresh enumeration, so the same
/// snapshot can serve every page of a pagination sequence.
#[derive(Clone, Debug, Default)]
pub struct SnapshotSource {
    diagnostics: Vec<Diagnostic>,
    progress: Option<BuildProgress>,
}

impl SnapshotSource {
    /// Creates a snapshot from the given diagnostics.
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            diagnostics,
            progress: None,
        }
    }

    /// Attaches a build-progress value to the snapshot.
    pub fn with_progress(mut self, progress: BuildProgress) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Number of diagnostics in the snapshot.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Returns `true` if the snapshot holds no diagnostics.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Starts a new pull over the snapshot.
    pub fn cursor(&self) -> SnapshotCursor<'_> {
        SnapshotCursor {
            items: self.diagnostics.iter(),
            progress: self.progress,
        }
    }
}

/// A single enumeration over a [`SnapshotSource`].
pub struct SnapshotCursor<'a> {
    items: std::slice::Iter<'a, Diagnostic>,
    progress: Option<BuildProgress>,
}

impl DiagnosticSource for SnapshotCursor<'_> {
    fn next_diagnostic(&mut self) -> Option<Result<Diagnostic, SourceError>> {
        self.items.next().cloned().map(Ok)
    }

    fn build_progress(&self) -> Option<BuildProgress> {
        self.progress
    }
}

/// Decodes one JSON diagnostic per line from a reader, on demand.
///
/// Blank lines are skipped. Lines are only read when the consumer pulls, so a
/// consumer that stops early leaves the rest of the input untouched.
pub struct JsonLinesSource<R> {
    reader: R,
    path: PathBuf,
    line_no: usize,
    buf: String,
    progress: Option<BuildProgress>,
    done: bool,
}

impl JsonLinesSource<BufReader<File>> {
    /// Opens a JSON-lines diagnostics file.
    ///
    /// A missing or unreadable file is reported as [`SourceError::Unavailable`].
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path).map_err(|e| SourceError::Unavailable {
            reason: format!("cannot open {}: {e}", path.display()),
        })?;
        Ok(Self::from_reader(BufReader::new(file), path))
    }
}

impl<R: BufRead> JsonLinesSource<R> {
    /// Wraps an existing reader. `path` is used only in error messages.
    pub fn from_reader(reader: R, path: impl Into<PathBuf>) -> Self {
        Self {
            reader,
            path: path.into(),
            line_no: 0,
            buf: String::new(),
            progress: None,
            done: false,
        }
    }

    /// Attaches a build-progress value to the source.
    pub fn with_progress(mut self, progress: Option<BuildProgress>) -> Self {
        self.progress = progress;
        self
    }

    /// Number of lines consumed so far.
    pub fn lines_read(&self) -> usize {
        self.line_no
    }
}

impl<R: BufRead> DiagnosticSource for JsonLinesSource<R> {
    fn next_diagnostic(&mut self) -> Option<Result<Diagnostic, SourceError>> {
        while !self.done {
            self.buf.clear();
            let read = match self.reader.read_line(&mut self.buf) {
                Ok(n) => n,
                Err(source) => {
                    self.done = true;
                    return Some(Err(SourceError::Io {
                        path: self.path.clone(),
                        source,
                    }));
                }
            };
            if read == 0 {
                self.done = true;
                break;
            }
            self.line_no += 1;
            let text = self.buf.trim();
            if text.is_empty() {
                continue;
            }
            log::trace!("decoding diagnostic at {}:{}", self.path.display(), self.line_no);
            return Some(
                serde_json::from_str::<Diagnostic>(text).map_err(|e| SourceError::Malformed {
                    line: self.line_no,
                    reason: e.to_string(),
                }),
            );
        }
        None
    }

    fn build_progress(&self) -> Option<BuildProgress> {
        self.progress
    }
}
