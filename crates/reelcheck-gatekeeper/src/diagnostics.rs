//! Per-row diagnostics and run reports
//!
//! Every diagnostic is emitted twice: as a `tracing` event for whoever is
//! listening, and as a [`Diagnostic`] value kept in the [`IngestReport`].

use std::fmt;

use tracing::{info, warn};

use crate::{RawRow, SkipReason};

/// Severity of a recorded diagnostic
///
/// Fatal conditions are not recorded here; they end the run as an
/// `IngestError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// A field was repaired
    Info,

    /// A row was skipped
    Warning,
}

/// One diagnostic tied to an input row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Row number (first data row is 1)
    pub row: usize,

    /// Severity
    pub severity: Severity,

    /// Rule that fired (skips) or repair kind (infos)
    pub rule: &'static str,

    /// Human-readable message, including the raw row
    pub message: String,
}

/// Kinds of field repair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepairKind {
    /// Misspelled or merged genre replaced
    Genre,

    /// "also known as" marker removed from the alternate title
    Alias,

    /// Trailing ", Word" qualifier removed from a title
    TrailingQualifier,

    /// Misspelled job replaced
    Job,
}

impl RepairKind {
    /// Short name used in diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            RepairKind::Genre => "genre-repair",
            RepairKind::Alias => "alias-strip",
            RepairKind::TrailingQualifier => "trailing-qualifier",
            RepairKind::Job => "job-repair",
        }
    }
}

/// A single field change made during normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repair {
    /// What kind of repair
    pub kind: RepairKind,

    /// Value before
    pub from: String,

    /// Value after
    pub to: String,
}

impl Repair {
    /// Create a repair record
    pub fn new(kind: RepairKind, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            kind,
            from: from.into(),
            to: to.into(),
        }
    }
}

impl fmt::Display for Repair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            RepairKind::Genre => write!(f, "Changed genre from {} to {}", self.from, self.to),
            RepairKind::Alias => write!(f, "Removed aka from '{}', now is '{}'", self.from, self.to),
            RepairKind::TrailingQualifier => {
                write!(f, "Removed trailing qualifier from '{}', now is '{}'", self.from, self.to)
            }
            RepairKind::Job => write!(f, "Changed job from {} to {}", self.from, self.to),
        }
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone)]
pub struct IngestReport<T> {
    /// The accepted records
    pub records: T,

    /// Data rows read, including skipped ones
    pub rows_read: usize,

    /// Repairs and skips, in row order
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> IngestReport<T> {
    /// Number of skipped rows
    pub fn skipped(&self) -> usize {
        self.warnings().count()
    }

    /// Number of repairs applied
    pub fn repaired(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Info)
            .count()
    }

    /// Skip diagnostics only
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    /// Transform the records, keeping the counters
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> IngestReport<U> {
        IngestReport {
            records: f(self.records),
            rows_read: self.rows_read,
            diagnostics: self.diagnostics,
        }
    }
}

/// Collects diagnostics for one run and mirrors them to `tracing`
#[derive(Debug)]
pub(crate) struct DiagnosticLog {
    dataset: &'static str,
    entries: Vec<Diagnostic>,
}

impl DiagnosticLog {
    pub(crate) fn new(dataset: &'static str) -> Self {
        Self {
            dataset,
            entries: Vec::new(),
        }
    }

    pub(crate) fn skip(&mut self, row: &RawRow, reason: &SkipReason) {
        let message = format!("SKIPPED: {} {}. Line {}", row, reason, row.number());
        warn!(dataset = self.dataset, rule = reason.rule(), "{}", message);
        self.entries.push(Diagnostic {
            row: row.number(),
            severity: Severity::Warning,
            rule: reason.rule(),
            message,
        });
    }

    pub(crate) fn skip_unreadable(&mut self, row: usize, reason: &SkipReason) {
        let message = format!("SKIPPED: {}. Line {}", reason, row);
        warn!(dataset = self.dataset, rule = reason.rule(), "{}", message);
        self.entries.push(Diagnostic {
            row,
            severity: Severity::Warning,
            rule: reason.rule(),
            message,
        });
    }

    pub(crate) fn repair(&mut self, row: &RawRow, repair: &Repair) {
        let message = format!("CHANGED: {} {}. Line {}", row, repair, row.number());
        info!(dataset = self.dataset, kind = repair.kind.as_str(), "{}", message);
        self.entries.push(Diagnostic {
            row: row.number(),
            severity: Severity::Info,
            rule: repair.kind.as_str(),
            message,
        });
    }

    pub(crate) fn into_entries(self) -> Vec<Diagnostic> {
        self.entries
    }
}
