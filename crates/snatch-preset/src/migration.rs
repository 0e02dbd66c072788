//! The migration trait and migration chains
//!
//! Every migration edits a document in place and reports what it did. A
//! migration must be idempotent: a second application reports no edits and
//! leaves the document as the first application left it.

use crate::backup::is_backup;
use crate::report::MigrationReport;
use crate::transforms::{AddGrainDownscale, EnsureVignetteDefaults, RelocateCrtVignette};
use snatch_io::{Document, Format};
use std::fmt::Debug;
use std::path::Path;

/// A narrow, idempotent edit of a preset document
///
/// Implementations must leave the document untouched whenever the returned
/// report has no edits, including when the document has an unexpected shape.
pub trait Migration: Debug {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Apply in place
    fn apply(&self, document: &mut Document) -> MigrationReport;

    /// Whether a file found by directory scan is a candidate
    ///
    /// Defaults to JSON files that are not backups.
    fn selects(&self, path: &Path) -> bool {
        Format::from_path(path) == Some(Format::Json) && !is_backup(path)
    }

    /// Apply to an owned document, returning it with the changed flag
    fn migrate(&self, mut document: Document) -> (Document, bool) {
        let report = self.apply(&mut document);
        (document, report.changed())
    }
}

/// Named migrations, for front ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationKind {
    /// [`EnsureVignetteDefaults`]
    EnsureVignette,
    /// [`RelocateCrtVignette`]
    RelocateVignette,
    /// [`AddGrainDownscale`]
    GrainDownscale,
    /// [`standard_chain`]
    Upgrade,
}

impl MigrationKind {
    /// Build the migration this kind names
    #[must_use]
    pub fn build(self) -> Box<dyn Migration> {
        match self {
            Self::EnsureVignette => Box::new(EnsureVignetteDefaults),
            Self::RelocateVignette => Box::new(RelocateCrtVignette),
            Self::GrainDownscale => Box::new(AddGrainDownscale),
            Self::Upgrade => Box::new(standard_chain()),
        }
    }
}

/// Several migrations applied in a fixed order
#[derive(Debug, Default)]
pub struct Chain {
    steps: Vec<Box<dyn Migration>>,
}

impl Chain {
    /// Create empty chain
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step, returning the chain
    #[must_use]
    pub fn then(mut self, step: impl Migration + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Step names in application order
    #[must_use]
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|step| step.name()).collect()
    }
}

impl Migration for Chain {
    fn name(&self) -> &'static str {
        "chain"
    }

    fn apply(&self, document: &mut Document) -> MigrationReport {
        let mut report = MigrationReport::new();
        for step in &self.steps {
            report.merge(step.apply(document));
        }
        report
    }

    fn selects(&self, path: &Path) -> bool {
        self.steps.iter().any(|step| step.selects(path))
    }
}

/// All preset migrations in their required order
///
/// Relocation runs first: legacy presets carry the vignette only under
/// `crt`, and the defaults step only looks at `color_grade`.
#[must_use]
pub fn standard_chain() -> Chain {
    Chain::new()
        .then(RelocateCrtVignette)
        .then(EnsureVignetteDefaults)
        .then(AddGrainDownscale)
}
