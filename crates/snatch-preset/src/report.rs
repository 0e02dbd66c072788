//! Migration reports
//!
//! A [`MigrationReport`] lists every edit a migration made to a document.
//! An empty edit list means the document was left exactly as given.

use snatch_io::Document;
use std::fmt::{self, Display, Formatter};

/// A single structural edit made by a migration
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    /// An object was created where the key was absent
    CreatedSection {
        /// Dotted path of the new object
        path: String,
    },
    /// A non-object value was replaced by an empty object
    ReplacedSection {
        /// Dotted path of the replaced value
        path: String,
    },
    /// A missing key was set
    Inserted {
        /// Dotted path of the new key
        path: String,
        /// Value it was set to
        value: Document,
    },
    /// A key was moved (and possibly renamed)
    Moved {
        /// Dotted source path
        from: String,
        /// Dotted destination path
        to: String,
    },
    /// The `version` tag was set
    Version {
        /// Previous tag, if any
        from: Option<String>,
        /// New tag
        to: String,
    },
}

impl Display for Edit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreatedSection { path } => write!(f, "created {path}"),
            Self::ReplacedSection { path } => write!(f, "replaced non-object {path}"),
            Self::Inserted { path, value } => write!(f, "added {path} = {value}"),
            Self::Moved { from, to } => write!(f, "moved {from} -> {to}"),
            Self::Version { from: Some(from), to } => write!(f, "version {from} -> {to}"),
            Self::Version { from: None, to } => write!(f, "version set to {to}"),
        }
    }
}

/// Outcome of applying one migration to one document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MigrationReport {
    edits: Vec<Edit>,
    skipped: Option<String>,
}

impl MigrationReport {
    /// Empty report (nothing changed yet)
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Report for a document that was not touched, with the reason
    #[inline]
    #[must_use]
    pub fn skipped(reason: impl Into<String>) -> Self {
        Self {
            edits: Vec::new(),
            skipped: Some(reason.into()),
        }
    }

    /// Record an edit
    #[inline]
    pub fn push(&mut self, edit: Edit) {
        self.edits.push(edit);
    }

    /// Append all edits of another report
    pub fn merge(&mut self, other: Self) {
        self.edits.extend(other.edits);
        if self.edits.is_empty() && self.skipped.is_none() {
            self.skipped = other.skipped;
        }
    }

    /// True iff any edit was made
    #[inline]
    #[must_use]
    pub fn changed(&self) -> bool {
        !self.edits.is_empty()
    }

    /// Edits in the order they were made
    #[inline]
    #[must_use]
    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    /// Why nothing was done, when the migration bailed out early
    #[inline]
    #[must_use]
    pub fn skip_reason(&self) -> Option<&str> {
        if self.changed() {
            None
        } else {
            self.skipped.as_deref()
        }
    }
}
