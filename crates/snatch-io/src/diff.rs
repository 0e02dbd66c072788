//! Human-readable document diffs
//!
//! For logging only; nothing decides whether to write based on a diff.
//!
//! Rules:
//! - objects recurse per key: `+ path` added, `- path` removed
//! - a differing leaf (or a type change) is `~ path`
//! - sequences of different length give one `~ path (length changed)`;
//!   equal-length sequences compare element by element
//! - no differences at all is [`FORMATTING_ONLY`]

use crate::Document;
use std::fmt::{self, Display, Formatter};

/// Summary returned when two documents are semantically identical
pub const FORMATTING_ONLY: &str = "formatting only";

/// One step into a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Object key
    Key(String),
    /// Sequence index
    Index(usize),
}

/// Location within a document, e.g. `effects.crt.vignette` or `passes[2]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocPath(Vec<Segment>);

impl DocPath {
    /// Root path
    #[inline]
    #[must_use]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Check if this is the root path
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Path segments
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    /// Append a key, returning new path
    #[must_use]
    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut new = self.clone();
        new.0.push(Segment::Key(key.into()));
        new
    }

    /// Append an index, returning new path
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        let mut new = self.clone();
        new.0.push(Segment::Index(index));
        new
    }
}

impl Display for DocPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("root");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                Segment::Key(key) if i == 0 => f.write_str(key)?,
                Segment::Key(key) => write!(f, ".{key}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// Kind of a single difference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Key present only in the new document
    Added,
    /// Key present only in the old document
    Removed,
    /// Leaf value differs
    Modified,
    /// Sequence length differs
    LengthChanged,
}

/// A single difference between two documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    /// What happened
    pub kind: ChangeKind,
    /// Where it happened
    pub path: DocPath,
}

impl Display for Change {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.kind {
            ChangeKind::Added => write!(f, "+ {}", self.path),
            ChangeKind::Removed => write!(f, "- {}", self.path),
            ChangeKind::Modified => write!(f, "~ {}", self.path),
            ChangeKind::LengthChanged => write!(f, "~ {} (length changed)", self.path),
        }
    }
}

/// All differences between `old` and `new`
#[must_use]
pub fn diff(old: &Document, new: &Document) -> Vec<Change> {
    let mut changes = Vec::new();
    diff_at(old, new, &DocPath::root(), &mut changes);
    changes
}

/// Terse comma-separated description of the differences
#[must_use]
pub fn diff_summary(old: &Document, new: &Document) -> String {
    let changes = diff(old, new);
    if changes.is_empty() {
        return FORMATTING_ONLY.to_string();
    }
    changes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn diff_at(old: &Document, new: &Document, path: &DocPath, changes: &mut Vec<Change>) {
    match (old, new) {
        (Document::Object(old_map), Document::Object(new_map)) => {
            for (key, new_value) in new_map {
                match old_map.get(key) {
                    Some(old_value) => diff_at(old_value, new_value, &path.key(key), changes),
                    None => changes.push(Change {
                        kind: ChangeKind::Added,
                        path: path.key(key),
                    }),
                }
            }
            for key in old_map.keys().filter(|key| !new_map.contains_key(*key)) {
                changes.push(Change {
                    kind: ChangeKind::Removed,
                    path: path.key(key),
                });
            }
        }
        (Document::Array(old_items), Document::Array(new_items)) => {
            if old_items.len() != new_items.len() {
                changes.push(Change {
                    kind: ChangeKind::LengthChanged,
                    path: path.clone(),
                });
                return;
            }
            for (i, (old_item, new_item)) in old_items.iter().zip(new_items).enumerate() {
                diff_at(old_item, new_item, &path.index(i), changes);
            }
        }
        _ if !leaf_eq(old, new) => changes.push(Change {
            kind: ChangeKind::Modified,
            path: path.clone(),
        }),
        _ => {}
    }
}

/// Leaf equality where `1` and `1.0` count as the same number
#[allow(clippy::float_cmp)]
fn leaf_eq(old: &Document, new: &Document) -> bool {
    match (old, new) {
        (Document::Number(a), Document::Number(b)) => {
            a == b || matches!((a.as_f64(), b.as_f64()), (Some(x), Some(y)) if x == y)
        }
        _ => old == new,
    }
}
