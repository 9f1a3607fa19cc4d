//! # Patches
//!
//! A patch records what replaces one span of the original text. Insertions
//! and replacements are distinct variants: an insertion consumes no original
//! characters and sits before the character at its offset.

use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchKind {
    /// Zero-width insertion before `start`
    Insert,

    /// Replacement of `start..end`
    Replace {
        end: usize,
        /// Record the replaced text in the names table of generated maps
        store_name: bool,
    },
}

/// One recorded edit against the original text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    pub start: usize,
    pub kind: PatchKind,
    pub content: String,
}

impl Patch {
    pub fn insert(at: usize, content: impl Into<String>) -> Self {
        Self {
            start: at,
            kind: PatchKind::Insert,
            content: content.into(),
        }
    }

    /// Replacement of `start..end`; an empty range yields an insertion
    pub fn replace(start: usize, end: usize, content: impl Into<String>, store_name: bool) -> Self {
        if start == end {
            return Self::insert(start, content);
        }

        Self {
            start,
            kind: PatchKind::Replace { end, store_name },
            content: content.into(),
        }
    }

    pub fn end(&self) -> usize {
        match self.kind {
            PatchKind::Insert => self.start,
            PatchKind::Replace { end, .. } => end,
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    pub fn is_insert(&self) -> bool {
        matches!(self.kind, PatchKind::Insert)
    }

    pub fn stores_name(&self) -> bool {
        matches!(self.kind, PatchKind::Replace { store_name: true, .. })
    }

    /// The original text this patch replaces
    pub fn original<'a>(&self, text: &'a str) -> &'a str {
        &text[self.range()]
    }

    /// Whether `offset` falls strictly inside the replaced span
    pub fn strictly_contains(&self, offset: usize) -> bool {
        self.start < offset && offset < self.end()
    }

    /// Whether `other`'s range lies entirely within this replacement
    ///
    /// Insertions at either boundary of a replacement sit next to it, not
    /// inside it.
    pub fn covers(&self, other: &Patch) -> bool {
        if self.is_insert() || other.start < self.start || other.end() > self.end() {
            return false;
        }

        !(other.is_insert() && (other.start == self.start || other.start == self.end()))
    }
}
