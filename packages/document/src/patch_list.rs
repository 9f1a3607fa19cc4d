//! # Patch List
//!
//! Patches ordered by start offset, never overlapping. Every edit goes
//! through [`PatchList::insert`], which resolves it against the patches
//! already recorded:
//!
//! - an edit covering an existing patch overrides it
//! - an edit nested inside an existing replacement is discarded
//! - an edit straddling the boundary of an existing patch is rejected
//!
//! Resolution is planned before anything is mutated, so a rejected edit
//! leaves the list untouched.

use crate::errors::{EditError, EditResult};
use crate::patch::Patch;
use tracing::debug;

/// Outcome of resolving a new patch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Stored at `index`, after dropping `overridden` patches it covered
    Inserted { index: usize, overridden: usize },

    /// An existing replacement already covers the whole range
    Discarded,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchList {
    patches: Vec<Patch>,
}

impl PatchList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.patches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    pub fn as_slice(&self) -> &[Patch] {
        &self.patches
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Patch> {
        self.patches.iter()
    }

    /// Resolve `patch` against the recorded patches and store it
    ///
    /// `original` is only used to describe conflicts.
    pub fn insert(&mut self, patch: Patch, original: &str) -> EditResult<Placement> {
        let (start, end) = (patch.start, patch.end());
        let mut overridden = Vec::new();

        // Walk backwards from the patch ending latest
        let mut index = self.patches.len();
        while index > 0 {
            let existing = &self.patches[index - 1];

            if !patch.is_insert() && start <= existing.start && end >= existing.end() {
                overridden.push(index - 1);
            } else if existing.covers(&patch) {
                debug!(start, end, outer = ?existing.range(), "Discarding edit nested in replacement");
                return Ok(Placement::Discarded);
            } else if start < existing.end() && end > existing.start {
                return Err(EditError::Conflict {
                    start,
                    end,
                    original: original[start..end].to_string(),
                });
            } else if start >= existing.end() && !(patch.is_insert() && existing.is_insert() && existing.start == start) {
                // Earlier patches are untouched. A newer insertion at the
                // same offset goes in front of older ones.
                break;
            }

            index -= 1;
        }

        // Collected in descending order, all at or after `index`
        for &doomed in &overridden {
            self.patches.remove(doomed);
        }

        if !overridden.is_empty() {
            debug!(start, end, overridden = overridden.len(), "Edit overrides earlier patches");
        }

        self.patches.insert(index, patch);
        Ok(Placement::Inserted {
            index,
            overridden: overridden.len(),
        })
    }

    /// Place a zero-width patch at a known-good position
    pub(crate) fn insert_at(&mut self, index: usize, patch: Patch) {
        debug_assert!(patch.is_insert());
        debug_assert!(index == 0 || self.patches[index - 1].end() <= patch.start);
        debug_assert!(index == self.patches.len() || patch.start <= self.patches[index].start);
        self.patches.insert(index, patch);
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Patch> {
        self.patches.get_mut(index)
    }

    /// The replacement whose span strictly contains `offset`, if any
    pub fn strictly_containing(&self, offset: usize) -> Option<&Patch> {
        let candidate = self.patches.partition_point(|p| p.start < offset);
        self.patches[..candidate]
            .iter()
            .rev()
            .find(|p| !p.is_insert())
            .filter(|p| p.strictly_contains(offset))
    }

    /// Patches lying entirely within `start..end`
    ///
    /// Insertions at either end are included.
    pub fn within(&self, start: usize, end: usize) -> impl Iterator<Item = &Patch> {
        self.patches
            .iter()
            .skip_while(move |p| p.start < start)
            .take_while(move |p| p.start <= end)
            .filter(move |p| p.end() <= end)
    }

    /// Panic if the ordering or non-overlap invariant is broken
    pub fn assert_invariants(&self, len: usize) {
        for pair in self.patches.windows(2) {
            assert!(
                pair[0].start <= pair[1].start && pair[0].end() <= pair[1].start,
                "patch list corrupt: {:?} overlaps or precedes {:?}",
                pair[0].range(),
                pair[1].range()
            );
        }

        if let Some(last) = self.patches.last() {
            assert!(last.end() <= len, "patch {:?} past end of text ({len})", last.range());
        }
    }
}

impl<'a> IntoIterator for &'a PatchList {
    type Item = &'a Patch;
    type IntoIter = std::slice::Iter<'a, Patch>;

    fn into_iter(self) -> Self::IntoIter {
        self.patches.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "abcdefghij";

    fn ranges(list: &PatchList) -> Vec<(usize, usize, &str)> {
        list.iter().map(|p| (p.start, p.end(), p.content.as_str())).collect()
    }

    #[test]
    fn test_sorted_insertion() {
        let mut list = PatchList::new();
        list.insert(Patch::replace(6, 8, "x", false), TEXT).unwrap();
        list.insert(Patch::replace(1, 2, "y", false), TEXT).unwrap();
        list.insert(Patch::insert(4, "z"), TEXT).unwrap();

        assert_eq!(ranges(&list), vec![(1, 2, "y"), (4, 4, "z"), (6, 8, "x")]);
        list.assert_invariants(TEXT.len());
    }

    #[test]
    fn test_partial_overlap_conflicts() {
        let mut list = PatchList::new();
        list.insert(Patch::replace(2, 5, "x", false), TEXT).unwrap();

        let err = list.insert(Patch::replace(3, 7, "y", false), TEXT).unwrap_err();
        assert!(matches!(err, EditError::Conflict { start: 3, end: 7, ref original } if original == "defg"));

        // Overlap from the left is just as ambiguous
        assert!(list.insert(Patch::replace(0, 3, "y", false), TEXT).is_err());
        assert_eq!(ranges(&list), vec![(2, 5, "x")]);
    }

    #[test]
    fn test_covering_edit_overrides() {
        let mut list = PatchList::new();
        list.insert(Patch::replace(3, 4, "a", false), TEXT).unwrap();
        list.insert(Patch::insert(5, "b"), TEXT).unwrap();
        list.insert(Patch::replace(8, 9, "c", false), TEXT).unwrap();

        let placement = list.insert(Patch::replace(2, 6, "X", false), TEXT).unwrap();
        assert_eq!(placement, Placement::Inserted { index: 0, overridden: 2 });
        assert_eq!(ranges(&list), vec![(2, 6, "X"), (8, 9, "c")]);
    }

    #[test]
    fn test_nested_edit_is_discarded() {
        let mut list = PatchList::new();
        list.insert(Patch::replace(2, 7, "x", false), TEXT).unwrap();

        assert_eq!(list.insert(Patch::replace(3, 5, "y", false), TEXT).unwrap(), Placement::Discarded);
        assert_eq!(list.insert(Patch::insert(4, "y"), TEXT).unwrap(), Placement::Discarded);
        assert_eq!(ranges(&list), vec![(2, 7, "x")]);
    }

    #[test]
    fn test_failed_edit_leaves_list_untouched() {
        let mut list = PatchList::new();
        list.insert(Patch::replace(1, 5, "a", false), TEXT).unwrap();
        list.insert(Patch::replace(6, 7, "b", false), TEXT).unwrap();
        let before = list.clone();

        // Would override 6..7 but straddles 1..5
        assert!(list.insert(Patch::replace(4, 9, "c", false), TEXT).is_err());
        assert_eq!(list, before);
    }

    #[test]
    fn test_insertions_at_same_offset() {
        let mut list = PatchList::new();
        list.insert(Patch::replace(3, 5, "r", false), TEXT).unwrap();
        list.insert(Patch::insert(3, "a"), TEXT).unwrap();
        list.insert(Patch::insert(3, "b"), TEXT).unwrap();
        list.insert(Patch::insert(5, "c"), TEXT).unwrap();

        assert_eq!(
            ranges(&list),
            vec![(3, 3, "b"), (3, 3, "a"), (3, 5, "r"), (5, 5, "c")]
        );
        list.assert_invariants(TEXT.len());
    }

    #[test]
    fn test_adjacent_replacements() {
        let mut list = PatchList::new();
        list.insert(Patch::replace(2, 4, "x", false), TEXT).unwrap();
        list.insert(Patch::replace(4, 6, "y", false), TEXT).unwrap();
        list.insert(Patch::replace(0, 2, "z", false), TEXT).unwrap();

        assert_eq!(ranges(&list), vec![(0, 2, "z"), (2, 4, "x"), (4, 6, "y")]);
    }

    #[test]
    fn test_strictly_containing() {
        let mut list = PatchList::new();
        list.insert(Patch::replace(2, 6, "x", false), TEXT).unwrap();
        list.insert(Patch::insert(8, "y"), TEXT).unwrap();

        assert!(list.strictly_containing(2).is_none());
        assert_eq!(list.strictly_containing(4).map(|p| p.range()), Some(2..6));
        assert!(list.strictly_containing(6).is_none());
        assert!(list.strictly_containing(9).is_none());
    }

    #[test]
    fn test_within() {
        let mut list = PatchList::new();
        list.insert(Patch::insert(0, "a"), TEXT).unwrap();
        list.insert(Patch::replace(2, 4, "b", false), TEXT).unwrap();
        list.insert(Patch::replace(6, 8, "d", false), TEXT).unwrap();
        // Lands before "d"; inserted the other way round, "d" would override it
        list.insert(Patch::insert(6, "c"), TEXT).unwrap();

        let found: Vec<_> = list.within(2, 6).map(|p| p.content.as_str()).collect();
        assert_eq!(found, vec!["b", "c"]);

        let found: Vec<_> = list.within(0, 8).map(|p| p.content.as_str()).collect();
        assert_eq!(found, vec!["a", "b", "c", "d"]);
    }

    #[test]
    #[should_panic(expected = "patch list corrupt")]
    fn test_invariant_violation_panics() {
        let mut list = PatchList::new();
        list.patches.push(Patch::replace(2, 6, "x", false));
        list.patches.push(Patch::replace(4, 8, "y", false));
        list.assert_invariants(TEXT.len());
    }
}
