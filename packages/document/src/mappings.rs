//! # Mapping Encoder
//!
//! Turns the patch list into source map segments in two steps:
//!
//! 1. [`OffsetRemap`]: where every original byte lands in the output, or
//!    `None` if a replacement consumed it.
//! 2. Segment emission: mapped characters that start a chunk or a line (or
//!    every character in hires mode) and the first character of each
//!    replacement become segments, positioned by walking the output text.
//!
//! Encoding the segments is left to [`patchmap_sourcemap::SourceMap`].

use crate::patch::Patch;
use indexmap::IndexSet;
use patchmap_sourcemap::{LineIndex, MappingsBuilder, Segment};
use std::collections::BTreeSet;

/// Output offset of every original byte offset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetRemap {
    offsets: Vec<Option<usize>>,
    content_starts: Vec<usize>,
}

impl OffsetRemap {
    /// Build the remap for `patches` over a text of `len` bytes
    ///
    /// `base` is the output offset of original offset zero (the length of
    /// any prepended text). Each patch shifts everything after it by its
    /// length delta; the shifts compose in patch order.
    pub fn build(len: usize, patches: &[Patch], base: usize) -> Self {
        let mut offsets: Vec<Option<usize>> = (0..len).map(|i| Some(i + base)).collect();
        let mut content_starts = Vec::with_capacity(patches.len());

        let mut added = 0;
        let mut removed = 0;
        let mut cursor = 0;

        for patch in patches {
            shift(&mut offsets[cursor..patch.start], added, removed);
            content_starts.push(base + patch.start + added - removed);

            offsets[patch.range()].fill(None);
            added += patch.content.len();
            removed += patch.end() - patch.start;
            cursor = patch.end();
        }
        shift(&mut offsets[cursor..], added, removed);

        Self { offsets, content_starts }
    }

    pub fn get(&self, offset: usize) -> Option<usize> {
        self.offsets.get(offset).copied().flatten()
    }

    /// Output offset at which each patch's content begins
    pub fn content_starts(&self) -> &[usize] {
        &self.content_starts
    }
}

fn shift(slots: &mut [Option<usize>], added: usize, removed: usize) {
    for slot in slots.iter_mut().flatten() {
        *slot = *slot + added - removed;
    }
}

/// Everything the encoder reads from a document
pub(crate) struct MappingSource<'a> {
    pub original: &'a str,
    pub output: &'a str,
    pub prepended_len: usize,
    pub patches: &'a [Patch],
    pub sourcemap_locations: &'a BTreeSet<usize>,
    pub names: &'a IndexSet<String>,
    pub hires: bool,
}

/// A position to map: output offset, original offset, name index
type MappingPoint = (usize, usize, Option<u32>);

pub(crate) fn encode_segments(source: &MappingSource<'_>) -> Vec<Vec<Segment>> {
    let original = source.original;
    let remap = OffsetRemap::build(original.len(), source.patches, source.prepended_len);
    let mut points: Vec<MappingPoint> = Vec::new();

    for (patch, &output_offset) in source.patches.iter().zip(remap.content_starts()) {
        if patch.is_insert() || patch.content.is_empty() {
            continue;
        }

        let name = if patch.stores_name() {
            source
                .names
                .get_index_of(patch.original(original))
                .map(|index| index as u32)
        } else {
            None
        };
        points.push((output_offset, patch.start, name));
    }

    let mut previous: Option<(char, Option<usize>)> = None;
    for (offset, ch) in original.char_indices() {
        let mapped = remap.get(offset);

        if let Some(output_offset) = mapped {
            let starts_chunk = match previous {
                None => true,
                Some((prev_ch, prev_output)) => {
                    prev_ch == '\n' || prev_output.map_or(true, |prev| prev + prev_ch.len_utf8() != output_offset)
                }
            };

            if ch != '\n' && (source.hires || starts_chunk || source.sourcemap_locations.contains(&offset)) {
                points.push((output_offset, offset, None));
            }
        }

        previous = Some((ch, mapped));
    }

    points.sort_unstable_by_key(|&(output_offset, ..)| output_offset);

    let original_lines = LineIndex::new(original);
    let mut builder = MappingsBuilder::new();
    let mut cursor = 0;

    for (output_offset, original_offset, name) in points {
        builder.advance(&source.output[cursor..output_offset]);
        cursor = output_offset;

        let (line, column) = original_lines.line_col(original, original_offset);
        builder.add_mapping(line, column, name);
    }
    builder.advance(&source.output[cursor..]);

    builder.into_lines()
}
