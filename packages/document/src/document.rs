//! # Document
//!
//! The editing surface over one immutable original text.
//!
//! Edits are recorded as patches and never touch the original; the output
//! is rebuilt from the patch list on every call.
//!
//! ```text
//! prepended | original with patches spliced in | appended
//! ```

use crate::errors::{EditError, EditResult};
use crate::indent::indent_patches;
use crate::mappings::{encode_segments, MappingSource};
use crate::options::{DocumentOptions, IndentOptions, MapOptions};
use crate::patch::Patch;
use crate::patch_list::{PatchList, Placement};
use indexmap::IndexSet;
use patchmap_common::{GuessIndent, IndentDetector, PathRelativizer, SlashRelativizer};
use patchmap_sourcemap::{Segment, SourceMap};
use regex::Regex;
use std::collections::BTreeSet;
use std::fmt;
use std::ops::{Bound, Range, RangeBounds};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// A text plus the edits recorded against it
#[derive(Debug, Clone)]
pub struct Document {
    /// Shared with every clone, never mutated
    original: Arc<str>,
    filename: Option<String>,
    prepended: String,
    appended: String,
    patches: PatchList,
    indent_exclusion_ranges: Vec<Range<usize>>,
    sourcemap_locations: BTreeSet<usize>,
    stored_names: IndexSet<String>,
    indent_str: Option<String>,
    replace_warned: bool,
}

impl Document {
    pub fn new(original: impl Into<Arc<str>>) -> Self {
        Self::with_options(original, DocumentOptions::default())
    }

    pub fn with_options(original: impl Into<Arc<str>>, options: DocumentOptions) -> Self {
        Self::with_detector(original, options, &GuessIndent)
    }

    /// Create a document, detecting its indentation with `detector` unless
    /// the options fix one
    pub fn with_detector(
        original: impl Into<Arc<str>>,
        options: DocumentOptions,
        detector: &dyn IndentDetector,
    ) -> Self {
        let original = original.into();
        let indent_str = options.indent_str.or_else(|| detector.detect(&original));

        Self {
            original,
            filename: options.filename,
            prepended: String::new(),
            appended: String::new(),
            patches: PatchList::new(),
            indent_exclusion_ranges: options.indent_exclusion_ranges,
            sourcemap_locations: BTreeSet::new(),
            stored_names: IndexSet::new(),
            indent_str,
            replace_warned: false,
        }
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    /// Length of the original text in bytes
    pub fn len(&self) -> usize {
        self.original.len()
    }

    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn patches(&self) -> &[Patch] {
        self.patches.as_slice()
    }

    /// Names recorded by `overwrite(.., store_name = true)`, in first-use order
    pub fn stored_names(&self) -> impl Iterator<Item = &str> {
        self.stored_names.iter().map(String::as_str)
    }

    /// Always emit a segment for the character at `offset`
    pub fn add_sourcemap_location(&mut self, offset: usize) -> &mut Self {
        self.sourcemap_locations.insert(offset);
        self
    }

    pub fn append(&mut self, content: &str) -> &mut Self {
        self.appended.push_str(content);
        self
    }

    pub fn prepend(&mut self, content: &str) -> &mut Self {
        self.prepended.insert_str(0, content);
        self
    }

    /// Insert `content` before the character at `index`
    pub fn insert(&mut self, index: usize, content: &str) -> EditResult<&mut Self> {
        self.patch(index, index, content, false)?;
        Ok(self)
    }

    /// Replace `start..end` with `content`
    ///
    /// With `store_name`, the replaced text is recorded in the names table so
    /// the generated map keeps the original identifier.
    pub fn overwrite(&mut self, start: usize, end: usize, content: &str, store_name: bool) -> EditResult<&mut Self> {
        let recorded = self.patch(start, end, content, store_name)?;

        if recorded && store_name && start < end {
            self.stored_names.insert(self.original[start..end].to_string());
        }
        Ok(self)
    }

    /// Deprecated alias for [`overwrite`](Self::overwrite)
    pub fn replace(&mut self, start: usize, end: usize, content: &str) -> EditResult<&mut Self> {
        if !self.replace_warned {
            warn!(
                filename = self.filename.as_deref().unwrap_or("<anonymous>"),
                "Document::replace is deprecated, use Document::overwrite instead"
            );
            self.replace_warned = true;
        }

        self.overwrite(start, end, content, false)
    }

    pub fn remove(&mut self, start: usize, end: usize) -> EditResult<&mut Self> {
        self.patch(start, end, "", false)?;
        Ok(self)
    }

    /// Current output location of an original character
    pub fn locate(&self, _offset: usize) -> EditResult<usize> {
        Err(EditError::Deprecated {
            operation: "Document::locate",
            replacement: "Document::generate_decoded_map",
        })
    }

    /// Original location of an output character
    pub fn locate_origin(&self, _offset: usize) -> EditResult<usize> {
        Err(EditError::Deprecated {
            operation: "Document::locate_origin",
            replacement: "Document::generate_decoded_map",
        })
    }

    fn check_range(&self, start: usize, end: usize) -> EditResult<()> {
        let len = self.original.len();
        if end > len {
            return Err(EditError::OutOfBounds { start, end, len });
        }
        if start > end {
            return Err(EditError::InvalidArgument(format!("start {start} is after end {end}")));
        }
        for offset in [start, end] {
            if !self.original.is_char_boundary(offset) {
                return Err(EditError::InvalidArgument(format!(
                    "offset {offset} is not on a character boundary"
                )));
            }
        }
        Ok(())
    }

    /// Record an edit; `false` when it was empty or nested in a replacement
    fn patch(&mut self, start: usize, end: usize, content: &str, store_name: bool) -> EditResult<bool> {
        self.check_range(start, end)?;

        if start == end && content.is_empty() {
            return Ok(false);
        }

        let patch = Patch::replace(start, end, content, store_name);
        match self.patches.insert(patch, &self.original)? {
            Placement::Inserted { index, overridden } => {
                debug!(start, end, index, overridden, "Recorded patch");
                Ok(true)
            }
            Placement::Discarded => Ok(false),
        }
    }

    /// Output corresponding to the original range, with contained patches
    /// spliced in
    ///
    /// Fails if either end of the range falls strictly inside a replaced span.
    pub fn slice(&self, range: impl RangeBounds<usize>) -> EditResult<String> {
        let len = self.original.len();
        let out_of_bounds = |start: usize, end: usize| EditError::OutOfBounds { start, end, len };

        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.checked_add(1).ok_or_else(|| out_of_bounds(s, s))?,
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&e) => e.checked_add(1).ok_or_else(|| out_of_bounds(start, e))?,
            Bound::Excluded(&e) => e,
            Bound::Unbounded => len,
        };

        self.check_range(start, end)?;

        if self.patches.strictly_containing(start).is_some() || self.patches.strictly_containing(end).is_some() {
            return Err(EditError::AmbiguousAnchor { start, end });
        }

        Ok(self.splice(start, end))
    }

    fn splice(&self, start: usize, end: usize) -> String {
        let mut result = String::with_capacity(end - start);
        let mut last = start;

        for patch in self.patches.within(start, end) {
            result.push_str(&self.original[last..patch.start]);
            result.push_str(&patch.content);
            last = patch.end();
        }
        result.push_str(&self.original[last..end]);

        result
    }

    /// Independent document holding only the output for `start..end`
    pub fn snip(&self, start: usize, end: usize) -> EditResult<Document> {
        self.check_range(start, end)?;
        if self.patches.strictly_containing(start).is_some() || self.patches.strictly_containing(end).is_some() {
            return Err(EditError::AmbiguousAnchor { start, end });
        }

        let mut clone = self.clone();
        clone.remove(0, start)?;
        clone.remove(end, clone.len())?;
        Ok(clone)
    }

    pub fn trim_start(&mut self, pattern: Option<&str>) -> EditResult<&mut Self> {
        let rx = Regex::new(&format!("^(?:{})+", pattern.unwrap_or(r"\s")))?;

        self.prepended = rx.replace(&self.prepended, "").into_owned();
        if !self.prepended.is_empty() {
            return Ok(self);
        }

        if let Some(end) = rx.find(&self.original).map(|m| m.end()) {
            self.patch(0, end, "", false)?;
        }
        Ok(self)
    }

    pub fn trim_end(&mut self, pattern: Option<&str>) -> EditResult<&mut Self> {
        let rx = Regex::new(&format!("(?:{})+$", pattern.unwrap_or(r"\s")))?;

        self.appended = rx.replace(&self.appended, "").into_owned();
        if !self.appended.is_empty() {
            return Ok(self);
        }

        if let Some(start) = rx.find(&self.original).map(|m| m.start()) {
            let len = self.original.len();
            self.patch(start, len, "", false)?;
        }
        Ok(self)
    }

    pub fn trim(&mut self, pattern: Option<&str>) -> EditResult<&mut Self> {
        self.trim_start(pattern)?.trim_end(pattern)
    }

    /// Trim leading and trailing line breaks only
    pub fn trim_lines(&mut self) -> EditResult<&mut Self> {
        self.trim(Some(r"[\r\n]"))
    }

    /// The indentation unit used when `indent` is given none
    pub fn get_indent_string(&self) -> &str {
        self.indent_str.as_deref().unwrap_or("\t")
    }

    pub fn indent(&mut self, indent_str: Option<&str>) -> &mut Self {
        self.indent_with(indent_str, &IndentOptions::default())
    }

    /// Indent every line of the output
    ///
    /// Offsets inside `options.exclude` (or the document's exclusion ranges
    /// when that is empty) are left alone.
    #[instrument(skip(self, options), fields(patches = self.patches.len()))]
    pub fn indent_with(&mut self, indent_str: Option<&str>, options: &IndentOptions) -> &mut Self {
        let indent_str = indent_str.unwrap_or(self.get_indent_string()).to_string();
        if indent_str.is_empty() {
            return self;
        }

        let exclude = if options.exclude.is_empty() {
            &self.indent_exclusion_ranges
        } else {
            &options.exclude
        };

        indent_patches(&self.original, &mut self.patches, &indent_str, exclude);
        self
    }

    /// Segments for every output line, before encoding
    pub fn generate_decoded_map(&self, hires: bool) -> Vec<Vec<Segment>> {
        self.patches.assert_invariants(self.original.len());

        let output = self.to_string();
        encode_segments(&MappingSource {
            original: &self.original,
            output: &output,
            prepended_len: self.prepended.len(),
            patches: self.patches.as_slice(),
            sourcemap_locations: &self.sourcemap_locations,
            names: &self.stored_names,
            hires,
        })
    }

    /// The encoded `mappings` field of the source map
    pub fn get_mappings(&self, hires: bool) -> EditResult<String> {
        let map = self.generate_map(&MapOptions {
            hires,
            ..Default::default()
        });
        Ok(map.mappings()?)
    }

    pub fn generate_map(&self, options: &MapOptions) -> SourceMap {
        self.generate_map_with(options, &SlashRelativizer)
    }

    /// Generate a source map, resolving `options.source` with `relativizer`
    #[instrument(skip(self, options, relativizer), fields(patches = self.patches.len(), hires = options.hires))]
    pub fn generate_map_with(&self, options: &MapOptions, relativizer: &dyn PathRelativizer) -> SourceMap {
        let file = options
            .file
            .as_deref()
            .and_then(|file| file.rsplit(|c: char| c == '/' || c == '\\').next());

        let source = options
            .source
            .as_deref()
            .map(|source| relativizer.relative(options.file.as_deref().unwrap_or(""), source));

        let content = options.include_content.then_some(&*self.original);
        let names: Vec<&str> = self.stored_names.iter().map(String::as_str).collect();

        let lines = self.generate_decoded_map(options.hires);
        debug!(lines = lines.len(), names = names.len(), "Generated source map");

        SourceMap::from_segments(file, source.as_deref(), content, &names, &lines)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prepended)?;
        f.write_str(&self.splice(0, self.original.len()))?;
        f.write_str(&self.appended)
    }
}
