//! # Indentation
//!
//! Indents every line of the output by inserting zero-width patches in front
//! of line-starting characters. Content of existing patches is indented in
//! place. Characters consumed by a replacement are skipped.

use crate::patch::Patch;
use crate::patch_list::PatchList;
use std::ops::Range;

struct Indenter<'a> {
    original: &'a str,
    indent_str: &'a str,
    exclude: &'a [Range<usize>],
    char_index: usize,
    patch_index: usize,
    should_indent_next: bool,
}

impl Indenter<'_> {
    fn is_excluded(&self, offset: usize) -> bool {
        self.exclude.iter().any(|range| range.contains(&offset))
    }

    /// Walk original characters up to `end`, inserting indentation patches
    fn indent_until(&mut self, patches: &mut PatchList, end: usize) {
        if self.char_index >= end {
            return;
        }

        let original = self.original;
        let from = self.char_index;
        for (relative, ch) in original[from..end].char_indices() {
            let offset = from + relative;
            if self.is_excluded(offset) {
                continue;
            }

            if ch == '\n' {
                self.should_indent_next = true;
            } else if ch != '\r' && self.should_indent_next {
                patches.insert_at(self.patch_index, Patch::insert(offset, self.indent_str));
                self.patch_index += 1;
                self.should_indent_next = false;
            }
        }

        self.char_index = end;
    }

    fn run(mut self, patches: &mut PatchList) {
        while self.patch_index < patches.len() {
            let Some(start) = patches.as_slice().get(self.patch_index).map(|p| p.start) else {
                break;
            };
            self.indent_until(patches, start);

            let excluded = self.is_excluded(start);
            let Some(patch) = patches.get_mut(self.patch_index) else {
                break;
            };

            if !excluded {
                patch.content = indent_content(&patch.content, self.indent_str, self.should_indent_next);
                if let Some(last) = patch.content.chars().last() {
                    self.should_indent_next = last == '\n';
                }
            }

            self.char_index = self.char_index.max(patch.end());
            self.patch_index += 1;
        }

        self.indent_until(patches, self.original.len());
    }
}

/// Prefix each non-empty line of `content` with `indent_str`
///
/// The first line only counts as a line start when `at_line_start` is set.
fn indent_content(content: &str, indent_str: &str, at_line_start: bool) -> String {
    let mut out = String::with_capacity(content.len());

    for (i, line) in content.split_inclusive('\n').enumerate() {
        let starts_line = i > 0 || at_line_start;
        if starts_line && !line.starts_with(|c: char| c == '\n' || c == '\r') {
            out.push_str(indent_str);
        }
        out.push_str(line);
    }

    out
}

pub(crate) fn indent_patches(original: &str, patches: &mut PatchList, indent_str: &str, exclude: &[Range<usize>]) {
    Indenter {
        original,
        indent_str,
        exclude,
        char_index: 0,
        patch_index: 0,
        should_indent_next: true,
    }
    .run(patches);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(original: &str, patches: &PatchList) -> String {
        let mut out = String::new();
        let mut last = 0;
        for patch in patches {
            out.push_str(&original[last..patch.start]);
            out.push_str(&patch.content);
            last = patch.end();
        }
        out.push_str(&original[last..]);
        out
    }

    #[test]
    fn test_indent_content() {
        assert_eq!(indent_content("a\nb", "  ", true), "  a\n  b");
        assert_eq!(indent_content("a\nb", "  ", false), "a\n  b");
        assert_eq!(indent_content("a\n\nb\n", "\t", true), "\ta\n\n\tb\n");
        assert_eq!(indent_content("", "\t", true), "");
    }

    #[test]
    fn test_plain_lines() {
        let original = "a\nb\n\nc";
        let mut patches = PatchList::new();
        indent_patches(original, &mut patches, "  ", &[]);

        assert_eq!(render(original, &patches), "  a\n  b\n\n  c");
        assert_eq!(patches.len(), 3);
        patches.assert_invariants(original.len());
    }

    #[test]
    fn test_skips_replaced_characters() {
        let original = "a\nb\nc";
        let mut patches = PatchList::new();
        // Replace "\nb\n" with a single space, joining the lines
        patches.insert(Patch::replace(1, 4, " ", false), original).unwrap();
        indent_patches(original, &mut patches, "  ", &[]);

        assert_eq!(render(original, &patches), "  a c");
        patches.assert_invariants(original.len());
    }

    #[test]
    fn test_multiline_patch_content() {
        let original = "x;\ny;";
        let mut patches = PatchList::new();
        patches.insert(Patch::replace(3, 4, "if (a) {\nz\n}", false), original).unwrap();
        indent_patches(original, &mut patches, "\t", &[]);

        assert_eq!(render(original, &patches), "\tx;\n\tif (a) {\n\tz\n\t};");
    }

    #[test]
    fn test_windows_line_endings() {
        let original = "a\r\nb";
        let mut patches = PatchList::new();
        indent_patches(original, &mut patches, "  ", &[]);
        assert_eq!(render(original, &patches), "  a\r\n  b");
    }
}
