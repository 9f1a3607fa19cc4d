/// A single mapping from a generated column to a source position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// Column in the generated line (UTF-16 code units)
    pub generated_column: u32,
    pub source_index: u32,
    /// Line in the original source (0-indexed)
    pub source_line: u32,
    /// Column in the original source (UTF-16 code units)
    pub source_column: u32,
    /// Index into the names table
    pub name_index: Option<u32>,
}

/// Collects segments line by line while generated text is emitted
///
/// The builder tracks the current generated position as text is fed through
/// [`advance`](Self::advance), so callers only supply source positions.
#[derive(Debug)]
pub struct MappingsBuilder {
    lines: Vec<Vec<Segment>>,
    current_line: u32,
    current_col: u32,
}

impl MappingsBuilder {
    pub fn new() -> Self {
        Self {
            lines: vec![Vec::new()],
            current_line: 0,
            current_col: 0,
        }
    }

    /// Add a mapping at the current generated position
    ///
    /// # Arguments
    /// * `src_line` - Line in the original source (0-indexed)
    /// * `src_col` - Column in the original source (0-indexed)
    /// * `name` - Optional index into the names table
    pub fn add_mapping(&mut self, src_line: u32, src_col: u32, name: Option<u32>) {
        let segment = Segment {
            generated_column: self.current_col,
            source_index: 0, // single source per map
            source_line: src_line,
            source_column: src_col,
            name_index: name,
        };

        let line = &mut self.lines[self.current_line as usize];
        debug_assert!(
            line.last().map_or(true, |last| last.generated_column < segment.generated_column),
            "segments must be added in increasing column order"
        );
        line.push(segment);
    }

    /// Track position advancement as generated text is emitted
    pub fn advance(&mut self, text: &str) {
        for ch in text.chars() {
            if ch == '\n' {
                self.current_line += 1;
                self.current_col = 0;
                self.lines.push(Vec::new());
            } else {
                self.current_col += ch.len_utf16() as u32;
            }
        }
    }

    /// Segments grouped by generated line
    pub fn into_lines(self) -> Vec<Vec<Segment>> {
        self.lines
    }
}

impl Default for MappingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
