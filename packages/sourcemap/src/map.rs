use crate::builder::Segment;
use serde::Deserialize;
use sourcemap::{SourceMap as ExternalSourceMap, SourceMapBuilder as ExternalBuilder};
use std::fmt;

/// A version 3 source map for one generated file and one source
#[derive(Debug, Clone)]
pub struct SourceMap {
    inner: ExternalSourceMap,
}

#[derive(Deserialize)]
struct MappingsField {
    #[serde(default)]
    mappings: String,
}

impl SourceMap {
    /// Build a map from segments grouped by generated line
    ///
    /// # Arguments
    /// * `file` - Name of the generated file
    /// * `source` - Path of the original file; recorded as `""` when unknown
    /// * `content` - Original text to embed as `sourcesContent`
    /// * `names` - Names table; segment name indices point into it
    /// * `lines` - Segments for each generated line
    pub fn from_segments(
        file: Option<&str>,
        source: Option<&str>,
        content: Option<&str>,
        names: &[&str],
        lines: &[Vec<Segment>],
    ) -> Self {
        let mut builder = ExternalBuilder::new(file);

        let source_id = builder.add_source(source.unwrap_or(""));
        builder.set_source_contents(source_id, content);

        for name in names {
            builder.add_name(name);
        }

        for (line, segments) in lines.iter().enumerate() {
            for segment in segments {
                builder.add_raw(
                    line as u32,
                    segment.generated_column,
                    segment.source_line,
                    segment.source_column,
                    Some(segment.source_index),
                    segment.name_index,
                    false, // is_range
                );
            }
        }

        Self {
            inner: builder.into_sourcemap(),
        }
    }

    /// Parse a map from its JSON form
    pub fn from_json(json: &str) -> Result<Self, sourcemap::Error> {
        Ok(Self {
            inner: ExternalSourceMap::from_slice(json.as_bytes())?,
        })
    }

    pub fn file(&self) -> Option<&str> {
        self.inner.get_file()
    }

    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.inner.sources()
    }

    pub fn source_contents(&self, index: u32) -> Option<&str> {
        self.inner.get_source_contents(index)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.inner.names()
    }

    /// Segments grouped by generated line
    ///
    /// Unmapped tokens are skipped. Trailing lines without segments are not
    /// represented.
    pub fn segments(&self) -> Vec<Vec<Segment>> {
        let mut lines: Vec<Vec<Segment>> = Vec::new();

        for token in self.inner.tokens().filter(|token| token.has_source()) {
            let line = token.get_dst_line() as usize;
            if lines.len() <= line {
                lines.resize_with(line + 1, Vec::new);
            }

            lines[line].push(Segment {
                generated_column: token.get_dst_col(),
                source_index: token.get_src_id(),
                source_line: token.get_src_line(),
                source_column: token.get_src_col(),
                name_index: token.has_name().then(|| token.get_name_id()),
            });
        }

        lines
    }

    /// The encoded `mappings` field
    pub fn mappings(&self) -> Result<String, sourcemap::Error> {
        let field: MappingsField = serde_json::from_slice(&self.to_bytes()?)?;
        Ok(field.mappings)
    }

    fn to_bytes(&self) -> Result<Vec<u8>, sourcemap::Error> {
        let mut buf = Vec::new();
        self.inner.to_writer(&mut buf)?;
        Ok(buf)
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String, sourcemap::Error> {
        Ok(String::from_utf8(self.to_bytes()?)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, sourcemap::Error> {
        let value: serde_json::Value = serde_json::from_slice(&self.to_bytes()?)?;
        Ok(serde_json::to_string_pretty(&value)?)
    }

    /// Base64 data URI suitable for a `sourceMappingURL` comment
    pub fn to_url(&self) -> Result<String, sourcemap::Error> {
        self.inner.to_data_url()
    }

    pub fn as_inner(&self) -> &ExternalSourceMap {
        &self.inner
    }

    pub fn into_inner(self) -> ExternalSourceMap {
        self.inner
    }
}

impl fmt::Display for SourceMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = self.to_json().map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
