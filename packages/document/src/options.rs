//! # Options
//!
//! Plain configuration structs for documents, indentation and map
//! generation. All of them deserialize from camelCase JSON with every field
//! optional.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Options for constructing a [`Document`](crate::Document)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentOptions {
    /// Name of the file the original text came from
    pub filename: Option<String>,
    /// Ranges `indent` leaves alone when no explicit exclusions are given
    pub indent_exclusion_ranges: Vec<Range<usize>>,
    /// Indentation unit; detected from the text when unset
    pub indent_str: Option<String>,
}

/// Options for [`Document::indent_with`](crate::Document::indent_with)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IndentOptions {
    /// Original offsets that receive no indentation
    pub exclude: Vec<Range<usize>>,
}

/// Options for source map generation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapOptions {
    /// Path of the generated file; only the final component is recorded
    pub file: Option<String>,
    /// Path of the original file, recorded relative to `file`
    pub source: Option<String>,
    /// Embed the original text as `sourcesContent`
    pub include_content: bool,
    /// Map every character instead of only chunk and line starts
    pub hires: bool,
}
