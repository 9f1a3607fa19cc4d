//! Source map primitives for patchmap
//!
//! Segments are collected per generated line with [`MappingsBuilder`], then
//! handed to the `sourcemap` crate, which owns VLQ encoding and the version 3
//! JSON format.

pub mod builder;
pub mod map;
pub mod utils;

pub use builder::{MappingsBuilder, Segment};
pub use map::SourceMap;
pub use sourcemap::Error as SourceMapError;
pub use utils::LineIndex;
