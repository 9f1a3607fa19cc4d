//! # Patchmap Document
//!
//! Non-destructive string editing with source maps.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ Document: original text (shared, immutable) │
//! │  - insert / overwrite / remove / trim       │
//! │  - prepend / append buffers                 │
//! │  - slice / snip / clone / to_string         │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ PatchList: ordered, non-overlapping patches │
//! │  - covering edits override                  │
//! │  - nested edits are discarded               │
//! │  - straddling edits are rejected            │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ Mapping encoder: offset remap → segments    │
//! │  → SourceMap (patchmap-sourcemap)           │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use patchmap_document::{Document, MapOptions};
//!
//! let mut doc = Document::new("var answer = 42;");
//! doc.overwrite(4, 10, "x", true)?;
//! doc.prepend("'use strict';\n");
//!
//! assert_eq!(doc.to_string(), "'use strict';\nvar x = 42;");
//!
//! let map = doc.generate_map(&MapOptions {
//!     file: Some("out.js".to_string()),
//!     source: Some("in.js".to_string()),
//!     ..Default::default()
//! });
//! assert_eq!(map.names().collect::<Vec<_>>(), vec!["answer"]);
//! assert_eq!(map.file(), Some("out.js"));
//! # Ok::<(), patchmap_document::EditError>(())
//! ```

mod document;
mod errors;
mod indent;
mod mappings;
mod options;
mod patch;
mod patch_list;

pub use document::Document;
pub use errors::{EditError, EditResult};
pub use mappings::OffsetRemap;
pub use options::{DocumentOptions, IndentOptions, MapOptions};
pub use patch::{Patch, PatchKind};
pub use patch_list::{PatchList, Placement};

// Re-export map types for convenience
pub use patchmap_sourcemap::{Segment, SourceMap};
