//! Shared collaborators for patchmap packages
//!
//! Small, stateless helpers that the document engine consumes through narrow
//! traits, so callers can swap in their own heuristics.

pub mod indent;
pub mod path;

pub use indent::*;
pub use path::*;
