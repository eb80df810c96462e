//! Umbrella crate for the choromap workspace.
//!
//! Re-exports [`choromap_core`] so downstream code can depend on a single
//! crate name.
pub use choromap_core::*;
