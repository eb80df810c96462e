//! choromap-cli
//! ============
//!
//! Command-line interface for the `choromap-core` choropleth renderer.
//!
//! This crate primarily provides a binary (`choromap`). We include a small
//! library target so that docs.rs renders a documentation page and shows this
//! overview.
//!
//! Basic usage:
//!
//! ```text
//! choromap --help
//! choromap render -o map.svg
//! choromap render --html -o map.html
//! choromap stats
//! choromap lookup 1001
//! ```
//!
//! For programmatic access, use the [`choromap-core`] crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]

// No public API here; everything lives in the `choromap` binary.
