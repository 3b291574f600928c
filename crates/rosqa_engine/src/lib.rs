//! Resolution and path derivation for the ROSpec pipeline.
//!
//! This crate owns the semantic half of the pipeline: it takes a built
//! architecture graph, resolves every scoped reference into an effective
//! fact, and derives the communication structure questions are asked
//! about.
//!
//! # Architecture
//!
//! ```text
//! source text
//!      │  rosqa_language::parse
//!      ▼
//! GraphBuilder          (rosqa_graph, declared view)
//!      │  resolve()      aliases, channel types, effective
//!      │                 parameters, content channels, remaps
//!      ▼
//! Graph                 (frozen, declared + effective views)
//!      │  derive_paths()
//!      ▼
//! PathSet               (hops and maximal communication paths)
//! ```
//!
//! [`graph_from_source`] composes the first three steps; callers that
//! need Level-2 material run [`derive_paths`] on the result.
//!
//! # Modules
//!
//! - [`resolve`] - The resolution pass
//! - [`paths`] - Hop and path derivation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod paths;
pub mod resolve;

// Re-export main types for convenience
pub use paths::{Hop, HopGroup, PathSet, derive_paths};
pub use resolve::resolve;

use rosqa_foundation::Result;
use rosqa_graph::{Graph, GraphBuilder};

/// Parses ROSpec source text into a fully resolved, read-only graph.
///
/// # Errors
///
/// Returns a syntax error from parsing, an undeclared-reference or
/// type-mismatch error from graph construction, or an alias-cycle,
/// type-mismatch, or unresolved-content-service error from resolution.
pub fn graph_from_source(source: &str) -> Result<Graph> {
    let spec = rosqa_language::parse(source)?;
    let mut builder = GraphBuilder::from_spec(&spec)?;
    resolve(&mut builder)?;
    Ok(builder.freeze())
}
