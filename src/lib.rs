//! Rosqa - ROSpec architecture question generator
//!
//! This crate re-exports all layers of the rosqa pipeline for convenient
//! access. For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: rosqa_runtime    — CLI, file pipeline, JSON output
//! Layer 4: rosqa_questions  — Leveled question synthesis, negatives
//! Layer 3: rosqa_engine     — Resolution, communication paths
//! Layer 2: rosqa_graph      — Architecture graph, reference checking
//! Layer 1: rosqa_language   — Lexer, parser, ROSpec syntax tree
//! Layer 0: rosqa_foundation — Core types (Value, ParamType, Error)
//! ```

pub use rosqa_engine as engine;
pub use rosqa_foundation as foundation;
pub use rosqa_graph as graph;
pub use rosqa_language as language;
pub use rosqa_questions as questions;
pub use rosqa_runtime as runtime;
