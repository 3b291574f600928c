//! Question synthesis over resolved ROSpec architecture graphs.
//!
//! Given a resolved [`Graph`](rosqa_graph::Graph), [`generate`] produces a
//! deterministic list of question-answer records across three levels:
//!
//! - Level 0: entity existence and kind, plus seeded negative examples
//! - Level 1: declared and resolved relations and attributes
//! - Level 2: end-to-end communication over effective channel names
//!
//! Output order is fixed (level, then category, then declaration order),
//! and the only sampled content, the negative existence block, runs under
//! a seeded generator so identical inputs yield identical output.
//!
//! # Modules
//!
//! - [`question`] - Question records and their classification axes
//! - [`config`] - Generation knobs (negatives, seed)
//! - [`generator`] - The synthesis pass itself
//! - [`negative`] - Seeded sampling of nonexistent entity names

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod generator;
pub mod negative;
pub mod question;

pub use config::{DEFAULT_NEGATIVES_PER_FILE, DEFAULT_SEED, GeneratorConfig};
pub use generator::generate;
pub use negative::sample_negatives;
pub use question::{Category, Level, QType, Question};
