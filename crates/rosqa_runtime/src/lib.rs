//! CLI, file pipeline, and JSON output for the ROSpec question generator.
//!
//! This crate provides:
//! - [`pipeline`] - File-to-file generation entry points
//! - [`serialize`] - Question records and JSON persistence
//! - The `rosqa` command-line binary

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod pipeline;
pub mod serialize;

pub use pipeline::{generate_from_file, run_to_file};
pub use serialize::{QuestionRecord, load_from_file, save_to_file, to_json, to_json_compact};
