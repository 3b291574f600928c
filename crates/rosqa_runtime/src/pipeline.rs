//! End-to-end file pipeline: ROSpec source in, question JSON out.
//!
//! Errors from parsing and resolution are tagged with the input path so
//! batch callers can tell which file failed.

use std::fs;
use std::path::Path;

use rosqa_engine::graph_from_source;
use rosqa_foundation::{Error, ErrorContext, Result};
use rosqa_questions::{GeneratorConfig, Question, generate};

use crate::serialize;

/// Generates questions for one ROSpec source file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, or if the source fails
/// to parse or resolve.
pub fn generate_from_file<P: AsRef<Path>>(
    path: P,
    config: &GeneratorConfig,
) -> Result<Vec<Question>> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)
        .map_err(|e| Error::io(format!("failed to read file '{}': {e}", path.display())))?;
    let graph = graph_from_source(&source).map_err(|e| {
        e.with_context(ErrorContext::new().with_source(path.display().to_string()))
    })?;
    Ok(generate(&graph, config))
}

/// Runs the full pipeline for one file and writes the question JSON.
///
/// Returns the number of records written.
///
/// # Errors
///
/// Returns an error if generation fails or the output cannot be written.
pub fn run_to_file<P, Q>(
    input: P,
    output: Q,
    config: &GeneratorConfig,
    compact: bool,
) -> Result<usize>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let questions = generate_from_file(input, config)?;
    serialize::save_to_file(&questions, output, compact)?;
    Ok(questions.len())
}
