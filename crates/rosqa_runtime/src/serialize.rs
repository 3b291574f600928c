//! Question serialization to and from JSON.
//!
//! Questions are written as a JSON array of flat records:
//!
//! ```json
//! {
//!   "level": 0,
//!   "category": "ENTITY",
//!   "type": "BOOL",
//!   "question": "Is there a ROSpec entity called /scan?",
//!   "answer": "Yes"
//! }
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use rosqa_foundation::{Error, Result};
use rosqa_questions::Question;
use serde::{Deserialize, Serialize};

/// One question-answer record in its serialized form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Abstraction tier: 0, 1, or 2.
    pub level: u8,
    /// Category label, e.g. `ENTITY` or `MESSAGE`.
    pub category: String,
    /// Answer shape: `BOOL`, `MCQ`, or `OPEN`.
    #[serde(rename = "type")]
    pub qtype: String,
    /// Question text.
    pub question: String,
    /// Ground-truth answer text.
    pub answer: String,
}

impl From<&Question> for QuestionRecord {
    fn from(question: &Question) -> Self {
        Self {
            level: question.level.number(),
            category: question.category.name().to_string(),
            qtype: question.qtype.name().to_string(),
            question: question.question.clone(),
            answer: question.answer.clone(),
        }
    }
}

/// Serializes questions to pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(questions: &[Question]) -> Result<String> {
    let records: Vec<QuestionRecord> = questions.iter().map(QuestionRecord::from).collect();
    serde_json::to_string_pretty(&records).map_err(|e| Error::serialization(e.to_string()))
}

/// Serializes questions to compact single-line JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_compact(questions: &[Question]) -> Result<String> {
    let records: Vec<QuestionRecord> = questions.iter().map(QuestionRecord::from).collect();
    serde_json::to_string(&records).map_err(|e| Error::serialization(e.to_string()))
}

/// Saves questions to a JSON file.
///
/// Creates the file if it doesn't exist, or overwrites it if it does.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to,
/// or if serialization fails.
pub fn save_to_file<P: AsRef<Path>>(questions: &[Question], path: P, compact: bool) -> Result<()> {
    let file = File::create(path.as_ref()).map_err(|e| {
        Error::io(format!(
            "failed to create file '{}': {e}",
            path.as_ref().display()
        ))
    })?;

    let mut writer = BufWriter::new(file);
    let json = if compact {
        to_json_compact(questions)?
    } else {
        to_json(questions)?
    };

    writer.write_all(json.as_bytes()).map_err(|e| {
        Error::io(format!(
            "failed to write to file '{}': {e}",
            path.as_ref().display()
        ))
    })?;

    writer.flush().map_err(|e| {
        Error::io(format!(
            "failed to flush file '{}': {e}",
            path.as_ref().display()
        ))
    })?;

    Ok(())
}

/// Loads question records from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or if deserialization fails.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<QuestionRecord>> {
    let file = File::open(path.as_ref()).map_err(|e| {
        Error::io(format!(
            "failed to open file '{}': {e}",
            path.as_ref().display()
        ))
    })?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| Error::serialization(e.to_string()))
}
