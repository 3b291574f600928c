//! Error types for the ROSpec question pipeline.
//!
//! Every fallible operation in the workspace returns [`Result`], whose
//! error side is a single [`Error`] struct wrapping an [`ErrorKind`].
//! The kind carries everything a caller needs to report the failure;
//! the optional [`ErrorContext`] tags the error with the input it came
//! from when that is known (for example the path of a `.rospec` file).

use crate::types::ParamType;
use std::fmt;
use thiserror::Error;

/// Result type alias using ROSpec pipeline errors.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for all pipeline operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The specific kind of error.
    pub kind: ErrorKind,
    /// Optional context describing where the error arose.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind and no context.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Attaches context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a syntax error at a source position.
    pub fn syntax(
        message: impl Into<String>,
        line: usize,
        column: usize,
        context: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::Syntax {
            message: message.into(),
            line,
            column,
            context: context.into(),
        })
    }

    /// Creates an undeclared-reference error.
    pub fn undeclared_reference(
        kind: impl Into<String>,
        name: impl Into<String>,
        referrer: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::UndeclaredReference {
            kind: kind.into(),
            name: name.into(),
            referrer: referrer.into(),
        })
    }

    /// Creates a type-mismatch error for a parameter assignment.
    pub fn type_mismatch(
        parameter: impl Into<String>,
        expected: ParamType,
        actual: ParamType,
        scope: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::TypeMismatch {
            parameter: parameter.into(),
            expected,
            actual,
            scope: scope.into(),
        })
    }

    /// Creates an alias-cycle error.
    pub fn alias_cycle(name: impl Into<String>, chain: Vec<String>) -> Self {
        Self::new(ErrorKind::AliasCycle {
            name: name.into(),
            chain,
        })
    }

    /// Creates an unresolved-content-service error.
    pub fn unresolved_content_service(
        instance: impl Into<String>,
        parameter: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::UnresolvedContentService {
            instance: instance.into(),
            parameter: parameter.into(),
        })
    }

    /// Creates an I/O error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io(message.into()))
    }

    /// Creates a serialization error.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Serialization(message.into()))
    }
}

/// Specific kinds of pipeline errors.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// The input text violates the ROSpec grammar.
    #[error("syntax error at line {line}, column {column}: {message}")]
    Syntax {
        /// Description of the syntax error.
        message: String,
        /// Line number where the error occurred (1-based).
        line: usize,
        /// Column number where the error occurred (1-based).
        column: usize,
        /// The source line containing the error.
        context: String,
    },

    /// A declaration refers to an entity that was never declared.
    #[error("undeclared {kind} reference: {name} (referenced by {referrer})")]
    UndeclaredReference {
        /// What kind of entity the reference expected.
        kind: String,
        /// The name that could not be found.
        name: String,
        /// The declaration containing the dangling reference.
        referrer: String,
    },

    /// A parameter value does not fit the parameter's declared type.
    #[error("type mismatch for parameter {parameter} in {scope}: expected {expected}, found {actual}")]
    TypeMismatch {
        /// The parameter whose assignment failed.
        parameter: String,
        /// The type the parameter was declared with.
        expected: ParamType,
        /// The type of the offending value.
        actual: ParamType,
        /// Where the offending value came from.
        scope: String,
    },

    /// Following an alias chain revisited an alias.
    #[error("alias cycle detected at {name}: {}", .chain.join(" -> "))]
    AliasCycle {
        /// The alias at which the cycle was detected.
        name: String,
        /// The chain of names followed before the revisit.
        chain: Vec<String>,
    },

    /// A `content(...)` role has no effective parameter value to read.
    #[error("cannot resolve content channel for node instance {instance}: parameter {parameter} has no effective value")]
    UnresolvedContentService {
        /// The node instance whose role failed to resolve.
        instance: String,
        /// The parameter the role reads its channel name from.
        parameter: String,
    },

    /// An underlying I/O operation failed.
    #[error("i/o error: {0}")]
    Io(String),

    /// Serializing generated questions failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Additional context describing where an error arose.
#[derive(Debug, Default, Clone)]
pub struct ErrorContext {
    /// The input the error came from, typically a file path.
    pub source: Option<String>,
}

impl ErrorContext {
    /// Creates empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the input source for this context.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "in {source}"),
            None => Ok(()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
