//! Lexer and parser for the ROSpec DSL.
//!
//! This crate turns ROSpec source text into a declaration tree that the
//! graph layer consumes. Declarations may reference each other in any
//! order, so the parser performs no name resolution at all.
//!
//! # Architecture
//!
//! ```text
//! "node type Lidar { publishes to /scan : LaserMsg; }"
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   LEXER         │  → [node, type, Name("Lidar"), '{', publishes, ...]
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   PARSER        │  → SpecAst { decls: [NodeType(Lidar { roles, ... })] }
//! └─────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`span`] - Source location tracking
//! - [`token`] - Token and keyword definitions
//! - [`lexer`] - Source text to token stream
//! - [`ast`] - The declaration tree
//! - [`parser`] - Token stream to [`SpecAst`]

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod token;


// Re-export main types for convenience
pub use ast::SpecAst;
pub use lexer::Lexer;
pub use parser::{Parser, parse};
pub use span::Span;
pub use token::{Kw, Token, TokenKind};
