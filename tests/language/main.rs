//! Integration tests for Layer 1: Language
//!
//! Tests for the ROSpec lexer and parser.
