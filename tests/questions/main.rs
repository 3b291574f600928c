//! Integration tests for question generation
//!
//! Tests ordering, determinism, and the negative existence block.

mod generator;
mod negatives;
