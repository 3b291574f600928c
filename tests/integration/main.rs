//! Cross-layer integration tests for rosqa
//!
//! Tests the whole pipeline: ROSpec text in, question JSON on disk out.

mod pipeline;
