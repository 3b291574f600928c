//! Integration tests for Layer 3: Engine
//!
//! Tests resolution and path derivation over whole systems.

mod paths;
mod resolve;
