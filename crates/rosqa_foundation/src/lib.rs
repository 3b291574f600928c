//! Core types shared by every layer of the ROSpec question pipeline.
//!
//! This crate provides:
//! - [`Value`] - Literal values carried by parameter defaults and assignments
//! - [`ParamType`] - Declared parameter types and their assignment rules
//! - [`EntityKind`] - The closed set of architectural entity kinds
//! - [`Error`] - Rich error types with optional input context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod entity;
pub mod error;
pub mod types;
pub mod value;

pub use entity::EntityKind;
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use types::ParamType;
pub use value::Value;
