//! Architecture graph for parsed ROSpec declarations.
//!
//! The graph is the structural middle of the pipeline: it stores every
//! declared entity in declaration order, validates cross-references, and
//! exposes both the declared view (what the source said) and hooks for
//! the resolver to attach the effective view (what actually connects).
//!
//! # Architecture
//!
//! ```text
//! SpecAst
//!    │
//!    ▼
//! ┌──────────────────┐  pass 1: declare every entity
//! │   GraphBuilder   │  pass 2: wire and validate references
//! └──────────────────┘
//!    │ freeze()
//!    ▼
//! ┌──────────────────┐  declaration-ordered tables,
//! │   Graph          │  identity and relation listings
//! └──────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`entities`] - Entity records (node types, instances, channels, ...)
//! - [`graph`] - Two-pass construction and the read-only [`Graph`]

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod entities;
pub mod graph;

// Re-export main types for convenience
pub use entities::{
    Alias, ChannelKind, Context, EffectiveRole, NodeInstance, NodeType, QosAttachment, QosPolicy,
    Service, Topic,
};
pub use graph::{Graph, GraphBuilder, Relation, RelationKind};
