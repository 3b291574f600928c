//! Entity kinds for the architecture graph.
//!
//! Every named thing a ROSpec file can declare falls into one of the
//! [`EntityKind`] variants. The generator uses the kind both for existence
//! questions ("is there an entity called X?") and for the multiple-choice
//! kind question, where each kind has a stable option number.

use std::fmt;

/// The kind of a named entity in the architecture graph.
///
/// The variant order is fixed: it defines the option numbering used by
/// multiple-choice questions, so reordering variants changes generated
/// output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    /// A reusable node template declared with `node type`.
    NodeType,
    /// A concrete node declared with `node instance` inside `system`.
    NodeInstance,
    /// A pub/sub channel, declared explicitly or introduced by a role.
    Topic,
    /// A request/response channel, declared explicitly or introduced by a role.
    Service,
    /// A named bundle of parameter assignments declared with `context`.
    Context,
    /// A quality-of-service policy declared with `qos policy`.
    QosPolicy,
    /// A type alias declared with `type alias`.
    TypeAlias,
    /// A message alias declared with `message alias`.
    MessageAlias,
}

impl EntityKind {
    /// All entity kinds, in option-number order.
    pub const ALL: [EntityKind; 8] = [
        EntityKind::NodeType,
        EntityKind::NodeInstance,
        EntityKind::Topic,
        EntityKind::Service,
        EntityKind::Context,
        EntityKind::QosPolicy,
        EntityKind::TypeAlias,
        EntityKind::MessageAlias,
    ];

    /// Returns the human-readable label used in question text.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            EntityKind::NodeType => "node type",
            EntityKind::NodeInstance => "node instance",
            EntityKind::Topic => "topic",
            EntityKind::Service => "service",
            EntityKind::Context => "context",
            EntityKind::QosPolicy => "QoS policy",
            EntityKind::TypeAlias => "type alias",
            EntityKind::MessageAlias => "message alias",
        }
    }

    /// Returns the 1-based option number used by multiple-choice questions.
    #[must_use]
    pub const fn option_number(self) -> usize {
        match self {
            EntityKind::NodeType => 1,
            EntityKind::NodeInstance => 2,
            EntityKind::Topic => 3,
            EntityKind::Service => 4,
            EntityKind::Context => 5,
            EntityKind::QosPolicy => 6,
            EntityKind::TypeAlias => 7,
            EntityKind::MessageAlias => 8,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Tests
// ============================================================================
