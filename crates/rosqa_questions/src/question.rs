//! Question records and the axes they are classified along.
//!
//! Every generated record carries a [`Level`] (how much of the pipeline the
//! answer depends on), a [`Category`] (which architectural concern it probes),
//! and a [`QType`] (the expected answer shape). Records are ordered by level,
//! then by category, then by the declaration order of the entities involved.

use std::fmt;

// ============================================================================
// Level
// ============================================================================

/// The abstraction tier a question belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Entity existence and kind; answerable from the declaration list alone.
    Entity,
    /// A single declared or resolved relation or attribute.
    Relation,
    /// End-to-end communication derived from resolved channel names.
    Path,
}

impl Level {
    /// Numeric tier used in serialized records.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Level::Entity => 0,
            Level::Relation => 1,
            Level::Path => 2,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

// ============================================================================
// Category
// ============================================================================

/// Question categories in their fixed output order.
///
/// The declaration order here is the order category blocks appear in within
/// a level, so the derived `Ord` is the output order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Entity,
    Node,
    NodeType,
    Topic,
    Service,
    Parameter,
    ParameterAssign,
    Context,
    ContextAssign,
    QosPolicy,
    QosAttachment,
    TypeAlias,
    MessageAlias,
    ContentService,
    ContentTopic,
    Tf,
    Remap,
    WhereBlock,
    Message,
}

impl Category {
    /// Every category, in output order.
    pub const ALL: [Category; 19] = [
        Category::Entity,
        Category::Node,
        Category::NodeType,
        Category::Topic,
        Category::Service,
        Category::Parameter,
        Category::ParameterAssign,
        Category::Context,
        Category::ContextAssign,
        Category::QosPolicy,
        Category::QosAttachment,
        Category::TypeAlias,
        Category::MessageAlias,
        Category::ContentService,
        Category::ContentTopic,
        Category::Tf,
        Category::Remap,
        Category::WhereBlock,
        Category::Message,
    ];

    /// The label written into serialized records.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Category::Entity => "ENTITY",
            Category::Node => "NODE",
            Category::NodeType => "NODE_TYPE",
            Category::Topic => "TOPIC",
            Category::Service => "SERVICE",
            Category::Parameter => "PARAMETER",
            Category::ParameterAssign => "PARAMETER_ASSIGN",
            Category::Context => "CONTEXT",
            Category::ContextAssign => "CONTEXT_ASSIGN",
            Category::QosPolicy => "QOS_POLICY",
            Category::QosAttachment => "QOS_ATTACHMENT",
            Category::TypeAlias => "TYPE_ALIAS",
            Category::MessageAlias => "MESSAGE_ALIAS",
            Category::ContentService => "CONTENT_SERVICE",
            Category::ContentTopic => "CONTENT_TOPIC",
            Category::Tf => "TF",
            Category::Remap => "REMAP",
            Category::WhereBlock => "WHERE_BLOCK",
            Category::Message => "MESSAGE",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// QType
// ============================================================================

/// The answer shape a question expects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QType {
    /// Answered with `Yes` or `No`.
    Bool,
    /// Answered with the number of one listed option.
    Mcq,
    /// Answered with free text.
    Open,
}

impl QType {
    /// The label written into serialized records.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            QType::Bool => "BOOL",
            QType::Mcq => "MCQ",
            QType::Open => "OPEN",
        }
    }
}

impl fmt::Display for QType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Question
// ============================================================================

/// One generated question-answer record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Question {
    /// Abstraction tier.
    pub level: Level,
    /// Architectural concern the question probes.
    pub category: Category,
    /// Expected answer shape.
    pub qtype: QType,
    /// Question text.
    pub question: String,
    /// Ground-truth answer text.
    pub answer: String,
}

impl Question {
    /// Creates a question record.
    pub fn new(
        level: Level,
        category: Category,
        qtype: QType,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            level,
            category,
            qtype,
            question: question.into(),
            answer: answer.into(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
