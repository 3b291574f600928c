//! Abstract syntax tree for ROSpec source files.
//!
//! A parsed file is a [`SpecAst`]: a flat list of top-level declarations
//! in source order. Declaration order never affects meaning, so the tree
//! stays deliberately simple; resolution happens later, against the graph.
//!
//! Block-level declarations carry a [`Span`] for error reporting. The leaf
//! records inside them (parameters, roles, assignments) are plain data and
//! flow unchanged into the architecture graph.

use crate::span::Span;
use rosqa_foundation::{ParamType, Value};
use std::fmt;

/// A parsed ROSpec file.
#[derive(Clone, Debug, PartialEq)]
pub struct SpecAst {
    /// Top-level declarations in source order.
    pub decls: Vec<Decl>,
}

impl SpecAst {
    /// Returns the `system` block, if the file has one.
    #[must_use]
    pub fn system(&self) -> Option<&SystemDecl> {
        self.decls.iter().find_map(|d| match d {
            Decl::System(s) => Some(s),
            _ => None,
        })
    }

    /// Iterates over all node type declarations in source order.
    pub fn node_types(&self) -> impl Iterator<Item = &NodeTypeDecl> {
        self.decls.iter().filter_map(|d| match d {
            Decl::NodeType(nt) => Some(nt),
            _ => None,
        })
    }
}

/// A top-level declaration.
#[derive(Clone, Debug, PartialEq)]
pub enum Decl {
    /// A `node type` declaration.
    NodeType(NodeTypeDecl),
    /// The `system` block.
    System(SystemDecl),
    /// An explicit `topic` declaration.
    Topic(TopicDecl),
    /// An explicit `service` declaration.
    Service(ServiceDecl),
    /// A `qos policy` declaration.
    QosPolicy(QosPolicyDecl),
    /// An `attach qos` declaration.
    QosAttach(QosAttachDecl),
    /// A `type alias` or `message alias` declaration.
    Alias(AliasDecl),
}

impl Decl {
    /// Returns a human-readable name for this declaration kind.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Decl::NodeType(_) => "node type",
            Decl::System(_) => "system",
            Decl::Topic(_) => "topic",
            Decl::Service(_) => "service",
            Decl::QosPolicy(_) => "qos policy",
            Decl::QosAttach(_) => "qos attachment",
            Decl::Alias(_) => "alias",
        }
    }
}

/// A `node type` declaration: a reusable template for node instances.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeTypeDecl {
    /// The type name.
    pub name: String,
    /// Parameters, roles, and TF edges in declaration order.
    pub items: Vec<NodeTypeItem>,
    /// Raw text of the trailing `where { ... }` block, if present.
    pub where_block: Option<String>,
    /// Source location of the whole declaration.
    pub span: Span,
}

/// One item in a node type body.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeTypeItem {
    /// A parameter declaration.
    Param(Param),
    /// A communication role declaration.
    Role(Role),
    /// A TF frame relation.
    Tf(TfEdge),
}

/// A parameter declared on a node type.
#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    /// The parameter name.
    pub name: String,
    /// The declared type.
    pub ty: ParamType,
    /// Whether the parameter was marked `optional`.
    pub optional: bool,
    /// The default value, if one was declared.
    pub default: Option<Value>,
    /// Raw text of a per-parameter `where { ... }` constraint, if present.
    pub constraint: Option<String>,
}

/// A communication role declared on a node type.
#[derive(Clone, Debug, PartialEq)]
pub struct Role {
    /// Which side of which channel kind this role takes.
    pub kind: RoleKind,
    /// The channel the role names, literally or via `content(...)`.
    pub channel: ChannelRef,
    /// An inline channel type, if one was declared.
    pub ty: Option<String>,
}

/// The four communication roles a node type can declare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RoleKind {
    /// `publishes to`: writes messages to a topic.
    Publishes,
    /// `subscribes to`: reads messages from a topic.
    Subscribes,
    /// `provides service`: serves requests on a service.
    Provides,
    /// `uses service`: calls a service as a client.
    Uses,
}

impl RoleKind {
    /// Returns true for the topic-side roles (publish/subscribe).
    #[must_use]
    pub const fn is_topic(self) -> bool {
        matches!(self, RoleKind::Publishes | RoleKind::Subscribes)
    }
}

/// How a role names its channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChannelRef {
    /// A literal channel name, e.g. `/scan`.
    Literal(String),
    /// A channel name read from a parameter at resolution time.
    Content(String),
}

impl ChannelRef {
    /// Returns the literal channel name, if this is a literal reference.
    #[must_use]
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            ChannelRef::Literal(name) => Some(name),
            ChannelRef::Content(_) => None,
        }
    }

    /// Returns the parameter name, if this is a `content(...)` reference.
    #[must_use]
    pub fn content_param(&self) -> Option<&str> {
        match self {
            ChannelRef::Content(param) => Some(param),
            ChannelRef::Literal(_) => None,
        }
    }
}

impl fmt::Display for ChannelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelRef::Literal(name) => write!(f, "{name}"),
            ChannelRef::Content(param) => write!(f, "content({param})"),
        }
    }
}

/// A TF frame relation declared on a node type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TfEdge {
    /// Whether the node broadcasts or listens to the transform.
    pub role: TfRole,
    /// The parent frame.
    pub parent: String,
    /// The child frame.
    pub child: String,
}

/// The two sides of a TF frame relation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TfRole {
    /// `tf broadcasts`: the node publishes this transform.
    Broadcasts,
    /// `tf listens`: the node consumes this transform.
    Listens,
}

impl TfRole {
    /// Returns the source spelling of this role.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            TfRole::Broadcasts => "broadcasts",
            TfRole::Listens => "listens",
        }
    }
}

impl fmt::Display for TfRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The `system` block: contexts and node instances.
#[derive(Clone, Debug, PartialEq)]
pub struct SystemDecl {
    /// Context declarations in source order.
    pub contexts: Vec<ContextDecl>,
    /// Node instance declarations in source order.
    pub instances: Vec<NodeInstanceDecl>,
    /// Source location of the whole block.
    pub span: Span,
}

/// A `context` declaration inside `system`.
#[derive(Clone, Debug, PartialEq)]
pub struct ContextDecl {
    /// The context name.
    pub name: String,
    /// Key/value assignments in declaration order.
    pub assigns: Vec<ContextAssign>,
    /// Source location of the declaration.
    pub span: Span,
}

/// One key/value assignment inside a context.
#[derive(Clone, Debug, PartialEq)]
pub struct ContextAssign {
    /// The assigned key (matched against parameter names).
    pub key: String,
    /// The assigned value.
    pub value: Value,
}

/// A `node instance` declaration inside `system`.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeInstanceDecl {
    /// The instance name.
    pub name: String,
    /// The node type this instance instantiates.
    pub type_name: String,
    /// Parameter assignments, context attachments, and remaps in order.
    pub items: Vec<InstanceItem>,
    /// Source location of the declaration.
    pub span: Span,
}

/// One item in a node instance body.
#[derive(Clone, Debug, PartialEq)]
pub enum InstanceItem {
    /// A direct parameter assignment.
    ParamAssign(ParamAssign),
    /// A `use context` attachment.
    UseContext(String),
    /// A channel remap.
    Remap(Remap),
}

/// A direct parameter assignment on a node instance.
#[derive(Clone, Debug, PartialEq)]
pub struct ParamAssign {
    /// The parameter name.
    pub name: String,
    /// The assigned value.
    pub value: Value,
}

/// A channel remap declared on a node instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Remap {
    /// The channel name to rename.
    pub from: String,
    /// The replacement name.
    pub to: String,
}

/// An explicit `topic` declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopicDecl {
    /// The topic name.
    pub name: String,
    /// The declared message type (possibly an alias).
    pub ty: String,
    /// Source location of the declaration.
    pub span: Span,
}

/// An explicit `service` declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceDecl {
    /// The service name.
    pub name: String,
    /// The declared service type.
    pub ty: ServiceType,
    /// Source location of the declaration.
    pub span: Span,
}

/// The type of a service, in either declared form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ServiceType {
    /// A single type name covering request and response.
    Pair(String),
    /// An explicit `Request -> Response` form.
    ReqResp {
        /// The request type name.
        request: String,
        /// The response type name.
        response: String,
    },
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceType::Pair(name) => write!(f, "{name}"),
            ServiceType::ReqResp { request, response } => {
                write!(f, "{request} -> {response}")
            }
        }
    }
}

/// A `qos policy` declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QosPolicyDecl {
    /// The policy name.
    pub name: String,
    /// Settings in declaration order.
    pub settings: Vec<QosSetting>,
    /// Source location of the declaration.
    pub span: Span,
}

/// One setting inside a QoS policy.
///
/// Setting values are uninterpreted: the pipeline reports them as written
/// and never evaluates them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QosSetting {
    /// The setting key.
    pub key: String,
    /// The setting value, rendered as written.
    pub value: String,
}

/// An `attach qos` declaration binding a policy to a channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QosAttachDecl {
    /// The policy being attached.
    pub policy: String,
    /// The topic or service the policy applies to.
    pub channel: String,
    /// Source location of the declaration.
    pub span: Span,
}

/// A `type alias` or `message alias` declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AliasDecl {
    /// Which alias namespace the declaration uses.
    pub kind: AliasKind,
    /// The alias name.
    pub name: String,
    /// The name the alias points at (possibly another alias).
    pub target: String,
    /// Source location of the declaration.
    pub span: Span,
}

/// The two alias declaration forms.
///
/// Both resolve through one shared namespace; the kind only affects how
/// the alias is described.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AliasKind {
    /// Declared with `type alias`.
    Type,
    /// Declared with `message alias`.
    Message,
}

impl AliasKind {
    /// Returns the human-readable label used in question text.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            AliasKind::Type => "type alias",
            AliasKind::Message => "message alias",
        }
    }
}

impl fmt::Display for AliasKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
