//! Entity records stored in the architecture graph.
//!
//! Each record keeps its declared form (exactly what the source said) next
//! to resolution annotations (`resolved_ty`, `effective_params`,
//! `effective_roles`) that the resolver fills in later. Both views stay
//! queryable: declared data answers "what was written", effective data
//! answers "what actually connects".

use rosqa_foundation::Value;
use rosqa_language::ast::{
    AliasKind, ChannelRef, ContextAssign, Param, ParamAssign, QosSetting, Remap, Role, RoleKind,
    ServiceType, TfEdge,
};
use std::fmt;

/// The two channel kinds a role or QoS attachment can bind to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    /// A publish/subscribe topic.
    Topic,
    /// A request/response service.
    Service,
}

impl ChannelKind {
    /// Returns the lowercase label used in question text.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            ChannelKind::Topic => "topic",
            ChannelKind::Service => "service",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A declared node type: the template node instances instantiate.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeType {
    /// The type name.
    pub name: String,
    /// Declared parameters in declaration order.
    pub params: Vec<Param>,
    /// Declared communication roles in declaration order.
    pub roles: Vec<Role>,
    /// Declared TF frame relations in declaration order.
    pub tf_edges: Vec<TfEdge>,
    /// Raw text of the trailing where-clause, if present.
    pub where_block: Option<String>,
}

impl NodeType {
    /// Looks up a declared parameter by name.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&Param> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Renders the declared channel references for one role kind.
    ///
    /// Content references render as `content(param)`, exactly as written.
    #[must_use]
    pub fn declared_channels(&self, kind: RoleKind) -> Vec<String> {
        self.roles
            .iter()
            .filter(|r| r.kind == kind)
            .map(|r| r.channel.to_string())
            .collect()
    }

    /// Iterates over `content(...)` roles with their position among all
    /// declared roles.
    ///
    /// The position lines up with the same index in a resolved instance's
    /// effective role list.
    pub fn content_roles(&self) -> impl Iterator<Item = (usize, &Role)> {
        self.roles
            .iter()
            .enumerate()
            .filter(|(_, r)| r.channel.content_param().is_some())
    }
}

/// A role after resolution: the declared reference plus the concrete
/// channel name it ends up on (content-resolved, then remapped).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectiveRole {
    /// Which side of which channel kind the role takes.
    pub kind: RoleKind,
    /// The reference as declared on the node type.
    pub declared: ChannelRef,
    /// The concrete channel name for this instance.
    pub name: String,
}

/// A node instance declared inside the `system` block.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeInstance {
    /// The instance name.
    pub name: String,
    /// The node type this instance instantiates.
    pub type_name: String,
    /// Direct parameter assignments in declaration order.
    pub assigns: Vec<ParamAssign>,
    /// Attached contexts in attachment order.
    pub contexts: Vec<String>,
    /// Channel remaps in declaration order.
    pub remaps: Vec<Remap>,
    /// Effective parameter values, one per declared parameter that
    /// resolves to a value. Filled in by the resolver.
    pub effective_params: Vec<(String, Value)>,
    /// Effective roles, index-aligned with the node type's declared roles.
    /// Filled in by the resolver.
    pub effective_roles: Vec<EffectiveRole>,
}

impl NodeInstance {
    /// Looks up a direct parameter assignment by name.
    #[must_use]
    pub fn assign(&self, name: &str) -> Option<&Value> {
        self.assigns
            .iter()
            .find(|a| a.name == name)
            .map(|a| &a.value)
    }

    /// Looks up a resolved effective parameter value by name.
    #[must_use]
    pub fn effective_param(&self, name: &str) -> Option<&Value> {
        self.effective_params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Returns the effective channel names for one role kind.
    #[must_use]
    pub fn effective_channels(&self, kind: RoleKind) -> Vec<String> {
        self.effective_roles
            .iter()
            .filter(|r| r.kind == kind)
            .map(|r| r.name.clone())
            .collect()
    }
}

/// A topic channel, declared explicitly or implied by first role use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Topic {
    /// The topic name.
    pub name: String,
    /// The declared message type, possibly an alias. Implicit topics
    /// without an inline type have none.
    pub ty: Option<String>,
    /// The message type after alias resolution. Filled in by the resolver.
    pub resolved_ty: Option<String>,
    /// True when the topic was introduced by a role rather than an
    /// explicit `topic` declaration.
    pub implicit: bool,
}

/// A service channel, declared explicitly or implied by first role use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Service {
    /// The service name.
    pub name: String,
    /// The declared service type. Implicit services without an inline
    /// type have none.
    pub ty: Option<ServiceType>,
    /// The service type after alias resolution, rendered as text.
    /// Filled in by the resolver.
    pub resolved_ty: Option<String>,
    /// True when the service was introduced by a role rather than an
    /// explicit `service` declaration.
    pub implicit: bool,
}

/// A named bundle of parameter overrides declared inside `system`.
#[derive(Clone, Debug, PartialEq)]
pub struct Context {
    /// The context name.
    pub name: String,
    /// Key/value assignments in declaration order.
    pub assigns: Vec<ContextAssign>,
}

impl Context {
    /// Looks up an assignment by key.
    #[must_use]
    pub fn assign(&self, key: &str) -> Option<&Value> {
        self.assigns
            .iter()
            .find(|a| a.key == key)
            .map(|a| &a.value)
    }
}

/// A named bundle of QoS settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QosPolicy {
    /// The policy name.
    pub name: String,
    /// Settings in declaration order, values kept as written.
    pub settings: Vec<QosSetting>,
}

impl QosPolicy {
    /// Looks up a setting value by key.
    #[must_use]
    pub fn setting(&self, key: &str) -> Option<&str> {
        self.settings
            .iter()
            .find(|s| s.key == key)
            .map(|s| s.value.as_str())
    }
}

/// A binding of a QoS policy to a declared topic or service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QosAttachment {
    /// The attached policy name.
    pub policy: String,
    /// The channel the policy applies to.
    pub channel: String,
    /// Whether the channel is a topic or a service.
    pub kind: ChannelKind,
}

/// A type or message alias.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alias {
    /// Which declaration form introduced the alias.
    pub kind: AliasKind,
    /// The alias name.
    pub name: String,
    /// The direct target, possibly another alias.
    pub target: String,
    /// The end of the alias chain. Filled in by the resolver.
    pub resolved_target: Option<String>,
}

// =============================================================================
// Tests
// =============================================================================
