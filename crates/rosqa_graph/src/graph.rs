//! Two-pass graph construction and the read-only [`Graph`] view.
//!
//! Pass 1 (*declare*) records every entity the source names, including
//! topics and services introduced implicitly by a typed role. Pass 2
//! (*wire*) validates every cross-reference and collects QoS attachments.
//! Because declaration happens before any reference check, source order
//! never matters: a node type may use a topic declared below it.
//!
//! Entity tables keep declaration order next to a name index, so all
//! iteration is deterministic and first-appearance ordered.

use std::collections::HashMap;

use rosqa_foundation::{EntityKind, Error, Result};
use rosqa_language::ast::{
    AliasKind, ChannelRef, Decl, InstanceItem, NodeTypeItem, RoleKind, ServiceType, SpecAst,
};

use crate::entities::{
    Alias, ChannelKind, Context, NodeInstance, NodeType, QosAttachment, QosPolicy, Service, Topic,
};

/// Declaration-ordered entity table with a by-name index.
///
/// Re-inserting an existing name replaces the record in place, so the
/// first appearance fixes an entity's position for good.
#[derive(Clone, Debug)]
struct Table<T> {
    items: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> Table<T> {
    fn insert(&mut self, name: &str, item: T) {
        if let Some(&i) = self.index.get(name) {
            self.items[i] = item;
        } else {
            self.index.insert(name.to_string(), self.items.len());
            self.items.push(item);
        }
    }

    fn get(&self, name: &str) -> Option<&T> {
        self.index.get(name).map(|&i| &self.items[i])
    }

    fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    fn items(&self) -> &[T] {
        &self.items
    }
}

/// A directed declared relation between two named entities.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Relation {
    /// What the edge means.
    pub kind: RelationKind,
    /// The edge source name.
    pub from: String,
    /// The edge target name.
    pub to: String,
}

/// The declared relation kinds [`Graph::relations`] reports.
///
/// Directions follow the data flow where one exists: publishers point at
/// their topic, topics point at their subscribers, clients point at their
/// service, services point at their server.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelationKind {
    /// Node type → topic it publishes to.
    Publishes,
    /// Topic → node type subscribed to it.
    Subscribes,
    /// Service → node type providing it.
    Provides,
    /// Node type → service it uses as a client.
    Uses,
    /// Node type → parameter it declares.
    DeclaresParameter,
    /// Node instance → its node type.
    InstanceOf,
    /// Node instance → context it attaches.
    UsesContext,
    /// Alias → its direct target.
    AliasTarget,
    /// Channel → QoS policy attached to it.
    QosBinding,
    /// TF parent frame → child frame.
    TfFrame,
}

/// The read-only architecture graph.
///
/// Produced by [`GraphBuilder::freeze`] after resolution; every accessor
/// iterates in declaration order.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    node_types: Table<NodeType>,
    instances: Table<NodeInstance>,
    topics: Table<Topic>,
    services: Table<Service>,
    contexts: Table<Context>,
    qos_policies: Table<QosPolicy>,
    aliases: Table<Alias>,
    qos_attachments: Vec<QosAttachment>,
}

impl Graph {
    /// All node types in declaration order.
    #[must_use]
    pub fn node_types(&self) -> &[NodeType] {
        self.node_types.items()
    }

    /// Looks up a node type by name.
    #[must_use]
    pub fn node_type(&self, name: &str) -> Option<&NodeType> {
        self.node_types.get(name)
    }

    /// All node instances in declaration order.
    #[must_use]
    pub fn instances(&self) -> &[NodeInstance] {
        self.instances.items()
    }

    /// Looks up a node instance by name.
    #[must_use]
    pub fn instance(&self, name: &str) -> Option<&NodeInstance> {
        self.instances.get(name)
    }

    /// All topics in first-appearance order.
    #[must_use]
    pub fn topics(&self) -> &[Topic] {
        self.topics.items()
    }

    /// Looks up a topic by name.
    #[must_use]
    pub fn topic(&self, name: &str) -> Option<&Topic> {
        self.topics.get(name)
    }

    /// All services in first-appearance order.
    #[must_use]
    pub fn services(&self) -> &[Service] {
        self.services.items()
    }

    /// Looks up a service by name.
    #[must_use]
    pub fn service(&self, name: &str) -> Option<&Service> {
        self.services.get(name)
    }

    /// All contexts in declaration order.
    #[must_use]
    pub fn contexts(&self) -> &[Context] {
        self.contexts.items()
    }

    /// Looks up a context by name.
    #[must_use]
    pub fn context(&self, name: &str) -> Option<&Context> {
        self.contexts.get(name)
    }

    /// All QoS policies in declaration order.
    #[must_use]
    pub fn qos_policies(&self) -> &[QosPolicy] {
        self.qos_policies.items()
    }

    /// Looks up a QoS policy by name.
    #[must_use]
    pub fn qos_policy(&self, name: &str) -> Option<&QosPolicy> {
        self.qos_policies.get(name)
    }

    /// All aliases (both kinds) in declaration order.
    #[must_use]
    pub fn aliases(&self) -> &[Alias] {
        self.aliases.items()
    }

    /// Looks up an alias by name.
    #[must_use]
    pub fn alias(&self, name: &str) -> Option<&Alias> {
        self.aliases.get(name)
    }

    /// All QoS attachments in declaration order.
    #[must_use]
    pub fn qos_attachments(&self) -> &[QosAttachment] {
        &self.qos_attachments
    }

    /// Node instances of the given node type, in declaration order.
    pub fn instances_of<'g>(&'g self, type_name: &'g str) -> impl Iterator<Item = &'g NodeInstance> {
        self.instances
            .items()
            .iter()
            .filter(move |i| i.type_name == type_name)
    }

    /// Node instances that attach the given context, in declaration order.
    pub fn instances_using<'g>(
        &'g self,
        context: &'g str,
    ) -> impl Iterator<Item = &'g NodeInstance> {
        self.instances
            .items()
            .iter()
            .filter(move |i| i.contexts.iter().any(|c| c == context))
    }

    /// Flat `(kind, name)` listing of every entity, grouped by kind in
    /// [`EntityKind`] declaration order.
    #[must_use]
    pub fn identities(&self) -> Vec<(EntityKind, &str)> {
        let mut out = Vec::new();
        for nt in self.node_types.items() {
            out.push((EntityKind::NodeType, nt.name.as_str()));
        }
        for inst in self.instances.items() {
            out.push((EntityKind::NodeInstance, inst.name.as_str()));
        }
        for topic in self.topics.items() {
            out.push((EntityKind::Topic, topic.name.as_str()));
        }
        for service in self.services.items() {
            out.push((EntityKind::Service, service.name.as_str()));
        }
        for ctx in self.contexts.items() {
            out.push((EntityKind::Context, ctx.name.as_str()));
        }
        for policy in self.qos_policies.items() {
            out.push((EntityKind::QosPolicy, policy.name.as_str()));
        }
        for alias in self.aliases.items() {
            if alias.kind == AliasKind::Type {
                out.push((EntityKind::TypeAlias, alias.name.as_str()));
            }
        }
        for alias in self.aliases.items() {
            if alias.kind == AliasKind::Message {
                out.push((EntityKind::MessageAlias, alias.name.as_str()));
            }
        }
        out
    }

    /// The declared relation set as directed edges.
    ///
    /// Content roles carry no literal channel at declaration time, so
    /// only literal roles contribute channel edges here.
    #[must_use]
    pub fn relations(&self) -> Vec<Relation> {
        let mut out = Vec::new();

        for nt in self.node_types.items() {
            for role in &nt.roles {
                let Some(channel) = role.channel.as_literal() else {
                    continue;
                };
                let (kind, from, to) = match role.kind {
                    RoleKind::Publishes => (RelationKind::Publishes, nt.name.as_str(), channel),
                    RoleKind::Subscribes => (RelationKind::Subscribes, channel, nt.name.as_str()),
                    RoleKind::Provides => (RelationKind::Provides, channel, nt.name.as_str()),
                    RoleKind::Uses => (RelationKind::Uses, nt.name.as_str(), channel),
                };
                out.push(Relation {
                    kind,
                    from: from.to_string(),
                    to: to.to_string(),
                });
            }
            for param in &nt.params {
                out.push(Relation {
                    kind: RelationKind::DeclaresParameter,
                    from: nt.name.clone(),
                    to: param.name.clone(),
                });
            }
            for tf in &nt.tf_edges {
                out.push(Relation {
                    kind: RelationKind::TfFrame,
                    from: tf.parent.clone(),
                    to: tf.child.clone(),
                });
            }
        }

        for inst in self.instances.items() {
            out.push(Relation {
                kind: RelationKind::InstanceOf,
                from: inst.name.clone(),
                to: inst.type_name.clone(),
            });
            for ctx in &inst.contexts {
                out.push(Relation {
                    kind: RelationKind::UsesContext,
                    from: inst.name.clone(),
                    to: ctx.clone(),
                });
            }
        }

        for alias in self.aliases.items() {
            out.push(Relation {
                kind: RelationKind::AliasTarget,
                from: alias.name.clone(),
                to: alias.target.clone(),
            });
        }

        for att in &self.qos_attachments {
            out.push(Relation {
                kind: RelationKind::QosBinding,
                from: att.channel.clone(),
                to: att.policy.clone(),
            });
        }

        out
    }
}

/// Builds a [`Graph`] from a parsed source tree.
///
/// The builder stays mutable through the resolution pass, which annotates
/// entities in place via the indexed `*_mut` accessors, then [`freeze`]s
/// into the read-only view.
///
/// [`freeze`]: GraphBuilder::freeze
#[derive(Clone, Debug, Default)]
pub struct GraphBuilder {
    graph: Graph,
}

impl GraphBuilder {
    /// Runs the two-pass build over a parsed source tree.
    ///
    /// # Errors
    ///
    /// Returns an undeclared-reference error for any dangling
    /// cross-reference, or a type-mismatch error for a default or
    /// assignment that does not fit its parameter's declared type.
    pub fn from_spec(spec: &SpecAst) -> Result<Self> {
        let mut builder = Self::default();
        builder.declare(spec);
        builder.wire(spec)?;
        Ok(builder)
    }

    /// The graph built so far.
    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Consumes the builder, producing the read-only graph.
    #[must_use]
    pub fn freeze(self) -> Graph {
        self.graph
    }

    /// Mutable access to a node instance by table position.
    ///
    /// # Panics
    ///
    /// Panics if `index` is past the instance table.
    pub fn instance_mut(&mut self, index: usize) -> &mut NodeInstance {
        &mut self.graph.instances.items[index]
    }

    /// Mutable access to a topic by table position.
    ///
    /// # Panics
    ///
    /// Panics if `index` is past the topic table.
    pub fn topic_mut(&mut self, index: usize) -> &mut Topic {
        &mut self.graph.topics.items[index]
    }

    /// Mutable access to a service by table position.
    ///
    /// # Panics
    ///
    /// Panics if `index` is past the service table.
    pub fn service_mut(&mut self, index: usize) -> &mut Service {
        &mut self.graph.services.items[index]
    }

    /// Mutable access to an alias by table position.
    ///
    /// # Panics
    ///
    /// Panics if `index` is past the alias table.
    pub fn alias_mut(&mut self, index: usize) -> &mut Alias {
        &mut self.graph.aliases.items[index]
    }

    /// Pass 1: record every declared entity, including channels implied
    /// by typed roles. Never fails; dangling references surface in pass 2.
    fn declare(&mut self, spec: &SpecAst) {
        for decl in &spec.decls {
            match decl {
                Decl::NodeType(nt) => {
                    let mut params = Vec::new();
                    let mut roles = Vec::new();
                    let mut tf_edges = Vec::new();
                    for item in &nt.items {
                        match item {
                            NodeTypeItem::Param(p) => params.push(p.clone()),
                            NodeTypeItem::Role(r) => roles.push(r.clone()),
                            NodeTypeItem::Tf(tf) => tf_edges.push(tf.clone()),
                        }
                    }

                    for role in &roles {
                        if let ChannelRef::Literal(name) = &role.channel {
                            self.declare_role_channel(role.kind, name, role.ty.as_deref());
                        }
                    }

                    self.graph.node_types.insert(
                        &nt.name,
                        NodeType {
                            name: nt.name.clone(),
                            params,
                            roles,
                            tf_edges,
                            where_block: nt.where_block.clone(),
                        },
                    );
                }
                Decl::Topic(td) => {
                    self.graph.topics.insert(
                        &td.name,
                        Topic {
                            name: td.name.clone(),
                            ty: Some(td.ty.clone()),
                            resolved_ty: None,
                            implicit: false,
                        },
                    );
                }
                Decl::Service(sd) => {
                    self.graph.services.insert(
                        &sd.name,
                        Service {
                            name: sd.name.clone(),
                            ty: Some(sd.ty.clone()),
                            resolved_ty: None,
                            implicit: false,
                        },
                    );
                }
                Decl::QosPolicy(qd) => {
                    self.graph.qos_policies.insert(
                        &qd.name,
                        QosPolicy {
                            name: qd.name.clone(),
                            settings: qd.settings.clone(),
                        },
                    );
                }
                Decl::Alias(ad) => {
                    self.graph.aliases.insert(
                        &ad.name,
                        Alias {
                            kind: ad.kind,
                            name: ad.name.clone(),
                            target: ad.target.clone(),
                            resolved_target: None,
                        },
                    );
                }
                Decl::System(sys) => {
                    for ctx in &sys.contexts {
                        self.graph.contexts.insert(
                            &ctx.name,
                            Context {
                                name: ctx.name.clone(),
                                assigns: ctx.assigns.clone(),
                            },
                        );
                    }
                    for inst in &sys.instances {
                        let mut assigns = Vec::new();
                        let mut contexts = Vec::new();
                        let mut remaps = Vec::new();
                        for item in &inst.items {
                            match item {
                                InstanceItem::ParamAssign(a) => assigns.push(a.clone()),
                                InstanceItem::UseContext(c) => contexts.push(c.clone()),
                                InstanceItem::Remap(r) => remaps.push(r.clone()),
                            }
                        }
                        self.graph.instances.insert(
                            &inst.name,
                            NodeInstance {
                                name: inst.name.clone(),
                                type_name: inst.type_name.clone(),
                                assigns,
                                contexts,
                                remaps,
                                effective_params: Vec::new(),
                                effective_roles: Vec::new(),
                            },
                        );
                    }
                }
                Decl::QosAttach(_) => {}
            }
        }
    }

    /// Records a channel implied by a literal role.
    ///
    /// Only the first typed use introduces a channel; an untyped role
    /// introduces nothing (pass 2 insists something else declares the
    /// channel), and an explicit declaration anywhere in the file
    /// overrides any implicit record via the table's replace-in-place.
    fn declare_role_channel(&mut self, kind: RoleKind, name: &str, ty: Option<&str>) {
        let Some(ty) = ty else { return };
        if kind.is_topic() {
            if !self.graph.topics.contains(name) {
                self.graph.topics.insert(
                    name,
                    Topic {
                        name: name.to_string(),
                        ty: Some(ty.to_string()),
                        resolved_ty: None,
                        implicit: true,
                    },
                );
            }
        } else if !self.graph.services.contains(name) {
            self.graph.services.insert(
                name,
                Service {
                    name: name.to_string(),
                    ty: Some(ServiceType::Pair(ty.to_string())),
                    resolved_ty: None,
                    implicit: true,
                },
            );
        }
    }

    /// Pass 2: validate every cross-reference and collect QoS attachments.
    fn wire(&mut self, spec: &SpecAst) -> Result<()> {
        for nt in self.graph.node_types.items() {
            self.wire_node_type(nt)?;
        }
        for inst in self.graph.instances.items() {
            self.wire_instance(inst)?;
        }

        for decl in &spec.decls {
            let Decl::QosAttach(qa) = decl else { continue };
            if !self.graph.qos_policies.contains(&qa.policy) {
                return Err(Error::undeclared_reference(
                    "QoS policy",
                    &qa.policy,
                    format!("attachment to {}", qa.channel),
                ));
            }
            let kind = if self.graph.topics.contains(&qa.channel) {
                ChannelKind::Topic
            } else if self.graph.services.contains(&qa.channel) {
                ChannelKind::Service
            } else {
                return Err(Error::undeclared_reference(
                    "channel",
                    &qa.channel,
                    format!("QoS policy {}", qa.policy),
                ));
            };
            self.graph.qos_attachments.push(QosAttachment {
                policy: qa.policy.clone(),
                channel: qa.channel.clone(),
                kind,
            });
        }
        Ok(())
    }

    fn wire_node_type(&self, nt: &NodeType) -> Result<()> {
        let referrer = format!("node type {}", nt.name);

        for role in &nt.roles {
            match &role.channel {
                ChannelRef::Literal(channel) => {
                    let declared = if role.kind.is_topic() {
                        self.graph.topics.contains(channel)
                    } else {
                        self.graph.services.contains(channel)
                    };
                    if !declared {
                        let kind = if role.kind.is_topic() { "topic" } else { "service" };
                        return Err(Error::undeclared_reference(kind, channel, &referrer));
                    }
                }
                ChannelRef::Content(param) => {
                    if nt.param(param).is_none() {
                        return Err(Error::undeclared_reference("parameter", param, &referrer));
                    }
                }
            }
        }

        for param in &nt.params {
            if let Some(default) = &param.default {
                if !param.ty.accepts(default) {
                    let actual = default.param_type();
                    return Err(Error::type_mismatch(&param.name, param.ty, actual, &referrer));
                }
            }
        }

        Ok(())
    }

    fn wire_instance(&self, inst: &NodeInstance) -> Result<()> {
        let referrer = format!("node instance {}", inst.name);

        let Some(nt) = self.graph.node_types.get(&inst.type_name) else {
            return Err(Error::undeclared_reference(
                "node type",
                &inst.type_name,
                &referrer,
            ));
        };

        for assign in &inst.assigns {
            let Some(param) = nt.param(&assign.name) else {
                return Err(Error::undeclared_reference(
                    "parameter",
                    &assign.name,
                    &referrer,
                ));
            };
            if !param.ty.accepts(&assign.value) {
                let actual = assign.value.param_type();
                return Err(Error::type_mismatch(&param.name, param.ty, actual, &referrer));
            }
        }

        for ctx in &inst.contexts {
            if !self.graph.contexts.contains(ctx) {
                return Err(Error::undeclared_reference("context", ctx, &referrer));
            }
        }

        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
