//! Deterministic question synthesis over a resolved graph.
//!
//! Generation is one pass per category, categories in their fixed order,
//! entities visited in declaration order. Everything is computed from the
//! graph, so the same input always yields the same list; the only sampled
//! content is the negative existence block, which runs under a seeded
//! generator and lands right after the positive existence questions.

use std::collections::HashSet;

use rosqa_engine::derive_paths;
use rosqa_foundation::EntityKind;
use rosqa_graph::{ChannelKind, Graph};
use rosqa_language::ast::{AliasKind, RoleKind, TfRole};

use crate::config::GeneratorConfig;
use crate::negative::sample_negatives;
use crate::question::{Category, Level, QType, Question};

/// Generates the full question list for a resolved graph.
///
/// Output is ordered by level, then category, then the declaration order
/// of the entities involved.
#[must_use]
pub fn generate(graph: &Graph, config: &GeneratorConfig) -> Vec<Question> {
    let mut out = Vec::new();

    entity_questions(graph, &mut out);
    let negatives_at = out.len();

    node_questions(graph, &mut out);
    node_type_questions(graph, &mut out);
    topic_questions(graph, &mut out);
    service_questions(graph, &mut out);
    parameter_questions(graph, &mut out);
    parameter_assign_questions(graph, &mut out);
    context_questions(graph, &mut out);
    context_assign_questions(graph, &mut out);
    qos_policy_questions(graph, &mut out);
    qos_attachment_questions(graph, &mut out);
    alias_questions(graph, &mut out);
    content_questions(graph, &mut out);
    tf_questions(graph, &mut out);
    remap_questions(graph, &mut out);
    where_questions(graph, &mut out);
    message_questions(graph, &mut out);

    if config.include_negative_entities && config.negative_entities_per_file > 0 {
        // Sample against the final answer set so no fake name shows up
        // anywhere as a true answer.
        let answers: Vec<String> = out.iter().map(|q| q.answer.clone()).collect();
        let negatives: Vec<Question> = sample_negatives(graph, config, &answers)
            .into_iter()
            .map(|name| {
                Question::new(
                    Level::Entity,
                    Category::Entity,
                    QType::Bool,
                    format!("Is there a ROSpec entity called {name}?"),
                    "No",
                )
            })
            .collect();
        out.splice(negatives_at..negatives_at, negatives);
    }

    out
}

// ============================================================================
// Level 0: existence and kind
// ============================================================================

fn entity_questions(graph: &Graph, out: &mut Vec<Question>) {
    let options = kind_options();
    for (kind, name) in graph.identities() {
        out.push(Question::new(
            Level::Entity,
            Category::Entity,
            QType::Bool,
            format!("Is there a ROSpec entity called {name}?"),
            "Yes",
        ));
        out.push(Question::new(
            Level::Entity,
            Category::Entity,
            QType::Mcq,
            format!("What kind of ROSpec entity is {name}? Possible answers: {options}."),
            kind.option_number().to_string(),
        ));
    }
}

fn kind_options() -> String {
    let options: Vec<String> = EntityKind::ALL
        .iter()
        .map(|k| format!("{}- {}", k.option_number(), k.label()))
        .collect();
    options.join(", ")
}

// ============================================================================
// Level 1: relations and attributes
// ============================================================================

fn node_questions(graph: &Graph, out: &mut Vec<Question>) {
    for inst in graph.instances() {
        let name = &inst.name;
        push_open(
            out,
            Category::Node,
            format!("What is the node type of node instance {name}?"),
            inst.type_name.clone(),
        );
        push_open(
            out,
            Category::Node,
            format!(
                "To which topics does node instance {name} publish, \
                 after resolving content(...) and remaps?"
            ),
            comma_list(inst.effective_channels(RoleKind::Publishes)),
        );
        push_open(
            out,
            Category::Node,
            format!(
                "To which topics does node instance {name} subscribe, \
                 after resolving content(...) and remaps?"
            ),
            comma_list(inst.effective_channels(RoleKind::Subscribes)),
        );
        push_open(
            out,
            Category::Node,
            format!(
                "Which services does node instance {name} provide, \
                 after resolving content(...) and remaps?"
            ),
            comma_list(inst.effective_channels(RoleKind::Provides)),
        );
        push_open(
            out,
            Category::Node,
            format!(
                "Which services does node instance {name} use as a client, \
                 after resolving content(...) and remaps?"
            ),
            comma_list(inst.effective_channels(RoleKind::Uses)),
        );
    }
}

fn node_type_questions(graph: &Graph, out: &mut Vec<Question>) {
    for nt in graph.node_types() {
        let name = &nt.name;
        push_bool(
            out,
            Category::NodeType,
            format!("Is there a ROSpec node type called {name}?"),
            true,
        );
        push_open(
            out,
            Category::NodeType,
            format!("Which topics does node type {name} declare publishing to?"),
            comma_list(nt.declared_channels(RoleKind::Publishes)),
        );
        push_open(
            out,
            Category::NodeType,
            format!("Which topics does node type {name} declare subscribing to?"),
            comma_list(nt.declared_channels(RoleKind::Subscribes)),
        );
        push_open(
            out,
            Category::NodeType,
            format!("Which services does node type {name} declare providing?"),
            comma_list(nt.declared_channels(RoleKind::Provides)),
        );
        push_open(
            out,
            Category::NodeType,
            format!("Which services does node type {name} declare using?"),
            comma_list(nt.declared_channels(RoleKind::Uses)),
        );
    }
}

fn topic_questions(graph: &Graph, out: &mut Vec<Question>) {
    for topic in graph.topics() {
        let name = &topic.name;
        push_open(
            out,
            Category::Topic,
            format!("What is the message type of topic {name}?"),
            unknown_if_none(topic.resolved_ty.as_deref()),
        );
        push_open(
            out,
            Category::Topic,
            format!(
                "Which node instances publish to topic {name}, \
                 after resolving content(...) and remaps?"
            ),
            comma_list(instances_on(graph, RoleKind::Publishes, name)),
        );
        push_open(
            out,
            Category::Topic,
            format!(
                "Which node instances subscribe to topic {name}, \
                 after resolving content(...) and remaps?"
            ),
            comma_list(instances_on(graph, RoleKind::Subscribes, name)),
        );
    }
}

fn service_questions(graph: &Graph, out: &mut Vec<Question>) {
    for service in graph.services() {
        let name = &service.name;
        push_open(
            out,
            Category::Service,
            format!("What is the type of service {name}?"),
            unknown_if_none(service.resolved_ty.as_deref()),
        );
        push_open(
            out,
            Category::Service,
            format!(
                "Which node instances provide service {name}, \
                 after resolving content(...) and remaps?"
            ),
            comma_list(instances_on(graph, RoleKind::Provides, name)),
        );
        push_open(
            out,
            Category::Service,
            format!(
                "Which node instances use service {name} as a client, \
                 after resolving content(...) and remaps?"
            ),
            comma_list(instances_on(graph, RoleKind::Uses, name)),
        );
    }
}

/// Instance names whose effective roles land on the given channel.
fn instances_on(graph: &Graph, kind: RoleKind, channel: &str) -> Vec<String> {
    graph
        .instances()
        .iter()
        .filter(|i| {
            i.effective_roles
                .iter()
                .any(|r| r.kind == kind && r.name == channel)
        })
        .map(|i| i.name.clone())
        .collect()
}

fn parameter_questions(graph: &Graph, out: &mut Vec<Question>) {
    for nt in graph.node_types() {
        let ty_name = &nt.name;
        push_open(
            out,
            Category::Parameter,
            format!("Which parameters are declared in node type {ty_name}?"),
            comma_list(nt.params.iter().map(|p| p.name.clone())),
        );
        for param in &nt.params {
            let p = &param.name;
            push_open(
                out,
                Category::Parameter,
                format!("What is the type of parameter {p} in node type {ty_name}?"),
                param.ty.name(),
            );
            push_bool(
                out,
                Category::Parameter,
                format!("Is parameter {p} optional in node type {ty_name}?"),
                param.optional,
            );
            push_open(
                out,
                Category::Parameter,
                format!("What is the default value of parameter {p} in node type {ty_name}?"),
                param
                    .default
                    .as_ref()
                    .map_or_else(|| "None".to_string(), ToString::to_string),
            );
        }
    }
}

fn parameter_assign_questions(graph: &Graph, out: &mut Vec<Question>) {
    for inst in graph.instances() {
        let name = &inst.name;
        push_open(
            out,
            Category::ParameterAssign,
            format!("Which parameters are assigned in node instance {name}?"),
            comma_list(inst.assigns.iter().map(|a| a.name.clone())),
        );
        for assign in &inst.assigns {
            let p = &assign.name;
            let value = inst.effective_param(p).unwrap_or(&assign.value);
            push_open(
                out,
                Category::ParameterAssign,
                format!("What is the effective value of parameter {p} in node instance {name}?"),
                value.to_string(),
            );
        }
    }
}

fn context_questions(graph: &Graph, out: &mut Vec<Question>) {
    for ctx in graph.contexts() {
        let name = &ctx.name;
        push_open(
            out,
            Category::Context,
            format!("Which keys are assigned in context {name}?"),
            comma_list(ctx.assigns.iter().map(|a| a.key.clone())),
        );
        push_open(
            out,
            Category::Context,
            format!("Which node instances use context {name}?"),
            comma_list(graph.instances_using(name).map(|i| i.name.clone())),
        );
    }
}

fn context_assign_questions(graph: &Graph, out: &mut Vec<Question>) {
    for ctx in graph.contexts() {
        for assign in &ctx.assigns {
            push_open(
                out,
                Category::ContextAssign,
                format!(
                    "What value does context {} assign to {}?",
                    ctx.name, assign.key
                ),
                assign.value.to_string(),
            );
        }
    }
}

fn qos_policy_questions(graph: &Graph, out: &mut Vec<Question>) {
    for policy in graph.qos_policies() {
        let name = &policy.name;
        push_bool(
            out,
            Category::QosPolicy,
            format!("Is there a QoS policy called {name}?"),
            true,
        );
        push_open(
            out,
            Category::QosPolicy,
            format!("Which settings are declared in QoS policy {name}?"),
            comma_list(
                policy
                    .settings
                    .iter()
                    .map(|s| format!("{} = {}", s.key, s.value)),
            ),
        );
        for setting in &policy.settings {
            push_open(
                out,
                Category::QosPolicy,
                format!(
                    "What is the value of setting {} in QoS policy {name}?",
                    setting.key
                ),
                setting.value.clone(),
            );
        }
    }
}

fn qos_attachment_questions(graph: &Graph, out: &mut Vec<Question>) {
    let attachments = graph.qos_attachments();
    for att in attachments {
        push_bool(
            out,
            Category::QosAttachment,
            format!(
                "Is QoS policy {} attached to {} {}?",
                att.policy, att.kind, att.channel
            ),
            true,
        );
    }

    // One reverse lookup per channel, in first-attachment order.
    let mut asked: HashSet<&str> = HashSet::new();
    for att in attachments {
        if !asked.insert(att.channel.as_str()) {
            continue;
        }
        let policies = attachments
            .iter()
            .filter(|a| a.channel == att.channel)
            .map(|a| a.policy.clone());
        push_open(
            out,
            Category::QosAttachment,
            format!("Which QoS policy is attached to {} {}?", att.kind, att.channel),
            comma_list(policies),
        );
    }
}

fn alias_questions(graph: &Graph, out: &mut Vec<Question>) {
    for kind in [AliasKind::Type, AliasKind::Message] {
        let category = match kind {
            AliasKind::Type => Category::TypeAlias,
            AliasKind::Message => Category::MessageAlias,
        };
        let label = kind.label();
        for alias in graph.aliases().iter().filter(|a| a.kind == kind) {
            let name = &alias.name;
            push_bool(out, category, format!("Is there a {label} called {name}?"), true);
            push_open(
                out,
                category,
                format!("What is the target of {label} {name}?"),
                alias.target.clone(),
            );
            if let Some(resolved) = &alias.resolved_target {
                if resolved != &alias.target {
                    push_open(
                        out,
                        category,
                        format!("What does {label} {name} ultimately resolve to?"),
                        resolved.clone(),
                    );
                }
            }
        }
    }
}

fn content_questions(graph: &Graph, out: &mut Vec<Question>) {
    content_family(graph, out, ChannelKind::Service);
    content_family(graph, out, ChannelKind::Topic);
}

fn content_family(graph: &Graph, out: &mut Vec<Question>, kind: ChannelKind) {
    let category = match kind {
        ChannelKind::Service => Category::ContentService,
        ChannelKind::Topic => Category::ContentTopic,
    };
    let label = kind.label();
    let want_topic = kind == ChannelKind::Topic;

    for nt in graph.node_types() {
        let roles: Vec<_> = nt
            .content_roles()
            .filter(|(_, r)| r.kind.is_topic() == want_topic)
            .collect();
        if roles.is_empty() {
            continue;
        }

        let ty_name = &nt.name;
        push_open(
            out,
            category,
            format!(
                "Which parameters provide {label} names via content(...) in node type {ty_name}?"
            ),
            comma_list(
                roles
                    .iter()
                    .filter_map(|(_, r)| r.channel.content_param().map(String::from)),
            ),
        );

        for (idx, role) in &roles {
            let Some(param) = role.channel.content_param() else {
                continue;
            };
            for inst in graph.instances_of(ty_name) {
                // Effective roles are index-aligned with the declared roles.
                let resolved = inst
                    .effective_roles
                    .get(*idx)
                    .map_or_else(|| "Unknown".to_string(), |r| r.name.clone());
                push_open(
                    out,
                    category,
                    format!(
                        "What is the resolved name of the content {label} read from \
                         parameter {param} in node instance {}?",
                        inst.name
                    ),
                    resolved,
                );
            }
        }
    }
}

fn tf_questions(graph: &Graph, out: &mut Vec<Question>) {
    for nt in graph.node_types() {
        let ty_name = &nt.name;
        push_open(
            out,
            Category::Tf,
            format!("Which TF relations does node type {ty_name} declare?"),
            comma_list(
                nt.tf_edges
                    .iter()
                    .map(|e| format!("{} {} -> {}", e.role, e.parent, e.child)),
            ),
        );
        for edge in &nt.tf_edges {
            let verb = match edge.role {
                TfRole::Broadcasts => "broadcast",
                TfRole::Listens => "listen to",
            };
            push_bool(
                out,
                Category::Tf,
                format!(
                    "Does node type {ty_name} {verb} the TF transform {} -> {}?",
                    edge.parent, edge.child
                ),
                true,
            );
        }
    }
}

fn remap_questions(graph: &Graph, out: &mut Vec<Question>) {
    for inst in graph.instances() {
        let name = &inst.name;
        push_open(
            out,
            Category::Remap,
            format!("Which remaps are declared in node instance {name}?"),
            comma_list(inst.remaps.iter().map(|r| format!("{} -> {}", r.from, r.to))),
        );
        for remap in &inst.remaps {
            push_bool(
                out,
                Category::Remap,
                format!(
                    "Does node instance {name} remap {} to {}?",
                    remap.from, remap.to
                ),
                true,
            );
        }
    }
}

fn where_questions(graph: &Graph, out: &mut Vec<Question>) {
    for nt in graph.node_types() {
        let ty_name = &nt.name;
        push_bool(
            out,
            Category::WhereBlock,
            format!("Does node type {ty_name} declare a where-clause?"),
            nt.where_block.is_some(),
        );
        if let Some(block) = &nt.where_block {
            push_open(
                out,
                Category::WhereBlock,
                format!("What is the where-clause of node type {ty_name}?"),
                block.clone(),
            );
        }
        for param in &nt.params {
            let p = &param.name;
            push_bool(
                out,
                Category::WhereBlock,
                format!("Does parameter {p} in node type {ty_name} have a constraint?"),
                param.constraint.is_some(),
            );
            if let Some(constraint) = &param.constraint {
                push_open(
                    out,
                    Category::WhereBlock,
                    format!("What is the constraint of parameter {p} in node type {ty_name}?"),
                    constraint.clone(),
                );
            }
        }
    }
}

// ============================================================================
// Level 2: communication paths
// ============================================================================

fn message_questions(graph: &Graph, out: &mut Vec<Question>) {
    let paths = derive_paths(graph);
    let instances = graph.instances();
    for group in paths.hop_groups() {
        let origin = &instances[group.origin].name;
        let question = match group.kind {
            ChannelKind::Topic => format!(
                "Which node subscribes to topic {} published by node {origin}?",
                group.channel
            ),
            ChannelKind::Service => format!(
                "Which node serves service {} called by node {origin}?",
                group.channel
            ),
        };
        let answer = comma_list(group.dests.iter().map(|&d| instances[d].name.clone()));
        out.push(Question::new(
            Level::Path,
            Category::Message,
            QType::Open,
            question,
            answer,
        ));
    }
}

// ============================================================================
// Rendering helpers
// ============================================================================

fn push_open(
    out: &mut Vec<Question>,
    category: Category,
    question: String,
    answer: impl Into<String>,
) {
    out.push(Question::new(
        Level::Relation,
        category,
        QType::Open,
        question,
        answer,
    ));
}

fn push_bool(out: &mut Vec<Question>, category: Category, question: String, answer: bool) {
    out.push(Question::new(
        Level::Relation,
        category,
        QType::Bool,
        question,
        yes_no(answer),
    ));
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

/// Sorted, deduplicated, comma-joined list; `None` when nothing remains.
fn comma_list<I>(items: I) -> String
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut items: Vec<String> = items
        .into_iter()
        .map(Into::into)
        .filter(|s| !s.is_empty())
        .collect();
    items.sort();
    items.dedup();
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}

fn unknown_if_none(value: Option<&str>) -> String {
    value.map_or_else(|| "Unknown".to_string(), ToString::to_string)
}

// ============================================================================
// Tests
// ============================================================================
