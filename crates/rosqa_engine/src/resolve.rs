//! The resolution pass: turns declared references into effective facts.
//!
//! Resolution runs once over a built [`GraphBuilder`] and annotates
//! entities in place, never touching declared values:
//!
//! 1. alias chains are followed to their end for every alias,
//! 2. topic and service types are rewritten through those chains,
//! 3. every node instance gets its effective parameter values and
//!    effective role channel names.
//!
//! The effective value of a parameter comes from the first source that
//! has one: the instance's own assignment, then each attached context in
//! attachment order, then the node type default. A `content(p)` role
//! reads its channel name from the effective value of `p`, which must be
//! a string; remaps rename the result as the final step, before any path
//! is derived.

use rosqa_foundation::{Error, Result, Value};
use rosqa_graph::{EffectiveRole, Graph, GraphBuilder, NodeInstance, NodeType};
use rosqa_language::ast::{ChannelRef, Param, ServiceType};

/// Runs the full resolution pass over a built graph.
///
/// # Errors
///
/// Returns an alias-cycle error when an alias chain revisits a name, a
/// type-mismatch error when a context assignment shadows a parameter
/// with an incompatible value, and an unresolved-content-service error
/// when a `content(...)` role has no effective string value to read.
pub fn resolve(builder: &mut GraphBuilder) -> Result<()> {
    resolve_aliases(builder)?;
    resolve_channel_types(builder)?;
    resolve_instances(builder)?;
    Ok(())
}

/// Follows an alias chain to its end.
///
/// The chain may hop between both alias kinds; it must terminate within
/// `bound` steps (the number of declared aliases), otherwise some alias
/// repeats and the chain is cyclic.
fn follow_chain(graph: &Graph, start: &str, bound: usize) -> Result<String> {
    let mut current = start.to_string();
    let mut chain = vec![current.clone()];
    let mut steps = 0;
    while let Some(alias) = graph.alias(&current) {
        if steps == bound {
            return Err(Error::alias_cycle(start, chain));
        }
        steps += 1;
        current = alias.target.clone();
        chain.push(current.clone());
    }
    Ok(current)
}

fn resolve_aliases(builder: &mut GraphBuilder) -> Result<()> {
    let bound = builder.graph().aliases().len();
    for index in 0..bound {
        let name = builder.graph().aliases()[index].name.clone();
        let resolved = follow_chain(builder.graph(), &name, bound)?;
        builder.alias_mut(index).resolved_target = Some(resolved);
    }
    Ok(())
}

fn resolve_channel_types(builder: &mut GraphBuilder) -> Result<()> {
    let bound = builder.graph().aliases().len();

    for index in 0..builder.graph().topics().len() {
        let resolved = match &builder.graph().topics()[index].ty {
            Some(ty) => Some(follow_chain(builder.graph(), ty, bound)?),
            None => None,
        };
        builder.topic_mut(index).resolved_ty = resolved;
    }

    for index in 0..builder.graph().services().len() {
        let resolved = match &builder.graph().services()[index].ty {
            Some(ServiceType::Pair(name)) => Some(follow_chain(builder.graph(), name, bound)?),
            Some(ServiceType::ReqResp { request, response }) => {
                let request = follow_chain(builder.graph(), request, bound)?;
                let response = follow_chain(builder.graph(), response, bound)?;
                Some(format!("{request} -> {response}"))
            }
            None => None,
        };
        builder.service_mut(index).resolved_ty = resolved;
    }

    Ok(())
}

fn resolve_instances(builder: &mut GraphBuilder) -> Result<()> {
    for index in 0..builder.graph().instances().len() {
        let (params, roles) = {
            let graph = builder.graph();
            let inst = &graph.instances()[index];
            let Some(nt) = graph.node_type(&inst.type_name) else {
                return Err(Error::undeclared_reference(
                    "node type",
                    &inst.type_name,
                    format!("node instance {}", inst.name),
                ));
            };
            let params = effective_params(graph, inst, nt)?;
            let roles = effective_roles(inst, nt, &params)?;
            (params, roles)
        };
        let inst = builder.instance_mut(index);
        inst.effective_params = params;
        inst.effective_roles = roles;
    }
    Ok(())
}

fn effective_params(
    graph: &Graph,
    inst: &NodeInstance,
    nt: &NodeType,
) -> Result<Vec<(String, Value)>> {
    let mut out = Vec::new();
    for param in &nt.params {
        if let Some(value) = effective_value(graph, inst, param)? {
            out.push((param.name.clone(), value));
        }
    }
    Ok(out)
}

/// Resolves one parameter through the scope chain; first source wins.
fn effective_value(graph: &Graph, inst: &NodeInstance, param: &Param) -> Result<Option<Value>> {
    if let Some(value) = inst.assign(&param.name) {
        return Ok(Some(value.clone()));
    }

    for ctx_name in &inst.contexts {
        let Some(value) = graph.context(ctx_name).and_then(|c| c.assign(&param.name)) else {
            continue;
        };
        if !param.ty.accepts(value) {
            return Err(Error::type_mismatch(
                &param.name,
                param.ty,
                value.param_type(),
                format!("context {ctx_name}"),
            ));
        }
        return Ok(Some(value.clone()));
    }

    Ok(param.default.clone())
}

fn effective_roles(
    inst: &NodeInstance,
    nt: &NodeType,
    effective: &[(String, Value)],
) -> Result<Vec<EffectiveRole>> {
    let mut out = Vec::new();
    for role in &nt.roles {
        let name = resolve_channel(inst, &role.channel, effective)?;
        out.push(EffectiveRole {
            kind: role.kind,
            declared: role.channel.clone(),
            name,
        });
    }
    Ok(out)
}

/// Resolves one channel reference: content lookup first, remap last.
fn resolve_channel(
    inst: &NodeInstance,
    channel: &ChannelRef,
    effective: &[(String, Value)],
) -> Result<String> {
    let literal = match channel {
        ChannelRef::Literal(name) => name.clone(),
        ChannelRef::Content(param) => content_channel(inst, param, effective)?,
    };
    Ok(apply_remaps(inst, literal))
}

/// Reads a `content(p)` channel name from the effective parameters.
/// Anything but a string value leaves the channel unresolved.
fn content_channel(
    inst: &NodeInstance,
    param: &str,
    effective: &[(String, Value)],
) -> Result<String> {
    match effective.iter().find(|(n, _)| n == param).map(|(_, v)| v) {
        Some(Value::Str(name)) => Ok(name.clone()),
        _ => Err(Error::unresolved_content_service(&inst.name, param)),
    }
}

/// Renames a channel through the instance's remaps; first match wins,
/// and the result is never remapped again.
fn apply_remaps(inst: &NodeInstance, name: String) -> String {
    inst.remaps
        .iter()
        .find(|r| r.from == name)
        .map_or(name, |r| r.to.clone())
}

// =============================================================================
// Tests
// =============================================================================
