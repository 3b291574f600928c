//! Communication path derivation over the resolved graph.
//!
//! A *hop* is one directed communication step between two node
//! instances: publisher to subscriber over a topic, or client to server
//! over a service. Hops match on **effective** channel names, so content
//! resolution and remaps have already happened by the time two
//! instances are considered connected.
//!
//! Hops live in an arena ([`PathSet::hops`]); paths are sequences of hop
//! indices, extended depth-first from every instance with at least one
//! outgoing hop. A path never revisits an `(origin, channel, kind)` key
//! it already contains: service call graphs may loop, and a revisit
//! truncates the path instead of extending it.

use std::collections::{HashMap, HashSet};

use rosqa_graph::{ChannelKind, Graph};
use rosqa_language::ast::RoleKind;

/// One directed communication step between two node instances.
///
/// `origin` and `dest` index into the graph's instance table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hop {
    /// The sending or calling instance.
    pub origin: usize,
    /// The effective channel name both sides agree on.
    pub channel: String,
    /// Whether the channel is a topic or a service.
    pub kind: ChannelKind,
    /// The receiving or serving instance.
    pub dest: usize,
}

impl Hop {
    fn key(&self) -> (usize, String, ChannelKind) {
        (self.origin, self.channel.clone(), self.kind)
    }
}

/// A group of hops sharing one origin and channel.
///
/// Level-2 questions ask about these: "who hears what this instance
/// sends on this channel".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HopGroup {
    /// The sending or calling instance.
    pub origin: usize,
    /// The effective channel name.
    pub channel: String,
    /// Whether the channel is a topic or a service.
    pub kind: ChannelKind,
    /// Every destination instance, in hop discovery order.
    pub dests: Vec<usize>,
}

/// The derived hops and maximal paths of one resolved graph.
#[derive(Clone, Debug, Default)]
pub struct PathSet {
    hops: Vec<Hop>,
    paths: Vec<Vec<usize>>,
}

impl PathSet {
    /// The deduplicated hop arena, in derivation order.
    #[must_use]
    pub fn hops(&self) -> &[Hop] {
        &self.hops
    }

    /// Maximal paths as sequences of hop indices.
    #[must_use]
    pub fn paths(&self) -> &[Vec<usize>] {
        &self.paths
    }

    /// True when the graph produced no communication at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }

    /// Groups hops by `(origin, channel, kind)` in first-appearance order.
    #[must_use]
    pub fn hop_groups(&self) -> Vec<HopGroup> {
        let mut groups: Vec<HopGroup> = Vec::new();
        let mut by_key: HashMap<(usize, String, ChannelKind), usize> = HashMap::new();
        for hop in &self.hops {
            if let Some(&slot) = by_key.get(&hop.key()) {
                groups[slot].dests.push(hop.dest);
            } else {
                by_key.insert(hop.key(), groups.len());
                groups.push(HopGroup {
                    origin: hop.origin,
                    channel: hop.channel.clone(),
                    kind: hop.kind,
                    dests: vec![hop.dest],
                });
            }
        }
        groups
    }
}

/// Derives every hop and every maximal path from a resolved graph.
///
/// A graph without node instances yields an empty set.
#[must_use]
pub fn derive_paths(graph: &Graph) -> PathSet {
    let hops = collect_hops(graph);

    let mut outgoing = vec![Vec::new(); graph.instances().len()];
    for (index, hop) in hops.iter().enumerate() {
        outgoing[hop.origin].push(index);
    }

    let mut paths = Vec::new();
    for instance in 0..graph.instances().len() {
        for &first in &outgoing[instance] {
            let mut path = vec![first];
            let mut visited = HashSet::new();
            visited.insert(hops[first].key());
            extend_path(&hops, &outgoing, first, &mut path, &mut visited, &mut paths);
        }
    }

    PathSet { hops, paths }
}

/// Enumerates deduplicated hops in instance declaration order.
///
/// For every publishing role the counterpart is a subscribing role on
/// another instance with the same effective name; for every client role
/// the counterpart is a providing role. Self-communication is skipped.
fn collect_hops(graph: &Graph) -> Vec<Hop> {
    let instances = graph.instances();
    let mut hops = Vec::new();
    let mut seen = HashSet::new();

    for (oi, origin) in instances.iter().enumerate() {
        for role in &origin.effective_roles {
            let (counter, kind) = match role.kind {
                RoleKind::Publishes => (RoleKind::Subscribes, ChannelKind::Topic),
                RoleKind::Uses => (RoleKind::Provides, ChannelKind::Service),
                RoleKind::Subscribes | RoleKind::Provides => continue,
            };
            for (di, dest) in instances.iter().enumerate() {
                if di == oi {
                    continue;
                }
                let connected = dest
                    .effective_roles
                    .iter()
                    .any(|r| r.kind == counter && r.name == role.name);
                if !connected {
                    continue;
                }
                if seen.insert((oi, role.name.clone(), kind, di)) {
                    hops.push(Hop {
                        origin: oi,
                        channel: role.name.clone(),
                        kind,
                        dest: di,
                    });
                }
            }
        }
    }

    hops
}

/// Depth-first extension past `last`; emits the path once nothing
/// unvisited extends it.
fn extend_path(
    hops: &[Hop],
    outgoing: &[Vec<usize>],
    last: usize,
    path: &mut Vec<usize>,
    visited: &mut HashSet<(usize, String, ChannelKind)>,
    paths: &mut Vec<Vec<usize>>,
) {
    let mut extended = false;

    for &next in &outgoing[hops[last].dest] {
        let key = hops[next].key();
        if visited.contains(&key) {
            continue;
        }
        extended = true;
        visited.insert(key.clone());
        path.push(next);
        extend_path(hops, outgoing, next, path, visited, paths);
        path.pop();
        visited.remove(&key);
    }

    if !extended {
        paths.push(path.clone());
    }
}

// =============================================================================
// Tests
// =============================================================================
