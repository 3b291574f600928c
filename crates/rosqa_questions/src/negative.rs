//! Deterministic sampling of entity names that do not exist.
//!
//! Negative existence questions need names that look plausible but collide
//! with nothing: not with a declared entity, not with an earlier fake, and
//! not with any answer string already in the output. Candidates are formed
//! by appending a sampled two-letter suffix to a real entity name, cycling
//! round-robin over the entity kinds present so no kind dominates.

use std::collections::HashSet;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rosqa_foundation::EntityKind;
use rosqa_graph::Graph;

use crate::config::GeneratorConfig;

/// Samples up to `negative_entities_per_file` names absent from the graph.
///
/// The same graph, configuration, and answer set always produce the same
/// names in the same order. Sampling gives up once the attempt budget is
/// exhausted, so the result may be shorter than requested for graphs with
/// very few entities.
#[must_use]
pub fn sample_negatives(graph: &Graph, config: &GeneratorConfig, answers: &[String]) -> Vec<String> {
    let count = config.negative_entities_per_file;
    if count == 0 {
        return Vec::new();
    }

    let identities = graph.identities();
    if identities.is_empty() {
        return Vec::new();
    }

    // Identities arrive grouped by kind, so adjacent entries share a kind.
    let mut by_kind: Vec<(EntityKind, Vec<&str>)> = Vec::new();
    for (kind, name) in &identities {
        match by_kind.last_mut() {
            Some((last, names)) if last == kind => names.push(name),
            _ => by_kind.push((*kind, vec![name])),
        }
    }

    let real: HashSet<&str> = identities.iter().map(|(_, name)| *name).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(config.effective_seed());
    let mut fakes: Vec<String> = Vec::with_capacity(count);
    let max_attempts = count * 32;
    let mut attempts = 0;
    let mut kind_idx = 0;

    while fakes.len() < count && attempts < max_attempts {
        attempts += 1;
        let (_, names) = &by_kind[kind_idx];
        let base = names[rng.gen_range(0..names.len())];
        let first = (b'a' + rng.gen_range(0..26u8)) as char;
        let second = (b'a' + rng.gen_range(0..26u8)) as char;
        let candidate = format!("{base}_{first}{second}");

        if real.contains(candidate.as_str())
            || fakes.iter().any(|f| f == &candidate)
            || answers.iter().any(|a| a.contains(candidate.as_str()))
        {
            continue;
        }

        fakes.push(candidate);
        kind_idx = (kind_idx + 1) % by_kind.len();
    }

    fakes
}
