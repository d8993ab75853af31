// src/metrics/community.rs
//! Modularity and greedy community detection.
//!
//! The metrics engine accepts a precomputed partition; when none is
//! supplied it falls back to the agglomerative routine here. The two
//! paths stay separate so each is testable on its own.

use std::collections::HashMap;

use crate::graph::collab::CollabGraph;
use crate::identity::DevId;

/// Modularity of a partition:
/// Q = sum over communities of [ L_c/m - (d_c/(2m))^2 ].
/// Zero-edge graphs (including the empty graph) score 0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn modularity(graph: &CollabGraph, communities: &[Vec<DevId>]) -> f64 {
    let m = graph.edge_count() as f64;
    if m == 0.0 {
        return 0.0;
    }

    let community_of: HashMap<DevId, usize> = communities
        .iter()
        .enumerate()
        .flat_map(|(c, members)| members.iter().map(move |&v| (v, c)))
        .collect();

    let mut intra_edges = vec![0.0f64; communities.len()];
    for (u, v, _) in graph.edges() {
        if let (Some(&cu), Some(&cv)) = (community_of.get(&u), community_of.get(&v)) {
            if cu == cv {
                intra_edges[cu] += 1.0;
            }
        }
    }

    let mut degree_sums = vec![0.0f64; communities.len()];
    for (c, members) in communities.iter().enumerate() {
        degree_sums[c] = members.iter().map(|&v| graph.degree(v) as f64).sum();
    }

    (0..communities.len())
        .map(|c| intra_edges[c] / m - (degree_sums[c] / (2.0 * m)).powi(2))
        .sum()
}

/// Greedy agglomerative modularity maximization: start from singleton
/// communities and repeatedly apply the merge with the largest positive
/// modularity gain, stopping when no merge improves modularity or one
/// community remains. Communities are returned with sorted members,
/// largest community first.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn greedy_communities(graph: &CollabGraph) -> Vec<Vec<DevId>> {
    let nodes: Vec<DevId> = graph.nodes().collect();
    let m = graph.edge_count() as f64;
    if nodes.is_empty() || m == 0.0 {
        return finalize(nodes.into_iter().map(|v| vec![v]).collect());
    }

    let index: HashMap<DevId, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, &v)| (v, i))
        .collect();
    let mut members: Vec<Vec<DevId>> = nodes.iter().map(|&v| vec![v]).collect();
    let mut alive: Vec<bool> = vec![true; nodes.len()];
    let mut degree_sum: Vec<f64> = nodes.iter().map(|&v| graph.degree(v) as f64).collect();

    // Edge counts between live communities, keyed (low, high).
    let mut between: HashMap<(usize, usize), f64> = HashMap::new();
    for (u, v, _) in graph.edges() {
        let (a, b) = ordered(index[&u], index[&v]);
        *between.entry((a, b)).or_insert(0.0) += 1.0;
    }

    loop {
        let Some(((a, b), gain)) = best_merge(&between, &degree_sum, m) else {
            break;
        };
        if gain <= 0.0 {
            break;
        }

        // Merge b into a.
        let moved = std::mem::take(&mut members[b]);
        members[a].extend(moved);
        degree_sum[a] += degree_sum[b];
        degree_sum[b] = 0.0;
        alive[b] = false;

        let mut merged: HashMap<(usize, usize), f64> = HashMap::new();
        for (&(x, y), &e) in &between {
            let x = if x == b { a } else { x };
            let y = if y == b { a } else { y };
            if x == y {
                continue;
            }
            *merged.entry(ordered(x, y)).or_insert(0.0) += e;
        }
        between = merged;
    }

    finalize(
        members
            .into_iter()
            .zip(alive)
            .filter(|(_, live)| *live)
            .map(|(community, _)| community)
            .collect(),
    )
}

/// ΔQ of merging communities i and j: E_ij/m - d_i*d_j/(2m^2).
/// Only pairs with at least one connecting edge are candidates.
fn best_merge(
    between: &HashMap<(usize, usize), f64>,
    degree_sum: &[f64],
    m: f64,
) -> Option<((usize, usize), f64)> {
    let mut pairs: Vec<(&(usize, usize), &f64)> = between.iter().collect();
    pairs.sort_by(|(ka, _), (kb, _)| ka.cmp(kb));

    let mut best: Option<((usize, usize), f64)> = None;
    for (&(i, j), &edges) in pairs {
        if edges == 0.0 {
            continue;
        }
        let gain = edges / m - degree_sum[i] * degree_sum[j] / (2.0 * m * m);
        if best.map_or(true, |(_, g)| gain > g) {
            best = Some(((i, j), gain));
        }
    }
    best
}

fn ordered(a: usize, b: usize) -> (usize, usize) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn finalize(mut communities: Vec<Vec<DevId>>) -> Vec<Vec<DevId>> {
    for community in &mut communities {
        community.sort_unstable();
    }
    communities.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    communities
}
